use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use presence_core::models::{PresenceLog, UserId};
use presence_data::analysis::{self, MeanRow, StartEndRow, UserSummary};
use presence_runtime::data_manager::DataManager;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::pages;

/// Page the root URL redirects to.
pub const DEFAULT_PAGE: &str = "/presence_weekday.html";

/// Header row prepended to the total-presence table.
const PRESENCE_WEEKDAY_HEADER: (&str, &str) = ("Weekday", "Presence (s)");

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<DataManager>,
}

impl AppState {
    pub fn new(manager: DataManager) -> Self {
        Self {
            manager: Arc::new(manager),
        }
    }

    /// Fetch the presence log on the blocking pool.
    async fn presence_log(&self) -> Result<Arc<PresenceLog>, ApiError> {
        let manager = Arc::clone(&self.manager);
        let log = tokio::task::spawn_blocking(move || manager.get_data())
            .await
            .map_err(|e| ApiError::Task(e.to_string()))??;
        Ok(log)
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/v1/users", get(api_users))
        .route("/api/v1/mean_time_weekday/{user_id}", get(api_mean_time_weekday))
        .route("/api/v1/presence_weekday/{user_id}", get(api_presence_weekday))
        .route("/api/v1/presence_start_end/{user_id}", get(api_presence_start_end));

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/presence_weekday.html", get(|| page(pages::PRESENCE_WEEKDAY)))
        .route("/mean_time_weekday.html", get(|| page(pages::MEAN_TIME_WEEKDAY)))
        .route("/presence_start_end.html", get(|| page(pages::PRESENCE_START_END)))
        .merge(api)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index_handler() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, DEFAULT_PAGE)])
}

async fn health_handler() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn page(html: &'static str) -> Html<&'static str> {
    Html(html)
}

async fn api_users(State(state): State<AppState>) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let log = state.presence_log().await?;
    Ok(Json(analysis::list_users(&log)))
}

async fn api_mean_time_weekday(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<MeanRow>>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let log = state.presence_log().await?;
    Ok(Json(analysis::mean_time_weekday(&log, user_id)?))
}

async fn api_presence_weekday(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let log = state.presence_log().await?;
    let rows = analysis::presence_weekday(&log, user_id)?;

    let mut table = Vec::with_capacity(rows.len() + 1);
    table.push(json!([PRESENCE_WEEKDAY_HEADER.0, PRESENCE_WEEKDAY_HEADER.1]));
    table.extend(rows.into_iter().map(|(label, total)| json!([label, total])));
    Ok(Json(table))
}

async fn api_presence_start_end(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<StartEndRow>>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let log = state.presence_log().await?;
    Ok(Json(analysis::presence_start_end(&log, user_id)?))
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::InvalidUserId(raw.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn fixture_state() -> AppState {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../runtime/data/test_data.csv");
        AppState::new(DataManager::new(path, false))
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(req).await.unwrap()
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let resp = get(build_router(fixture_state()), uri).await;
        let status = resp.status();
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "application/json",
            "content type for {uri}"
        );
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    // ── pages ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_mainpage_redirects() {
        let resp = get(build_router(fixture_state()), "/").await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert!(resp.headers()[header::LOCATION]
            .to_str()
            .unwrap()
            .ends_with("/presence_weekday.html"));
    }

    #[tokio::test]
    async fn test_chart_pages_served() {
        for uri in [
            "/presence_weekday.html",
            "/mean_time_weekday.html",
            "/presence_start_end.html",
        ] {
            let resp = get(build_router(fixture_state()), uri).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
            assert!(resp.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html"));
        }
    }

    #[tokio::test]
    async fn test_unknown_page_is_404() {
        let resp = get(build_router(fixture_state()), "/nope.html").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    // ── /api/v1/users ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_api_users() {
        let (status, body) = get_json("/api/v1/users").await;
        assert_eq!(status, StatusCode::OK);

        let users = body.as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0], json!({"user_id": 10, "name": "User 10"}));
        assert_eq!(users[1], json!({"user_id": 11, "name": "User 11"}));
    }

    #[tokio::test]
    async fn test_api_users_missing_file_is_500() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = AppState::new(DataManager::new(dir.path().join("absent.csv"), false));

        let resp = get(build_router(state), "/api/v1/users").await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ── /api/v1/mean_time_weekday ─────────────────────────────────────────

    #[tokio::test]
    async fn test_mean_time_weekday() {
        let (status, _) = get_json("/api/v1/mean_time_weekday/0").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get_json("/api/v1/mean_time_weekday/10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                ["Mon", 0.0],
                ["Tue", 30047.0],
                ["Wed", 24465.0],
                ["Thu", 23705.0],
                ["Fri", 0.0],
                ["Sat", 0.0],
                ["Sun", 0.0],
            ])
        );

        let (_, body) = get_json("/api/v1/mean_time_weekday/11").await;
        assert_eq!(
            body,
            json!([
                ["Mon", 24123.0],
                ["Tue", 16564.0],
                ["Wed", 25321.0],
                ["Thu", 22984.0],
                ["Fri", 6426.0],
                ["Sat", 0.0],
                ["Sun", 0.0],
            ])
        );
    }

    #[tokio::test]
    async fn test_non_numeric_user_id_is_404() {
        let (status, body) = get_json("/api/v1/mean_time_weekday/abc").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    // ── /api/v1/presence_weekday ──────────────────────────────────────────

    #[tokio::test]
    async fn test_presence_weekday() {
        let (status, _) = get_json("/api/v1/presence_weekday/0").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get_json("/api/v1/presence_weekday/10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                ["Weekday", "Presence (s)"],
                ["Mon", 0],
                ["Tue", 30047],
                ["Wed", 24465],
                ["Thu", 23705],
                ["Fri", 0],
                ["Sat", 0],
                ["Sun", 0],
            ])
        );

        let (_, body) = get_json("/api/v1/presence_weekday/11").await;
        assert_eq!(
            body,
            json!([
                ["Weekday", "Presence (s)"],
                ["Mon", 24123],
                ["Tue", 16564],
                ["Wed", 25321],
                ["Thu", 45968],
                ["Fri", 6426],
                ["Sat", 0],
                ["Sun", 0],
            ])
        );
    }

    // ── /api/v1/presence_start_end ────────────────────────────────────────

    #[tokio::test]
    async fn test_presence_start_end() {
        let (status, _) = get_json("/api/v1/presence_start_end/0").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get_json("/api/v1/presence_start_end/11").await;
        assert_eq!(status, StatusCode::OK);

        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 7);
        // Thursdays: 09:28:08 / 10:18:36 in, 15:50:57 / 16:41:55 out.
        assert_eq!(rows[3], json!(["Thu", 35602.0, 58586.0]));
        assert_eq!(rows[5], json!(["Sat", 0.0, 0.0]));
    }
}
