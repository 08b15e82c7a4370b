mod bootstrap;

use anyhow::Result;
use presence_core::settings::Settings;
use presence_runtime::data_manager::DataManager;
use presence_web::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Presence analyzer v{} starting", env!("CARGO_PKG_VERSION"));

    let data_path = bootstrap::resolve_data_path(settings.data_csv.as_deref())?;
    let addr = settings.bind_addr()?;

    tracing::info!(
        "Data: {}, cache: {}",
        data_path.display(),
        if settings.cache { "mtime" } else { "off" }
    );

    let manager = DataManager::new(data_path, settings.cache);
    presence_web::serve(AppState::new(manager), addr).await?;

    Ok(())
}
