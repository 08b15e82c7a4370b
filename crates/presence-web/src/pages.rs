//! Static chart pages.
//!
//! Each page fills its user selector from `/api/v1/users` and draws a chart
//! client-side from the matching JSON endpoint.

pub const PRESENCE_WEEKDAY: &str = include_str!("../pages/presence_weekday.html");
pub const MEAN_TIME_WEEKDAY: &str = include_str!("../pages/mean_time_weekday.html");
pub const PRESENCE_START_END: &str = include_str!("../pages/presence_start_end.html");
