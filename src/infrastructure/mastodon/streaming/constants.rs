use std::time::Duration;

pub const STREAMING_PATH: &str = "/api/v1/streaming";
pub const USER_STREAM: &str = "user";

pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

pub const EVENT_NOTIFICATION: &str = "notification";
pub const EVENT_UPDATE: &str = "update";
pub const EVENT_STATUS_UPDATE: &str = "status.update";
pub const EVENT_DELETE: &str = "delete";
pub const EVENT_FILTERS_CHANGED: &str = "filters_changed";
