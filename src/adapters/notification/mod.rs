//! Notification adapters.

mod logging;
mod recording;

pub use logging::LoggingNotificationDispatcher;
pub use recording::RecordingNotificationDispatcher;
