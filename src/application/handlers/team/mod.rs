//! Team status and reminder handlers.

mod get_team_status;
mod send_reminders;

pub use get_team_status::{GetTeamStatusHandler, GetTeamStatusQuery};
pub use send_reminders::{SendRemindersCommand, SendRemindersHandler, SendRemindersResult};
