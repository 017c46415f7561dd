mod auth_vm;
mod calendar_vm;
mod quiz_vm;
mod stats_vm;

pub use auth_vm::{
    AuthMode, AuthNotice, login_failure_notice, register_failure_notice, registered_notice,
};
pub use calendar_vm::{CalendarCellVm, CalendarVm, bucket_color, map_calendar};
pub use quiz_vm::{OptionMark, OptionVm, QuizVm, map_quiz};
pub use stats_vm::{OverviewVm, SessionStatsVm, map_overview, map_session_stats};
