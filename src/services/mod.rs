pub mod schedule;
pub mod ties;

pub use schedule::ScheduleService;
pub use ties::TieService;
