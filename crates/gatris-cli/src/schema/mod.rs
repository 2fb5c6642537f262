pub mod checkpoint;
pub mod model;
pub mod play_report;
