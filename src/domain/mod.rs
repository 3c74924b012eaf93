pub mod chart;
pub mod file_change;
pub mod report;
