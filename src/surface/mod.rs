pub mod drawable;
pub mod log;
