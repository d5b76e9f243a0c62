#[allow(clippy::module_inception)]
pub mod diagram;
pub mod lesson;
pub mod script;
