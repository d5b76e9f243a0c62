pub mod controls;
#[allow(clippy::module_inception)]
pub mod paginator;
