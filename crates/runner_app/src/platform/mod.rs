pub(crate) mod app;
pub(crate) mod input;
pub(crate) mod logging;

pub(crate) use app::run_app;
