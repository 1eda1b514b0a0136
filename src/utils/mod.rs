pub mod config;
pub mod fd_limit;
pub mod logger;

pub use config::{Defaults, Limits};
pub use fd_limit::{default_descriptor_limit, max_open_fds};
pub use logger::setup_logging;
