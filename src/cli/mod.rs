pub mod arg_parser;
pub mod handlers;

pub use arg_parser::{Cli, Commands};
pub use handlers::{handle_prune, handle_scan};
