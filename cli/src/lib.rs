pub mod args;
pub mod commands;
pub mod context;
pub mod logging;

pub use args::Args;
pub use context::CliContext;
