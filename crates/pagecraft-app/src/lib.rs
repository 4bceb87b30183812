//! PageCraft Application
//!
//! The editor session tying the core model to persistence and publishing,
//! plus the command line front end.

pub mod cli;
mod session;

pub use cli::{CliCommand, CliError, CliOptions};
pub use session::{EditorSession, SessionError, SessionResult};

#[cfg(not(target_arch = "wasm32"))]
pub use cli::run;
