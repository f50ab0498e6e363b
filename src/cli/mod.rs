//! Command-line interface.
//!
//! ```ignore
//! use citadel_demo::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::Version => handle_version_command(),
//!     CliCommand::Run(options) => { /* seed the store, start the controller */ }
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, RunOptions};
pub use version::{handle_version_command, VERSION};
