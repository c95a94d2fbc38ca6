//! Terminal output for the avakit CLI
//!
//! Uses `cliclack` for spinners and prompts in a terminal and falls back
//! to plain tagged lines in CI or when piped.

mod context;
mod output;
mod progress;
mod prompts;

pub use context::UiContext;
pub use output::{field, heading, note, report, Status};
pub use progress::spin;
pub use prompts::{confirm, password};
