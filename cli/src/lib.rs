//! Driver glue around the election state machine: TOML configuration,
//! scripted operations, and status reporting.

pub mod config;
pub mod report;
pub mod script;

pub use config::{ConfigError, ElectionConfig};
pub use report::Status;
pub use script::{run_script, Outcome, Script, ScriptError, Step};
