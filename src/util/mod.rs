//! Utility modules

pub mod paths;
pub mod process;
pub mod tools;

pub use paths::{config_path, data_dir, expand_home, log_file_path, logs_dir};
pub use process::{open_in_browser, CommandRunner, ProcessError, RecordingRunner, SystemRunner};
pub use tools::{Tool, ToolAvailability};
