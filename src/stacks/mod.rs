//! Stack resolution and processing.
//!
//! Resolves a stack argument (a file path or a logical name) to the stack
//! config files it denotes, and merges those files into component values.

pub mod locator;
pub mod naming;
pub mod processor;

pub use locator::{StackFile, StackResolution, find_stack_config_files, list_stack_config_files};
pub use naming::{derive_logical_name, logical_name_from_path, logical_name_from_pattern};
pub use processor::{FileStackProcessor, StackProcessor};
