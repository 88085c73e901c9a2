//! Exit code constants for the atmos CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable input)
//! - 2: CLI configuration failure (not found, invalid, unresolvable paths)
//! - 3: Stack resolution failure
//! - 4: Workflow failure (bad definition or a failing step)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or unreadable input files.
pub const USER_ERROR: i32 = 1;

/// The CLI configuration could not be found, parsed, or resolved.
pub const CONFIG_FAILURE: i32 = 2;

/// No stack config file matched the requested stack.
pub const STACK_FAILURE: i32 = 3;

/// A workflow definition was invalid or one of its steps failed.
pub const WORKFLOW_FAILURE: i32 = 4;
