//! Standard exit codes for CLI operations
//!
//! Scripted callers branch on these instead of string-matching stderr; in
//! particular NOT_FOUND is the "treat as absent" signal.

#![allow(dead_code)]

/// Success - operation completed without errors
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Validation error - descriptor or configuration failed structural checks
pub const VALIDATION_ERROR: i32 = 2;

/// Not found - the release is absent or terminally deleted
pub const NOT_FOUND: i32 = 3;

/// Deploy error - the release exists but is not successfully deployed
pub const DEPLOY_ERROR: i32 = 4;

/// Normalization error - the override payload is not valid structured text
pub const NORMALIZE_ERROR: i32 = 5;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 6;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;
