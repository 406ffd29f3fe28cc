//! Standard Unix exit codes for the anchor CLI.
//!
//! These codes follow the BSD convention where possible. Success is a plain return from `main`.

/// Command line usage error - unknown anchor name, invalid name, unsupported shell, etc.
pub const USAGE: i32 = 64;

/// The anchor store could not be read, parsed or written
pub const IOERR: i32 = 74;
