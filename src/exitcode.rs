//! Standard exit codes (BSD sysexits.h compatible)
//!
//! Every finished exploration exits 0, whichever way it ended.

/// Data format error (invalid map file or topology)
pub const DATAERR: i32 = 65;

/// Cannot open input (map file missing)
pub const NOINPUT: i32 = 66;

/// System error (out of memory while building the map)
pub const OSERR: i32 = 71;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
