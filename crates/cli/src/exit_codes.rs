//! CLI Exit Code Registry
//!
//! This is the single source of truth for all `trolley` exit codes.
//! Exit codes are part of the shell contract — CI scripts rely on them.
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! | 0    | Success, cart reconciled clean           |
//! | 1    | General error (unspecified)              |
//! | 2    | CLI usage error (bad args)               |
//! | 3    | Reconciliation found mismatches          |
//! | 4    | Invalid config or fixture data           |
//! | 5    | Cart action failed (gateway step)        |
//! | 6    | Input/IO failure                         |

/// Success - command completed and the cart reconciled clean.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
#[allow(dead_code)]
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options. Clap exits with
/// this on its own for parse failures.
#[allow(dead_code)]
pub const EXIT_USAGE: u8 = 2;

/// Reconciliation found mismatches (like `diff(1)`, nonzero means "differs").
pub const EXIT_MISMATCH: u8 = 3;

/// Config or fixture data rejected before the run started.
pub const EXIT_INVALID_CONFIG: u8 = 4;

/// A storefront gateway step failed mid-run.
pub const EXIT_CART_ACTION: u8 = 5;

/// File read/write failure.
pub const EXIT_IO: u8 = 6;
