//! The error taxonomy shared by every crate.
//!
//! Each crate defines its own error enum; every variant maps to one of the
//! four kinds below so callers can decide whether to retry, report, or
//! abort without matching on crate-specific variants.

use serde::{Deserialize, Serialize};

/// How a failed operation should be treated by its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad input (coordinates, unknown key, out-of-season crop). Nothing was
    /// changed; retry with corrected input.
    Validation,
    /// The target is busy or taken (occupied plot, adopted name, day in
    /// progress). Nothing was changed; retry later.
    Conflict,
    /// Not enough coins or items. Nothing was changed.
    InsufficientResource,
    /// The simulation broke its own consistency contract. Fatal.
    InvariantViolation,
}

impl ErrorKind {
    /// Whether the caller can reasonably try again.
    pub const fn is_recoverable(self) -> bool {
        !matches!(self, Self::InvariantViolation)
    }
}
