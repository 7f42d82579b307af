//! Error types reported by the `protocol` layer.
//!
//! The lower layers (`field`, `scalar`, `point`) never fail: decode
//! functions there return a constant-time success [`crate::consttime::Mask`]
//! alongside a (possibly garbage) value. `protocol` translates those masks
//! into this small `enum` at the API boundary.

use std::fmt;

/// The three ways a GLS254 protocol operation can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlsError {
    /// A scalar encoding did not represent a value in `[0, r)`.
    MalformedScalar,
    /// A point encoding did not decode to a valid curve point.
    MalformedPoint,
    /// A signature failed to verify against the given public key and data.
    VerificationFailure,
}

impl fmt::Display for GlsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            GlsError::MalformedScalar => "malformed scalar encoding",
            GlsError::MalformedPoint => "malformed point encoding",
            GlsError::VerificationFailure => "signature verification failed",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for GlsError {}
