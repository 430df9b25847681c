//! Render error types.

use thiserror::Error;
use wasmrender_types::Signature;

/// Errors that abort a render.
///
/// None of these are recoverable: they indicate either a malformed module
/// graph or a value the binary format cannot represent.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A function name was referenced but never assigned an index.
    #[error("unresolved function: {0}")]
    UnresolvedFunction(String),

    /// A signature was looked up that was never registered.
    #[error("unregistered signature: {0}")]
    UnregisteredSignature(Signature),

    /// A count, length or index does not fit an unsigned 32-bit LEB value.
    #[error("{what} out of range: {value}")]
    ValueOutOfRange { what: &'static str, value: u64 },

    /// Strings in the binary are written as raw ASCII.
    #[error("non-ASCII string: {0:?}")]
    NonAsciiString(String),

    /// Only revisions 0xB and 0xC are supported.
    #[error("unsupported binary version: {0:#x}")]
    UnsupportedVersion(u32),

    /// Render options could not be parsed.
    #[error("invalid render options: {0}")]
    Config(String),
}

/// Render result type alias.
pub type RenderResult<T> = Result<T, RenderError>;

/// Narrow a count or index to the `u32` every binary field is limited to.
pub fn to_u32(what: &'static str, value: usize) -> RenderResult<u32> {
    u32::try_from(value).map_err(|_| RenderError::ValueOutOfRange {
        what,
        value: value as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_u32_accepts_u32_range() {
        assert_eq!(to_u32("index", 0).unwrap(), 0);
        assert_eq!(to_u32("index", u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_to_u32_rejects_overflow() {
        let err = to_u32("signature index", u32::MAX as usize + 1).unwrap_err();
        assert!(matches!(
            err,
            RenderError::ValueOutOfRange {
                what: "signature index",
                value: 4_294_967_296
            }
        ));
    }
}
