// Error
//------------------------------------------------------------------------------

/// Errors raised while building or rendering a QR symbol.
#[derive(Debug, thiserror::Error)]
pub enum QRError {
    #[error("empty data")]
    EmptyData,

    /// Data doesn't fit in the requested (or largest) version at the requested
    /// error correction level.
    #[error("data too long for the requested error correction level")]
    CapacityExceeded,

    #[error("invalid version {0}, expected 1 to 40")]
    InvalidVersion(usize),

    #[error("invalid error correction level")]
    InvalidECLevel,

    #[error("invalid mask pattern {0}, expected 0 to 7")]
    InvalidMaskPattern(u8),

    #[error("invalid module size {0}, expected a positive pixel count")]
    InvalidModuleSize(u32),

    /// Table data or placement logic disagree with each other. Never expected
    /// for valid inputs.
    #[error("internal invariant violated: {what} (expected {expected}, found {found})")]
    InvariantViolation { what: &'static str, expected: usize, found: usize },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type QRResult<T> = Result<T, QRError>;
