//! # qrgen
//!
//! A QR code generator: data encoding, Reed-Solomon error correction, module
//! placement, masking and PNG rendering.
//!
//! ## Features
//!
//! - **Optimal segmentation**: Numeric, alphanumeric and byte segments are mixed to minimise the bit stream
//! - **Automatic sizing**: Picks the smallest of the 40 versions that fits the data
//! - **Reed-Solomon error correction**: Four levels (L, M, Q, H)
//! - **Mask selection**: All eight masks are scored and the lowest penalty wins
//! - **Rendering**: RGBA images and PNG bytes with configurable colors, quiet zone and module size
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrgen::ECLevel;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // PNG bytes of a 256 x 256 image with the symbol centred
//! let png = qrgen::encode(b"https://example.org", ECLevel::M, 256)?;
//! assert_eq!(&png[1..4], b"PNG");
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use image::Rgba;
//! use qrgen::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new(b"Hello, World!")
//!     .version(Version::new(2)?)       // If not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)            // If not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)      // If not provided, finds best mask based on penalty score
//!     .quiet_zone(2)                   // If not provided, defaults to 4 modules
//!     .build()?;
//!
//! let img = qr
//!     .render()
//!     .module_size(4)
//!     .foreground(Rgba([20, 40, 120, 255]))
//!     .background(Rgba([250, 250, 240, 255]))
//!     .to_image()?;
//! assert_eq!(img.width(), (25 + 2 * 2) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module, clippy::suspicious_arithmetic_impl)]

pub mod builder;
pub(crate) mod common;
pub mod render;

use std::path::Path;

use image::Rgba;

pub use builder::{error_correction_capacity, Module, QRBuilder, QR};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};
pub use render::Renderer;

// Convenience functions
//------------------------------------------------------------------------------

/// Builds a symbol for `data` and returns it as a `size` x `size` PNG, the
/// symbol centred on a white background. Symbols wider than `size` at one
/// pixel per module produce a larger image.
pub fn encode(data: &[u8], ecl: ECLevel, size: u32) -> QRResult<Vec<u8>> {
    let qr = QRBuilder::new(data).ec_level(ecl).build()?;
    qr.render().fit_width(size).to_png()
}

/// Same as [`encode`] but writes the PNG to `path`.
pub fn write_file(data: &[u8], ecl: ECLevel, size: u32, path: impl AsRef<Path>) -> QRResult<()> {
    let qr = QRBuilder::new(data).ec_level(ecl).build()?;
    qr.render().fit_width(size).save(path)
}

/// Same as [`write_file`] with custom background and foreground colors.
pub fn write_color_file(
    data: &[u8],
    ecl: ECLevel,
    size: u32,
    background: Rgba<u8>,
    foreground: Rgba<u8>,
    path: impl AsRef<Path>,
) -> QRResult<()> {
    let qr = QRBuilder::new(data).ec_level(ecl).build()?;
    qr.render().fit_width(size).background(background).foreground(foreground).save(path)
}
