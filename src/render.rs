use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use log::debug;

use crate::builder::QR;
use crate::common::error::{QRError, QRResult};

// Renderer
//------------------------------------------------------------------------------

/// Rasterizes a [`QR`] into an RGBA image.
///
/// Each module becomes a `module_size` x `module_size` square. The quiet zone
/// defaults to the one stored in the symbol and is left out entirely when the
/// border is disabled. After [`Renderer::fit_width`] the image is exactly the
/// requested size, with the symbol centred on the background.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    qr: &'a QR,
    quiet_zone: usize,
    border: bool,
    foreground: Rgba<u8>,
    background: Rgba<u8>,
    module_size: u32,
    fit: Option<u32>,
}

impl<'a> Renderer<'a> {
    pub fn new(qr: &'a QR) -> Self {
        Self {
            qr,
            quiet_zone: qr.quiet_zone(),
            border: true,
            foreground: BLACK,
            background: WHITE,
            module_size: DEFAULT_MODULE_SIZE,
            fit: None,
        }
    }

    pub fn quiet_zone(&mut self, quiet_zone: usize) -> &mut Self {
        self.quiet_zone = quiet_zone;
        self
    }

    pub fn border(&mut self, border: bool) -> &mut Self {
        self.border = border;
        self
    }

    pub fn foreground(&mut self, color: Rgba<u8>) -> &mut Self {
        self.foreground = color;
        self
    }

    pub fn background(&mut self, color: Rgba<u8>) -> &mut Self {
        self.background = color;
        self
    }

    /// Pixels per module. Overrides an earlier [`Renderer::fit_width`].
    pub fn module_size(&mut self, module_size: u32) -> &mut Self {
        self.module_size = module_size;
        self.fit = None;
        self
    }

    /// Renders a `px` x `px` image. The module size is the largest one whose
    /// symbol fits in `px`, never going below 1 pixel per module, so a
    /// symbol wider than `px` grows the image instead. A `px` of 0 yields an
    /// invalid module size.
    pub fn fit_width(&mut self, px: u32) -> &mut Self {
        self.fit = Some(px);
        self
    }

    fn effective_quiet_zone(&self) -> usize {
        if self.border {
            self.quiet_zone
        } else {
            0
        }
    }

    fn side_in_modules(&self) -> Option<u32> {
        let side = self.effective_quiet_zone().checked_mul(2)?.checked_add(self.qr.width())?;
        u32::try_from(side).ok()
    }

    /// Pixels per module after resolving [`Renderer::fit_width`].
    pub fn pixels_per_module(&self) -> u32 {
        match (self.fit, self.side_in_modules()) {
            (Some(0), _) => 0,
            (Some(px), Some(side)) => (px / side).max(1),
            (Some(_), None) => 1,
            (None, _) => self.module_size,
        }
    }

    // Side of the symbol and its quiet zone in pixels
    fn symbol_side(&self) -> QRResult<u32> {
        let ms = self.pixels_per_module();
        self.side_in_modules()
            .and_then(|side| side.checked_mul(ms))
            .ok_or(QRError::InvalidModuleSize(ms))
    }

    /// Side length of the rendered image in pixels.
    pub fn side(&self) -> QRResult<u32> {
        let symbol = self.symbol_side()?;
        Ok(self.fit.map_or(symbol, |px| symbol.max(px)))
    }

    pub fn to_image(&self) -> QRResult<RgbaImage> {
        let ms = self.pixels_per_module();
        if ms == 0 {
            return Err(QRError::InvalidModuleSize(ms));
        }

        let side = self.side()?;
        // RGBA buffer length must be addressable
        (side as usize)
            .checked_mul(side as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(QRError::InvalidModuleSize(ms))?;

        let offset = (side - self.symbol_side()?) / 2;
        let qz = self.effective_quiet_zone() as u32;
        let w = self.qr.width() as i16;
        debug!("Rendering {} at {side}x{side} px, {ms} px per module", self.qr.metadata());

        let mut canvas = RgbaImage::from_pixel(side, side, self.background);
        for r in 0..w {
            for c in 0..w {
                if !self.qr.is_dark(r, c) {
                    continue;
                }
                let y0 = offset + (r as u32 + qz) * ms;
                let x0 = offset + (c as u32 + qz) * ms;
                for y in y0..y0 + ms {
                    for x in x0..x0 + ms {
                        canvas.put_pixel(x, y, self.foreground);
                    }
                }
            }
        }

        Ok(canvas)
    }

    /// Encodes the rendered image as PNG.
    pub fn to_png(&self) -> QRResult<Vec<u8>> {
        let img = self.to_image()?;
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    /// Writes the rendered image to `path` as PNG, whatever its extension.
    pub fn save(&self, path: impl AsRef<Path>) -> QRResult<()> {
        let img = self.to_image()?;
        img.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

impl QR {
    pub fn render(&self) -> Renderer<'_> {
        Renderer::new(self)
    }

    /// Black on white image with the symbol's quiet zone.
    pub fn to_image(&self, module_size: u32) -> QRResult<RgbaImage> {
        Renderer::new(self).module_size(module_size).to_image()
    }
}


// Global constants
//------------------------------------------------------------------------------

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub const DEFAULT_MODULE_SIZE: u32 = 8;
