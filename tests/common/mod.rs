#![allow(dead_code)]

use image::RgbaImage;
use qrgen::ECLevel;

/// Decoded symbol as reported by `rqrr`.
#[derive(Debug)]
pub struct Decoded {
    pub version: usize,
    pub ec_level: ECLevel,
    pub mask: u8,
    pub data: String,
}

/// Detects and decodes the single symbol in `img`.
pub fn decode(img: &RgbaImage) -> Result<Decoded, String> {
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(img.width() as usize, img.height() as usize, |x, y| {
            let px = img.get_pixel(x as u32, y as u32);
            ((px[0] as u32 + px[1] as u32 + px[2] as u32) / 3) as u8
        });
    let grids = prepared.detect_grids();
    if grids.len() != 1 {
        return Err(format!("Expected one symbol, found {}", grids.len()));
    }
    let (meta, data) = grids[0].decode().map_err(|e| e.to_string())?;

    // Format information stores L, M, Q, H as 01, 00, 11, 10
    let ec_level = match meta.ecc_level {
        1 => ECLevel::L,
        0 => ECLevel::M,
        3 => ECLevel::Q,
        2 => ECLevel::H,
        other => return Err(format!("Invalid error correction bits {other}")),
    };

    Ok(Decoded { version: meta.version.0, ec_level, mask: meta.mask as u8, data })
}

/// Samples the centre pixel of every module. `qz` is the quiet zone in
/// modules, `module_size` the side of a module in pixels.
pub fn sample(img: &RgbaImage, qz: usize, module_size: u32) -> Vec<Vec<bool>> {
    let w = (img.width() / module_size) as usize - 2 * qz;
    let centre = |i: usize| (i + qz) as u32 * module_size + module_size / 2;
    (0..w)
        .map(|r| {
            (0..w)
                .map(|c| {
                    let px = img.get_pixel(centre(c), centre(r));
                    (px[0] as u32 + px[1] as u32 + px[2] as u32) < 384
                })
                .collect()
        })
        .collect()
}
