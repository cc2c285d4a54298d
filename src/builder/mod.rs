mod ec;
mod qr;

pub use ec::error_correction_capacity;
pub use qr::{Module, DEFAULT_QUIET_ZONE, QR};

use std::ops::Deref;

use log::debug;

use crate::common::{
    bit_utils::BitStream,
    codec::{encode, encode_with_version},
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

/// Configures and builds a [`QR`] symbol.
///
/// ```
/// use qrgen::{ECLevel, QRBuilder};
///
/// let qr = QRBuilder::new(b"https://example.org").ec_level(ECLevel::Q).build().unwrap();
/// assert_eq!(*qr.version(), 2);
/// ```
pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
    quiet_zone: usize,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            version: None,
            ec_level: ECLevel::M,
            mask: None,
            quiet_zone: DEFAULT_QUIET_ZONE,
        }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    /// Forces a version instead of picking the smallest one that fits.
    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Forces a mask pattern and skips penalty evaluation.
    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    /// Quiet zone width in modules, 4 by default.
    pub fn quiet_zone(&mut self, quiet_zone: usize) -> &mut Self {
        self.quiet_zone = quiet_zone;
        self
    }

    pub fn metadata(&self) -> String {
        let ver = self.version.map_or("None".to_string(), |v| v.to_string());
        let mask = self.mask.map_or("None".to_string(), |m| m.to_string());
        format!(
            "{{ Version: {ver}, Ec level: {:?}, Mask: {mask}, Quiet zone: {} }}",
            self.ec_level, self.quiet_zone
        )
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}", self.metadata());
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }

        // Encode data optimally
        let (encoded_data, version) = match self.version {
            Some(v) => (encode_with_version(self.data, v, self.ec_level)?, v),
            None => encode(self.data, self.ec_level)?,
        };

        // Compute error correction codewords, then interleave data & ecc
        let payload = Self::construct_payload(&encoded_data, version, self.ec_level)?;

        let mut qr = QR::new(version, self.ec_level);
        qr.set_quiet_zone(self.quiet_zone);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(&payload)?;

        let mask = match self.mask {
            Some(m) => {
                qr.apply_mask(m);
                m
            }
            None => apply_best_mask(&mut qr),
        };

        let total_modules = version.width() * version.width();
        let dark_modules = qr.count_dark_modules();
        debug!(
            "Built {}: data {} bytes, capacity {} codewords, error capacity {}, mask {}, dark modules {}%",
            qr.metadata(),
            self.data.len(),
            version.data_codewords(self.ec_level),
            error_correction_capacity(version, self.ec_level),
            *mask,
            dark_modules * 100 / total_modules
        );

        Ok(qr)
    }

    fn construct_payload(data: &BitStream, version: Version, ec_level: ECLevel) -> QRResult<BitStream> {
        let blocks = ec::ecc(data.data(), version, ec_level)?;
        let data_blocks = blocks.iter().map(|b| b.data()).collect::<Vec<_>>();
        let ecc_blocks = blocks.iter().map(|b| b.ecc()).collect::<Vec<_>>();

        let total_codewords = version.total_codewords();
        let mut payload = BitStream::new(total_codewords << 3);
        payload.extend(&Self::interleave(&data_blocks));
        payload.extend(&Self::interleave(&ecc_blocks));

        if payload.len() != payload.capacity() {
            return Err(QRError::InvariantViolation {
                what: "total codewords",
                expected: total_codewords,
                found: payload.len() >> 3,
            });
        }
        Ok(payload)
    }

    /// Takes the i-th element of every block in turn. Blocks that run out
    /// early are skipped.
    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}
