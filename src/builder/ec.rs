use crate::common::{
    ec::{generator_polynomial, Block},
    error::{QRError, QRResult},
    metadata::{ECLevel, Version},
};

// ECC: Error Correction Codeword generator
pub(crate) fn ecc(data: &[u8], version: Version, ec_level: ECLevel) -> QRResult<Vec<Block>> {
    let data_blocks = blockify(data, version, ec_level)?;

    // Every block of a symbol carries the same number of ecc codewords
    let gen_poly = generator_polynomial(version.ecc_per_block(ec_level));
    Ok(data_blocks.iter().map(|b| Block::with_generator(b, &gen_poly)).collect())
}

/// Splits data codewords into group 1 blocks followed by the one codeword
/// longer group 2 blocks.
pub(crate) fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> QRResult<Vec<&[u8]>> {
    let (block1_size, block1_count, block2_size, block2_count) =
        version.data_codewords_per_block(ec_level);

    let total_blocks = block1_count + block2_count;
    let total_block1_size = block1_size * block1_count;
    let total_size = total_block1_size + block2_size * block2_count;

    if total_size != data.len() {
        return Err(QRError::InvariantViolation {
            what: "data codeword count",
            expected: total_size,
            found: data.len(),
        });
    }

    let mut data_blocks = Vec::with_capacity(total_blocks);
    data_blocks.extend(data[..total_block1_size].chunks(block1_size));
    if block2_size > 0 {
        data_blocks.extend(data[total_block1_size..].chunks(block2_size));
    }
    Ok(data_blocks)
}

/// Number of erroneous codewords the symbol can restore. Versions 1 to 3
/// reserve a few ecc codewords for misdecode protection.
pub fn error_correction_capacity(version: Version, ec_level: ECLevel) -> usize {
    let p = match (*version, ec_level) {
        (1, ECLevel::L) => 3,
        (2, ECLevel::L) | (1, ECLevel::M) => 2,
        (1, _) | (3, ECLevel::L) => 1,
        _ => 0,
    };

    let ec_bytes = version.ecc_per_block(ec_level) * version.block_count(ec_level);
    (ec_bytes - p) / 2
}
