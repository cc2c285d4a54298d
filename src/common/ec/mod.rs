mod block;
#[cfg(test)]
mod decoder;
mod galois;

pub(crate) use block::*;
pub(crate) use galois::generator_polynomial;

pub const MAX_BLOCK_SIZE: usize = 256;
