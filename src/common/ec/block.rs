#[cfg(test)]
use super::galois::generator_polynomial;
use super::galois::G;
use super::MAX_BLOCK_SIZE;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Block {
    pub data: [u8; MAX_BLOCK_SIZE],
    // Block length
    pub len: usize,
    // Data length
    pub dlen: usize,
}

impl Block {
    #[cfg(test)]
    pub fn new(raw: &[u8], len: usize) -> Self {
        let gen_poly = generator_polynomial(len - raw.len());
        Self::with_generator(raw, &gen_poly)
    }

    /// Same as `new` but reuses a generator polynomial shared across blocks of
    /// equal ecc length.
    pub fn with_generator(raw: &[u8], gen_poly: &[G]) -> Self {
        let dlen = raw.len();
        let len = dlen + gen_poly.len();
        debug_assert!(len <= MAX_BLOCK_SIZE, "Block too long: {len}");

        let mut data = [0u8; MAX_BLOCK_SIZE];
        data[..dlen].copy_from_slice(raw);
        let mut block = Self { data, len, dlen };
        block.compute_ecc(gen_poly);
        block
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn ec_len(&self) -> usize {
        self.len - self.dlen
    }

    #[cfg(test)]
    pub fn full(&self) -> &[u8] {
        &self.data[..self.len]
    }

    #[cfg(test)]
    pub fn full_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.len]
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..self.dlen]
    }

    pub fn ecc(&self) -> &[u8] {
        &self.data[self.dlen..self.len]
    }

    // Performs polynomial long division with data polynomial(num) shifted by
    // the ecc length and generator polynomial(den). The coefficients of the
    // remainder are the ecc.
    fn compute_ecc(&mut self, gen_poly: &[G]) {
        let mut rem = [0u8; MAX_BLOCK_SIZE];
        rem[..self.dlen].copy_from_slice(&self.data[..self.dlen]);

        for i in 0..self.dlen {
            let lead_coeff = G(rem[i]);
            if lead_coeff.0 == 0 {
                continue;
            }
            for (u, &g) in rem[i + 1..self.len].iter_mut().zip(gen_poly.iter()) {
                *u ^= (g * lead_coeff).0;
            }
        }

        self.data[self.dlen..self.len].copy_from_slice(&rem[self.dlen..self.len]);
    }
}

#[cfg(test)]
mod block_tests {
    use super::Block;

    #[test]
    fn test_poly_mod_1() {
        let data = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let blk = Block::new(data, data.len() + 10);
        assert_eq!(blk.ecc(), b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
        assert_eq!(blk.data(), data);
        assert_eq!(blk.ec_len(), 10);
    }

    #[test]
    fn test_poly_mod_2() {
        let data = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec";
        let blk = Block::new(data, data.len() + 13);
        assert_eq!(blk.ecc(), b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_poly_mod_3() {
        let data = b"CUF\x86W&U\xc2w2\x06\x12\x06g&";
        let blk = Block::new(data, data.len() + 18);
        assert_eq!(blk.ecc(), b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
        assert_eq!(blk.full().len(), blk.len());
    }

    #[test]
    fn test_all_zero_data() {
        let blk = Block::new(&[0; 9], 26);
        assert!(blk.ecc().iter().all(|&b| b == 0));
    }
}
