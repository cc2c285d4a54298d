use super::galois::G;
use super::{Block, MAX_BLOCK_SIZE};

const MAX_EC_SIZE: usize = 64;

// Rectifier
//------------------------------------------------------------------------------

impl Block {
    /// Corrects errors in place. Returns the data codewords, or `None` when
    /// the block has more errors than its ecc can restore.
    pub fn rectify(&mut self) -> Option<&[u8]> {
        // Compute syndromes
        let synd = match self.syndromes() {
            Ok(()) => return Some(self.data()),
            Err(s) => s,
        };

        // Error locator polynomial
        let sig = self.berlekamp_massey(&synd);
        let err_loc = self.chien_search(&sig);

        // Sigma derivative
        let mut dsig = [G(0); MAX_EC_SIZE];
        for i in (1..MAX_EC_SIZE).step_by(2) {
            dsig[i - 1] = sig[i];
        }

        // Error evaluator
        let omg = self.omega(&synd, &sig);

        // Error magnitude
        let err_mag = self.forney(&omg, &dsig, &err_loc);

        // Rectify errors by XORing data with magnitude
        for (i, &g) in err_mag.iter().take(self.len).enumerate() {
            self.data[i] = (G(self.data[i]) + g).into();
        }

        match self.syndromes() {
            Ok(()) => Some(self.data()),
            Err(_) => None,
        }
    }

    fn syndromes(&self) -> Result<(), [G; MAX_EC_SIZE]> {
        let mut synd = [G(0); MAX_EC_SIZE];
        let gdata = self.full().iter().map(|&b| G(b)).collect::<Vec<_>>();
        for (i, s) in synd.iter_mut().take(self.ec_len()).enumerate() {
            *s = eval_poly(gdata.iter().rev(), G::gen_pow(i));
        }

        if synd.iter().all(|&s| s.0 == 0) {
            Ok(())
        } else {
            Err(synd)
        }
    }

    // Sigma polynomial
    fn berlekamp_massey(&self, synd: &[G]) -> [G; MAX_EC_SIZE] {
        let mut l = 0usize;
        let mut m = 1usize;
        let mut b = G(1);
        let mut cx = [G(0); MAX_EC_SIZE];
        let mut bx = [G(0); MAX_EC_SIZE];
        cx[0] = G(1);
        bx[0] = G(1);

        for n in 0..self.ec_len() {
            // Discrepancy
            let mut d = synd[n];
            for i in 1..=l {
                d += cx[i] * synd[n - i];
            }

            if d.0 == 0 {
                m += 1;
                continue;
            }

            let tx = cx;
            let scale = d / b;
            for i in 0..MAX_EC_SIZE - m {
                cx[i + m] += scale * bx[i];
            }

            if 2 * l <= n {
                bx = tx;
                l = n + 1 - l;
                b = d;
                m = 1;
            } else {
                m += 1;
            }
        }
        cx
    }

    // Marks positions whose inverse locator is a root of sigma
    fn chien_search(&self, sig: &[G; MAX_EC_SIZE]) -> [bool; MAX_BLOCK_SIZE] {
        let mut err_loc = [false; MAX_BLOCK_SIZE];
        for (i, e) in err_loc[..self.len].iter_mut().rev().enumerate() {
            *e = eval_poly(sig.iter(), G::gen_pow(255 - i)).0 == 0;
        }
        err_loc
    }

    // Error evaluator polynomial
    fn omega(&self, synd: &[G; MAX_EC_SIZE], sig: &[G; MAX_EC_SIZE]) -> [G; MAX_EC_SIZE] {
        let t = self.ec_len() - 1;
        let mut omg = [G(0); MAX_EC_SIZE];
        for i in 0..t {
            for j in 0..t - i {
                omg[i + j] += synd[i + 1] * sig[j];
            }
        }
        omg
    }

    fn forney(
        &self,
        omg: &[G; MAX_EC_SIZE],
        dsig: &[G; MAX_EC_SIZE],
        err_loc: &[bool; MAX_BLOCK_SIZE],
    ) -> [G; MAX_BLOCK_SIZE] {
        let mut mag = [G(0); MAX_BLOCK_SIZE];
        for (i, &is_err) in err_loc[..self.len].iter().rev().enumerate() {
            if !is_err {
                continue;
            }
            let xinv = G::gen_pow(255 - i);
            let omg_x = eval_poly(omg.iter(), xinv);
            let sig_x = eval_poly(dsig.iter(), xinv);
            if sig_x.0 == 0 {
                continue;
            }
            mag[self.len - 1 - i] += omg_x / sig_x;
        }
        mag
    }
}

fn eval_poly<'a>(poly: impl Iterator<Item = &'a G>, x: G) -> G {
    let mut res = G(0);
    let mut xpow = G(1);
    for &coeff in poly {
        res += coeff * xpow;
        xpow *= x;
    }
    res
}

#[cfg(test)]
mod ec_rectifier_tests {
    use rand::rngs::StdRng;
    use rand::seq::index::sample;
    use rand::{Rng, SeedableRng};
    use test_case::test_case;

    use super::Block;
    use crate::{ECLevel, Version};

    #[test_case(&[32, 91, 11, 45, 89, 123, 77, 44, 56, 99, 202], &[32, 91, 11, 45, 89, 46, 77, 44, 56, 99, 202])]
    #[test_case(&[32, 91, 11, 45, 89, 123, 77, 44, 56, 99, 202], &[32, 91, 11, 45, 89, 46, 77, 44, 56, 99, 249])]
    fn test_rectifier(data: &[u8], bad: &[u8]) {
        let mut blk = Block::new(data, 15);
        blk.full_mut()[..11].copy_from_slice(bad);
        let rect = blk.rectify().map(|d| d.to_vec());
        assert_eq!(rect.as_deref(), Some(data));
    }

    #[test]
    fn test_rectifier_clean_block() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8];
        let mut blk = Block::new(&data, 18);
        assert_eq!(blk.rectify(), Some(&data[..]));
    }

    #[test]
    fn test_rectifier_too_many_errors() {
        let data = [32, 91, 11, 45, 89, 123, 77, 44, 56, 99, 202];
        let bad = [138, 91, 161, 45, 243, 46, 231, 44, 146, 99, 202];
        let mut blk = Block::new(&data, 15);
        blk.full_mut()[..11].copy_from_slice(&bad);
        assert_ne!(blk.rectify(), Some(&data[..]));
    }

    fn corrupt(blk: &mut Block, count: usize, rng: &mut StdRng) {
        let len = blk.len();
        for pos in sample(rng, len, count).iter() {
            blk.full_mut()[pos] ^= rng.random_range(1..=255u8);
        }
    }

    #[test]
    fn test_correctable_errors_for_every_block_shape() {
        let mut rng = StdRng::seed_from_u64(0x5152);
        for ver in Version::all() {
            for ecl in ECLevel::ALL {
                let (size1, _, size2, _) = ver.data_codewords_per_block(ecl);
                let ec_len = ver.ecc_per_block(ecl);
                for size in [size1, size2].into_iter().filter(|&s| s > 0) {
                    let data = (0..size).map(|_| rng.random::<u8>()).collect::<Vec<_>>();
                    let mut blk = Block::new(&data, size + ec_len);
                    corrupt(&mut blk, ec_len / 2, &mut rng);
                    let rect = blk.rectify().map(|d| d.to_vec());
                    assert_eq!(rect, Some(data), "Version {ver}, {ecl:?}, block size {size}");
                }
            }
        }
    }

    #[test]
    fn test_one_error_beyond_capacity_is_not_guaranteed() {
        let mut rng = StdRng::seed_from_u64(0x4252);
        let ver = Version::new(5).unwrap();
        let (size, _, _, _) = ver.data_codewords_per_block(ECLevel::Q);
        let ec_len = ver.ecc_per_block(ECLevel::Q);
        let recovered = (0..32)
            .filter(|_| {
                let data = (0..size).map(|_| rng.random::<u8>()).collect::<Vec<_>>();
                let mut blk = Block::new(&data, size + ec_len);
                corrupt(&mut blk, ec_len / 2 + 1, &mut rng);
                blk.rectify() == Some(&data[..])
            })
            .count();
        assert!(recovered < 32);
    }
}
