pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use std::mem::swap;

    use log::{debug, trace};

    use super::writer::{pad_remaining_capacity, push_segment, push_terminator};
    use crate::common::bit_utils::BitStream;
    use crate::common::codec::{Mode, Segment, MODES};
    use crate::common::error::{QRError, QRResult};
    use crate::common::metadata::{ECLevel, Version};

    /// Encodes data into the smallest version that fits it at the given error
    /// correction level. The stream is padded to the full data capacity.
    pub fn encode(data: &[u8], ecl: ECLevel) -> QRResult<(BitStream, Version)> {
        if data.is_empty() {
            return Err(QRError::EmptyData);
        }

        let (ver, segs) = find_optimal_version_and_segments(data, ecl)?;
        debug!("Selected version {ver} with {} segment(s) at {ecl:?}", segs.len());
        Ok((write_segments(segs, ver, ecl)?, ver))
    }

    /// Encodes data into the given version, failing with `CapacityExceeded`
    /// when it doesn't fit.
    pub fn encode_with_version(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
        if data.is_empty() {
            return Err(QRError::EmptyData);
        }

        let bcap = ver.data_bit_capacity(ecl);
        let segs = compute_optimal_segments(data, ver);
        let sz: usize = segs.iter().map(|s| s.bit_len()).sum();
        if sz > bcap {
            debug!("{sz} bits don't fit version {ver} at {ecl:?}, capacity {bcap} bits");
            return Err(QRError::CapacityExceeded);
        }
        write_segments(segs, ver, ecl)
    }

    fn write_segments(segs: Vec<Segment>, ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
        let bcap = ver.data_bit_capacity(ecl);
        let mut bs = BitStream::new(bcap);
        for seg in segs {
            // Unreachable within the capacity of any version, kept as a guard
            if seg.data.len() >= 1 << seg.len_bits {
                return Err(QRError::InvariantViolation {
                    what: "segment character count",
                    expected: (1 << seg.len_bits) - 1,
                    found: seg.data.len(),
                });
            }
            trace!("Pushing {:?} segment of {} chars", seg.mode, seg.data.len());
            push_segment(seg, &mut bs);
        }

        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        Ok(bs)
    }

    fn find_optimal_version_and_segments(
        data: &[u8],
        ecl: ECLevel,
    ) -> QRResult<(Version, Vec<Segment>)> {
        let mut segs = vec![];
        let mut sz = 0;
        for ver in Version::all() {
            let bcap = ver.data_bit_capacity(ecl);
            // Char count widths change only at these versions
            if matches!(*ver, 1 | 10 | 27) {
                segs = compute_optimal_segments(data, ver);
                sz = segs.iter().map(|s| s.bit_len()).sum();
            }
            if sz <= bcap {
                return Ok((ver, segs));
            }
        }
        debug!("{sz} bits exceed the capacity of every version at {ecl:?}");
        Err(QRError::CapacityExceeded)
    }

    // Dynamic programming over per char costs, in sixths of a bit so that
    // numeric and alphanumeric chars have integral costs
    fn compute_optimal_segments(data: &[u8], ver: Version) -> Vec<Segment> {
        debug_assert!(!data.is_empty(), "Empty data");

        let len = data.len();
        let mut prev_cost = [0usize; 3];
        MODES.iter().enumerate().for_each(|(i, &m)| prev_cost[i] = (4 + ver.char_cnt_bits(m)) * 6);
        let mut cur_cost = [usize::MAX; 3];
        let mut min_path = vec![[usize::MAX; 3]; len];
        for (i, b) in data.iter().enumerate() {
            for (j, to_mode) in MODES.iter().enumerate() {
                if !to_mode.contains(*b) {
                    continue;
                }
                let encoded_char_size = match to_mode {
                    Mode::Numeric => 20,
                    Mode::Alphanumeric => 33,
                    Mode::Byte => 48,
                };
                for (k, from_mode) in MODES.iter().enumerate() {
                    if prev_cost[k] == usize::MAX {
                        continue;
                    }
                    let mut cost = 0;
                    if to_mode != from_mode {
                        cost += prev_cost[k].div_ceil(6) * 6;
                        cost += (4 + ver.char_cnt_bits(*to_mode)) * 6;
                    } else {
                        cost += prev_cost[k];
                    }
                    cost += encoded_char_size;
                    if cost < cur_cost[j] {
                        cur_cost[j] = cost;
                        min_path[i][j] = k;
                    }
                }
            }
            swap(&mut prev_cost, &mut cur_cost);
            cur_cost.fill(usize::MAX);
        }

        let char_modes = trace_optimal_modes(min_path, prev_cost);
        build_segments(ver, char_modes, data)
    }

    // Backtrack min_path and identify optimal char mode
    fn trace_optimal_modes(min_path: Vec<[usize; 3]>, prev_cost: [usize; 3]) -> Vec<Mode> {
        let len = min_path.len();
        let mut mode_index = 0;
        for i in 1..3 {
            if prev_cost[i] < prev_cost[mode_index] {
                mode_index = i;
            }
        }
        let mut modes = (0..len)
            .rev()
            .scan(mode_index, |mi, i| {
                let old_mi = *mi;
                *mi = min_path[i][*mi];
                Some(MODES[old_mi])
            })
            .collect::<Vec<_>>();
        modes.reverse();
        modes
    }

    // Groups consecutive chars of equal mode into segments
    fn build_segments(ver: Version, char_modes: Vec<Mode>, data: &[u8]) -> Vec<Segment> {
        let mut segs: Vec<Segment> = vec![];
        let mut seg_start = 0;
        let mut seg_mode = char_modes[0];
        for (i, &m) in char_modes.iter().enumerate().skip(1) {
            if seg_mode != m {
                let len_bits = ver.char_cnt_bits(seg_mode);
                segs.push(Segment::new(seg_mode, len_bits, &data[seg_start..i]));
                seg_mode = m;
                seg_start = i;
            }
        }
        let len_bits = ver.char_cnt_bits(seg_mode);
        segs.push(Segment::new(seg_mode, len_bits, &data[seg_start..]));

        segs
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use crate::common::bit_utils::BitStream;
    use crate::common::codec::{Segment, MODE_INDICATOR_BITS, PADDING_CODEWORDS};

    pub fn push_segment(seg: Segment, out: &mut BitStream) {
        push_header(&seg, out);
        push_data(&seg, out);
    }

    fn push_header(seg: &Segment, out: &mut BitStream) {
        out.push_bits(seg.mode as u8, MODE_INDICATOR_BITS);
        let char_cnt = seg.data.len();
        debug_assert!(
            char_cnt < (1 << seg.len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {}",
            seg.len_bits
        );
        out.push_bits(char_cnt as u16, seg.len_bits);
    }

    fn push_data(seg: &Segment, out: &mut BitStream) {
        let mode = seg.mode;
        for chunk in seg.data.chunks(mode.chunk_size()) {
            let len = mode.encoded_len(chunk.len());
            out.push_bits(mode.encode_chunk(chunk), len);
        }
    }

    pub fn push_terminator(out: &mut BitStream) {
        let term_len = std::cmp::min(4, out.remaining());
        out.push_bits(0u8, term_len);
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            out.push_bits(0u8, 8 - offset);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        debug_assert!(
            out.len() & 7 == 0,
            "Bit offset should be zero before padding codewords: {}",
            out.len() & 7
        );

        let remain_byte_capacity = out.remaining() >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

    #[cfg(test)]
    mod writer_tests {
        use test_case::test_case;

        use super::{
            push_data, push_header, push_padding_bits, push_padding_codewords, push_terminator,
        };
        use crate::common::bit_utils::BitStream;
        use crate::common::codec::{Mode, Segment, PADDING_CODEWORDS};
        use crate::common::metadata::{ECLevel, Version};

        fn v1_stream() -> BitStream {
            BitStream::new(Version(1).data_bit_capacity(ECLevel::L))
        }

        // Max char count for each mode fills the count indicator with ones
        #[test_case(1, Mode::Numeric, 1023, &[0b00011111, 0b11111100])]
        #[test_case(1, Mode::Alphanumeric, 511, &[0b00101111, 0b11111000])]
        #[test_case(1, Mode::Byte, 255, &[0b01001111, 0b11110000])]
        #[test_case(10, Mode::Numeric, 4095, &[0b00011111, 0b11111111])]
        #[test_case(10, Mode::Alphanumeric, 2047, &[0b00101111, 0b11111110])]
        #[test_case(10, Mode::Byte, 65535, &[0b01001111, 0b11111111, 0b11110000])]
        #[test_case(27, Mode::Numeric, 16383, &[0b00011111, 0b11111111, 0b11000000])]
        #[test_case(27, Mode::Alphanumeric, 8191, &[0b00101111, 0b11111111, 0b10000000])]
        fn test_push_header(v: usize, mode: Mode, cnt: usize, exp: &[u8]) {
            let ver = Version(v);
            let dummy = vec![0; cnt];
            let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::L));
            push_header(&Segment::new(mode, ver.char_cnt_bits(mode), &dummy), &mut bs);
            assert_eq!(bs.data(), exp);
        }

        #[test]
        fn test_push_numeric_data() {
            let mut bs = v1_stream();
            push_data(&Segment::new(Mode::Numeric, 10, b"01234567"), &mut bs);
            assert_eq!(bs.data(), [0b00000011, 0b00010101, 0b10011000, 0b01100000]);
            let mut bs = v1_stream();
            push_data(&Segment::new(Mode::Numeric, 10, b"8"), &mut bs);
            assert_eq!(bs.data(), [0b10000000]);
        }

        #[test]
        fn test_push_alphanumeric_data() {
            let mut bs = v1_stream();
            push_data(&Segment::new(Mode::Alphanumeric, 9, b"AC-42"), &mut bs);
            assert_eq!(bs.data(), [0b00111001, 0b11011100, 0b11100100, 0b00100000]);
        }

        #[test]
        fn test_push_byte_data() {
            let mut bs = v1_stream();
            push_data(&Segment::new(Mode::Byte, 8, b"a"), &mut bs);
            assert_eq!(bs.data(), [0b01100001]);
        }

        #[test]
        fn test_push_terminator() {
            let mut bs = v1_stream();
            let capacity = bs.capacity() >> 3;
            bs.push_bits(0b1u8, 1);
            push_terminator(&mut bs);
            assert_eq!(bs.data(), [0b10000000]);
            assert_eq!(bs.len(), 5);
            for _ in 0..capacity - 1 {
                bs.push_bits(0b11111111u8, 8);
            }
            // Only 3 bits left, terminator is truncated
            push_terminator(&mut bs);
            assert_eq!(bs.remaining(), 0);
        }

        #[test]
        fn test_push_padding() {
            let mut bs = v1_stream();
            bs.push_bits(0b1u8, 1);
            push_padding_bits(&mut bs);
            assert_eq!(bs.data(), [0b10000000]);
            assert_eq!(bs.len() & 7, 0);
            push_padding_codewords(&mut bs);
            let mut output = vec![0b10000000];
            output.extend(PADDING_CODEWORDS.iter().cycle().take(18));
            assert_eq!(bs.data(), output);
        }
    }
}
