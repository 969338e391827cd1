//! Seeded pseudo-random streams.
//!
//! The Blockies generator needs a stream that every platform reproduces
//! bit-for-bit from a string seed. This is the classic 48-bit linear
//! congruential generator seeded from a 31-multiplier string hash.

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const INCREMENT: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// Polynomial string hash over UTF-16 code units, wrapping at 32 bits.
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// A 48-bit linear congruential generator.
#[derive(Debug, Clone)]
pub struct Lcg48 {
    state: u64,
}

impl Lcg48 {
    /// Seed from a 64-bit value.
    pub fn new(seed: i64) -> Self {
        Self {
            state: (seed as u64 ^ MULTIPLIER) & MASK,
        }
    }

    /// Seed from the numeric hash of a string.
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(i64::from(string_hash(seed)))
    }

    fn next_bits(&mut self, bits: u32) -> u64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & MASK;
        self.state >> (48 - bits)
    }

    /// Uniform value in `[0, 1)` with 53 bits of precision.
    pub fn next_f64(&mut self) -> f64 {
        let hi = self.next_bits(26);
        let lo = self.next_bits(27);
        ((hi << 27) + lo) as f64 / (1u64 << 53) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_string_hash_known_values() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("hello"), 99162322);
    }

    #[test]
    fn test_string_hash_wraps() {
        // Long inputs overflow 32 bits and keep wrapping
        assert_eq!(string_hash(&"f".repeat(999)), 811_957_798);
        assert_eq!(string_hash(&"f".repeat(1000)), -599_111_936);
    }

    #[test]
    fn test_lcg_known_first_draw() {
        let mut rng = Lcg48::new(42);
        assert_eq!(rng.next_f64(), 0.7275636800328681);
    }

    #[test]
    fn test_lcg_same_seed_same_stream() {
        let mut a = Lcg48::from_seed_str("0xdeadbeef");
        let mut b = Lcg48::from_seed_str("0xdeadbeef");
        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    proptest! {
        #[test]
        fn test_lcg_in_unit_interval(seed in any::<i64>()) {
            let mut rng = Lcg48::new(seed);
            for _ in 0..32 {
                let v = rng.next_f64();
                prop_assert!((0.0..1.0).contains(&v));
            }
        }
    }
}
