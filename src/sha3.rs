//! FIPS 202 SHA3-256/512 fixed-output digests and SHAKE-128/256/512
//! extensible-output functions, as one-shot `compute` functions and as a
//! long-form `update`/`finalize` API for streamed input.

use crate::keccak::{Sponge, DOMAIN_SHA3, DOMAIN_SHAKE};

/// SHA3-256 byte absorption rate.
pub const SHA3_256_RATE: usize = 136;
/// SHA3-512 byte absorption rate.
pub const SHA3_512_RATE: usize = 72;
/// SHAKE-128 byte absorption rate.
pub const SHAKE_128_RATE: usize = 168;
/// SHAKE-256 byte absorption rate.
pub const SHAKE_256_RATE: usize = 136;
/// SHAKE-512 byte absorption rate (non-standard extension of SHAKE to a
/// 512-bit capacity, as used by RCS-512's key schedule).
pub const SHAKE_512_RATE: usize = 72;

macro_rules! fixed_digest {
    ($name:ident, $rate:expr, $outlen:expr) => {
        /// One-shot fixed-output digest.
        pub fn $name(out: &mut [u8; $outlen], message: &[u8]) {
            let mut sponge = Sponge::<24>::new($rate);
            sponge.absorb(message);
            sponge.finalize(DOMAIN_SHA3);
            sponge.squeeze(out);
        }
    };
}

fixed_digest!(sha3_256, SHA3_256_RATE, 32);
fixed_digest!(sha3_512, SHA3_512_RATE, 64);

macro_rules! xof {
    ($name:ident, $long_form:ident, $rate:expr) => {
        /// One-shot SHAKE: absorbs `key`, then squeezes `out.len()` bytes.
        pub fn $name(out: &mut [u8], key: &[u8]) {
            let mut sponge = Sponge::<24>::new($rate);
            sponge.absorb(key);
            sponge.finalize(DOMAIN_SHAKE);
            sponge.squeeze(out);
        }

        #[doc = "Long-form SHAKE state: `update` may be called repeatedly, then `squeeze` any number of times."]
        pub struct $long_form {
            sponge: Sponge<24>,
            finalized: bool,
        }

        impl $long_form {
            pub fn new() -> Self {
                $long_form { sponge: Sponge::new($rate), finalized: false }
            }

            pub fn update(&mut self, bytes: &[u8]) {
                debug_assert!(!self.finalized);
                self.sponge.absorb(bytes);
            }

            pub fn squeeze(&mut self, out: &mut [u8]) {
                if !self.finalized {
                    self.sponge.finalize(DOMAIN_SHAKE);
                    self.finalized = true;
                }
                self.sponge.squeeze(out);
            }
        }

        impl Default for $long_form {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

xof!(shake128, Shake128, SHAKE_128_RATE);
xof!(shake256, Shake256, SHAKE_256_RATE);
xof!(shake512, Shake512, SHAKE_512_RATE);

/// Long-form SHA-3 state: `update` may be called repeatedly, then
/// `finalize` exactly once.
pub struct Sha3<const RATE: usize, const OUTLEN: usize> {
    sponge: Sponge<24>,
}

impl<const RATE: usize, const OUTLEN: usize> Sha3<RATE, OUTLEN> {
    pub fn new() -> Self {
        Sha3 { sponge: Sponge::new(RATE) }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        self.sponge.absorb(bytes);
    }

    pub fn finalize(mut self, out: &mut [u8; OUTLEN]) {
        self.sponge.finalize(DOMAIN_SHA3);
        self.sponge.squeeze(out);
    }
}

impl<const RATE: usize, const OUTLEN: usize> Default for Sha3<RATE, OUTLEN> {
    fn default() -> Self {
        Self::new()
    }
}

pub type Sha3_256 = Sha3<SHA3_256_RATE, 32>;
pub type Sha3_512 = Sha3<SHA3_512_RATE, 64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha3_256_of_empty_message() {
        let mut out = [0u8; 32];
        sha3_256(&mut out, b"");
        let expected: [u8; 32] = [
            0xA7, 0xFF, 0xC6, 0xF8, 0xBF, 0x1E, 0xD7, 0x66, 0x51, 0xC1, 0x47, 0x56, 0xA0, 0x61,
            0xD6, 0x62, 0xF5, 0x80, 0xFF, 0x4D, 0xE4, 0x3B, 0x49, 0xFA, 0x82, 0xD8, 0x0A, 0x4B,
            0x80, 0xF8, 0x43, 0x4A,
        ];
        assert_eq!(out, expected);
    }

    #[test]
    fn sha3_512_of_abc() {
        let mut out = [0u8; 64];
        sha3_512(&mut out, b"abc");
        let expected: [u8; 64] = [
            0xB7, 0x51, 0x85, 0x0B, 0x1A, 0x57, 0x16, 0x8A, 0x56, 0x93, 0xCD, 0x92, 0x4B, 0x6B,
            0x09, 0x6E, 0x08, 0xF6, 0x21, 0x82, 0x74, 0x44, 0xF7, 0x0D, 0x88, 0x4F, 0x5D, 0x02,
            0x40, 0xD2, 0x71, 0x2E, 0x10, 0xE1, 0x16, 0xE9, 0x19, 0x2A, 0xF3, 0xC9, 0x1A, 0x7E,
            0xC5, 0x76, 0x47, 0xE3, 0x93, 0x40, 0x57, 0x34, 0x0B, 0x4C, 0xF4, 0x08, 0xD5, 0xA5,
            0x65, 0x92, 0xF8, 0x27, 0x4E, 0xEC, 0x53, 0xF0,
        ];
        assert_eq!(out, expected);
    }

    #[test]
    fn long_form_matches_one_shot() {
        let msg = b"streamed in pieces across several update calls";
        let mut one_shot = [0u8; 32];
        sha3_256(&mut one_shot, msg);

        let mut streamed = Sha3_256::new();
        streamed.update(&msg[..5]);
        streamed.update(&msg[5..]);
        let mut via_long_form = [0u8; 32];
        streamed.finalize(&mut via_long_form);

        assert_eq!(one_shot, via_long_form);
    }
}
