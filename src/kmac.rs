//! SP 800-185 KMAC-128/256/512: cSHAKE keyed with the fixed function name
//! `"KMAC"`, absorbing `bytepad(encode_string(K), rate)` ahead of the
//! message, and finalized with `right_encode(output length in bits)`
//! appended before the cSHAKE domain separator.

use crate::cshake::{right_encode, CShake, CShake128, CShake256, CShake512};

/// The fixed KMAC function-name string, exact bytes `K`, `M`, `A`, `C`.
const KMAC_NAME: &[u8] = &[0x4B, 0x4D, 0x41, 0x43];

macro_rules! kmac_variant {
    ($one_shot:ident, $long_form:ident, $cshake:ty, $rate:expr) => {
        /// One-shot KMAC: absorbs `key` (bytepad'd per SP 800-185) then
        /// `message`, squeezing `out.len()` bytes tagged with the output
        /// length.
        pub fn $one_shot(out: &mut [u8], key: &[u8], message: &[u8], custom: &[u8]) {
            let mut kmac = $long_form::new(key, custom);
            kmac.absorb(message);
            kmac.finalize(out);
        }

        /// Long-form KMAC state: `absorb` may be called repeatedly, then
        /// `finalize` exactly once.
        pub struct $long_form {
            cshake: $cshake,
        }

        impl $long_form {
            pub fn new(key: &[u8], custom: &[u8]) -> Self {
                let mut cshake = <$cshake>::new(KMAC_NAME, custom);
                absorb_bytepad_key(&mut cshake, $rate, key);
                $long_form { cshake }
            }

            pub fn absorb(&mut self, bytes: &[u8]) {
                self.cshake.absorb(bytes);
            }

            /// Squeezes `out.len()` bytes, appending `right_encode(out.len() * 8)`
            /// to the absorbed input first (SP 800-185's KMAC, not KMACXOF:
            /// the output length is always tagged).
            pub fn finalize(mut self, out: &mut [u8]) {
                let (enc, n) = right_encode((out.len() as u64) * 8);
                self.cshake.absorb(&enc[..n]);
                self.cshake.squeeze(out);
            }
        }
    };
}

kmac_variant!(kmac128, Kmac128, CShake128, 168);
kmac_variant!(kmac256, Kmac256, CShake256, 136);
kmac_variant!(kmac512, Kmac512, CShake512, 72);

/// Absorbs `bytepad(encode_string(key), rate)` into `cshake` (SP 800-185
/// §4, step 1 of KMAC).
fn absorb_bytepad_key<const RATE: usize>(cshake: &mut CShake<RATE>, rate: usize, key: &[u8]) {
    use crate::cshake::left_encode;

    let (rate_enc, rate_enc_len) = left_encode(rate as u64);
    cshake.absorb(&rate_enc[..rate_enc_len]);

    let (key_len_enc, key_len_enc_len) = left_encode((key.len() as u64) * 8);
    cshake.absorb(&key_len_enc[..key_len_enc_len]);
    cshake.absorb(key);

    let total = rate_enc_len + key_len_enc_len + key.len();
    let pad_len = (rate - (total % rate)) % rate;
    let zeros = [0u8; 200];
    let mut remaining = pad_len;
    while remaining > 0 {
        let take = remaining.min(zeros.len());
        cshake.absorb(&zeros[..take]);
        remaining -= take;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Vec<u8> {
        let digits: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
        digits
            .chunks(2)
            .map(|pair| {
                let hi = (pair[0] as char).to_digit(16).unwrap();
                let lo = (pair[1] as char).to_digit(16).unwrap();
                ((hi << 4) | lo) as u8
            })
            .collect()
    }

    #[test]
    fn kmac128_sample() {
        // NIST KMAC sample #1: 256-bit key 40..5F, message 00010203, empty
        // customization string, 32-byte output.
        let key = hex("404142434445464748494A4B4C4D4E4F505152535455565758595A5B5C5D5E5F");
        let message = hex("00010203");
        let mut out = [0u8; 32];
        kmac128(&mut out, &key, &message, b"");

        let expected = hex("E5780B0D3EA6F7D3A429C5706AA43A00FADBD7D49628839E3187243F456EE14E");
        assert_eq!(out.to_vec(), expected);
    }

    #[test]
    fn long_form_matches_one_shot() {
        let key = [0xAAu8; 16];
        let message = b"abcdefghijklmnopqrstuvwxyz";
        let custom = b"test";

        let mut one_shot = [0u8; 32];
        kmac256(&mut one_shot, &key, message, custom);

        let mut streamed = Kmac256::new(&key, custom);
        streamed.absorb(&message[..10]);
        streamed.absorb(&message[10..]);
        let mut via_long_form = [0u8; 32];
        streamed.finalize(&mut via_long_form);

        assert_eq!(one_shot, via_long_form);
    }

    #[test]
    fn different_keys_produce_different_tags() {
        let message = b"same message";
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        kmac256(&mut a, &[1u8; 32], message, b"");
        kmac256(&mut b, &[2u8; 32], message, b"");
        assert_ne!(a, b);
    }
}
