//! RCS: a Rijndael-256 CTR stream cipher authenticated with KMAC, and keyed
//! and MAC'd via the cSHAKE-driven schedule in [`schedule`].

pub mod schedule;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::endian::{ct_eq, le_increment, write_u64_le};
use crate::kmac::{Kmac256, Kmac512};
use crate::rijndael256::{self, BLOCK_SIZE};
use schedule::{
    expand_rcs256, expand_rcs512, rotate_mac_key_256, rotate_mac_key_512, RCS256_ROUNDKEY_LEN,
    RCS256_ROUNDS, RCS512_ROUNDKEY_LEN, RCS512_ROUNDS,
};

/// Selects the RCS key size / round count / MAC size triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RcsVariant {
    /// 32-byte key, 22 rounds, 32-byte MAC.
    Rcs256,
    /// 64-byte key, 30 rounds, 64-byte MAC.
    Rcs512,
}

impl RcsVariant {
    pub const fn key_len(self) -> usize {
        match self {
            RcsVariant::Rcs256 => 32,
            RcsVariant::Rcs512 => 64,
        }
    }

    pub const fn mac_len(self) -> usize {
        match self {
            RcsVariant::Rcs256 => 32,
            RcsVariant::Rcs512 => 64,
        }
    }

    const fn rounds(self) -> usize {
        match self {
            RcsVariant::Rcs256 => RCS256_ROUNDS,
            RcsVariant::Rcs512 => RCS512_ROUNDS,
        }
    }

    const fn round_key_len(self) -> usize {
        match self {
            RcsVariant::Rcs256 => RCS256_ROUNDKEY_LEN,
            RcsVariant::Rcs512 => RCS512_ROUNDKEY_LEN,
        }
    }
}

/// The largest round-key array size across both variants (RCS-512's).
const MAX_ROUNDKEY_LEN: usize = RCS512_ROUNDKEY_LEN;
/// The largest MAC-key size across both variants (RCS-512's).
const MAX_MAC_KEY_LEN: usize = 64;

/// An in-progress [`extended_transform`](RcsState::extended_transform)
/// streaming MAC, running across multiple chunk calls until the caller
/// passes `finalize = true`.
enum StreamingMac {
    Rcs256(Kmac256),
    Rcs512(Kmac512),
}

/// RCS cipher state: the expanded round-key schedule, the current MAC key,
/// the nonce/counter pair, and the borrowed customization and
/// associated-data the caller supplied.
///
/// Borrows the caller's `info` tweak for its whole lifetime, mirroring the
/// reference implementation's `state->custom = keyparams->info` pointer
/// rather than copying it.
pub struct RcsState<'a> {
    variant: RcsVariant,
    encrypt: bool,
    round_keys: [u8; MAX_ROUNDKEY_LEN],
    mac_key: [u8; MAX_MAC_KEY_LEN],
    nonce: [u8; BLOCK_SIZE],
    counter: u64,
    info: &'a [u8],
    ad: Option<&'a [u8]>,
    streaming: Option<StreamingMac>,
}

impl<'a> Zeroize for RcsState<'a> {
    fn zeroize(&mut self) {
        self.round_keys.zeroize();
        self.mac_key.zeroize();
        self.nonce.zeroize();
        self.counter = 0;
        self.ad = None;
        self.streaming = None;
    }
}

impl<'a> ZeroizeOnDrop for RcsState<'a> {}

impl<'a> Drop for RcsState<'a> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<'a> RcsState<'a> {
    /// Derives the round-key schedule and initial MAC key from `key` and
    /// `info`, and sets the starting nonce. `key.len()` must equal
    /// `variant.key_len()`.
    pub fn initialize(variant: RcsVariant, key: &[u8], nonce: [u8; BLOCK_SIZE], info: &'a [u8], encrypt: bool) -> Self {
        debug_assert_eq!(key.len(), variant.key_len());

        let mut round_keys = [0u8; MAX_ROUNDKEY_LEN];
        let mut mac_key = [0u8; MAX_MAC_KEY_LEN];
        let rk_len = variant.round_key_len();
        let mac_len = variant.mac_len();

        match variant {
            RcsVariant::Rcs256 => expand_rcs256(key, info, &mut round_keys[..rk_len], &mut mac_key[..mac_len]),
            RcsVariant::Rcs512 => expand_rcs512(key, info, &mut round_keys[..rk_len], &mut mac_key[..mac_len]),
        }

        RcsState {
            variant,
            encrypt,
            round_keys,
            mac_key,
            nonce,
            counter: 1,
            info,
            ad: None,
            streaming: None,
        }
    }

    /// Sets the associated data for the next `transform` call. Overwrites
    /// any previously-set, not-yet-consumed associated data.
    pub fn set_associated(&mut self, ad: &'a [u8]) {
        self.ad = Some(ad);
    }

    /// Returns the current nonce/counter value. Since `transform` mutates
    /// the nonce in place (see spec.md §3/§9), this is the only way for a
    /// caller to observe the post-call value without keeping its own copy.
    pub fn nonce(&self) -> [u8; BLOCK_SIZE] {
        self.nonce
    }

    /// Overwrites the running nonce/counter. Intended for callers who need
    /// to deliberately replay a nonce within a session (the built-in
    /// MAC-key chaining in [`finalize_tag`](Self::finalize_tag) keeps two
    /// such calls from producing related tags, but confidentiality still
    /// depends on the keystream not repeating — see spec.md §9).
    pub fn reset_nonce(&mut self, nonce: [u8; BLOCK_SIZE]) {
        self.nonce = nonce;
    }

    fn encrypt_one_block(&self, output: &mut [u8; BLOCK_SIZE]) {
        rijndael256::encrypt_block(output, &self.nonce, &self.round_keys[..self.variant.round_key_len()], self.variant.rounds());
    }

    /// CTR keystream generation: encrypts the running nonce, XORs it into
    /// `input`, writes the result to `output`, and increments the nonce —
    /// once per full block, once more for a partial trailing block.
    fn ctr_transform(&mut self, output: &mut [u8], input: &[u8]) {
        debug_assert_eq!(output.len(), input.len());

        let mut offset = 0;
        while input.len() - offset >= BLOCK_SIZE {
            let mut keystream = [0u8; BLOCK_SIZE];
            self.encrypt_one_block(&mut keystream);
            for i in 0..BLOCK_SIZE {
                output[offset + i] = keystream[i] ^ input[offset + i];
            }
            le_increment(&mut self.nonce);
            offset += BLOCK_SIZE;
        }

        let remainder = input.len() - offset;
        if remainder != 0 {
            let mut keystream = [0u8; BLOCK_SIZE];
            self.encrypt_one_block(&mut keystream);
            for i in 0..remainder {
                output[offset + i] = keystream[i] ^ input[offset + i];
            }
            le_increment(&mut self.nonce);
        }
    }

    /// Computes the authentication tag over `nonce_copy ∥ ciphertext ∥ ad ∥
    /// le64(32 + counter + ad_len + 8)` under the current MAC key, then
    /// rotates the MAC key forward and clears the associated-data slot.
    fn finalize_tag(&mut self, nonce_copy: &[u8; BLOCK_SIZE], ciphertext: &[u8], tag_out: &mut [u8]) {
        let ad = self.ad.take().unwrap_or(&[]);
        let mac_counter = BLOCK_SIZE as u64 + self.counter + ad.len() as u64 + 8;
        let mut counter_bytes = [0u8; 8];
        write_u64_le(&mut counter_bytes, mac_counter);

        let mac_len = self.variant.mac_len();
        match self.variant {
            RcsVariant::Rcs256 => {
                let mut mac = Kmac256::new(&self.mac_key[..mac_len], self.info);
                mac.absorb(nonce_copy);
                mac.absorb(ciphertext);
                mac.absorb(ad);
                mac.absorb(&counter_bytes);
                mac.finalize(tag_out);
                rotate_mac_key_256(&mut self.mac_key[..mac_len], self.counter, self.info);
            }
            RcsVariant::Rcs512 => {
                let mut mac = Kmac512::new(&self.mac_key[..mac_len], self.info);
                mac.absorb(nonce_copy);
                mac.absorb(ciphertext);
                mac.absorb(ad);
                mac.absorb(&counter_bytes);
                mac.finalize(tag_out);
                rotate_mac_key_512(&mut self.mac_key[..mac_len], self.counter, self.info);
            }
        }
    }

    /// Encrypts or decrypts `input` into `output`.
    ///
    /// Encrypt mode: `output.len()` must be `input.len() + variant.mac_len()`;
    /// writes ciphertext to `output[..input.len()]` and the tag to the
    /// remaining bytes, always returning `true`.
    ///
    /// Decrypt mode: `input.len()` must be `output.len() + variant.mac_len()`;
    /// verifies the trailing tag in constant time before writing any
    /// plaintext to `output`. Returns `false` (writing nothing) on
    /// authentication failure.
    pub fn transform(&mut self, output: &mut [u8], input: &[u8]) -> bool {
        let mac_len = self.variant.mac_len();
        let nonce_copy = self.nonce;

        if self.encrypt {
            debug_assert_eq!(output.len(), input.len() + mac_len);
            let (ciphertext_out, tag_out) = output.split_at_mut(input.len());
            self.counter += input.len() as u64;
            self.ctr_transform(ciphertext_out, input);
            self.finalize_tag(&nonce_copy, ciphertext_out, tag_out);
            true
        } else {
            debug_assert_eq!(input.len(), output.len() + mac_len);
            let plaintext_len = output.len();
            let (ciphertext_in, tag_in) = input.split_at(plaintext_len);
            self.counter += plaintext_len as u64;

            let mut expected_tag = [0u8; MAX_MAC_KEY_LEN];
            self.finalize_tag(&nonce_copy, ciphertext_in, &mut expected_tag[..mac_len]);

            if ct_eq(&expected_tag[..mac_len], tag_in) {
                self.nonce = nonce_copy;
                self.ctr_transform(output, ciphertext_in);
                true
            } else {
                false
            }
        }
    }

    /// Returns a sealed copy of `plaintext`: `variant.mac_len()` bytes longer,
    /// with the tag appended. Convenience wrapper around
    /// [`transform`](Self::transform) for callers who don't need to manage
    /// their own output buffer.
    #[cfg(feature = "std")]
    pub fn seal(&mut self, plaintext: &[u8]) -> std::vec::Vec<u8> {
        let mut out = std::vec![0u8; plaintext.len() + self.variant.mac_len()];
        self.transform(&mut out, plaintext);
        out
    }

    /// Returns the decrypted and verified plaintext, or `None` if `sealed`
    /// fails authentication. Convenience wrapper around
    /// [`transform`](Self::transform).
    #[cfg(feature = "std")]
    pub fn open(&mut self, sealed: &[u8]) -> Option<std::vec::Vec<u8>> {
        let mac_len = self.variant.mac_len();
        let mut out = std::vec![0u8; sealed.len() - mac_len];
        if self.transform(&mut out, sealed) {
            Some(out)
        } else {
            None
        }
    }

    /// Streamed variant of [`transform`](Self::transform) for large inputs:
    /// every call CTR-transforms `input` into `output` and folds the
    /// ciphertext into a running MAC, but the tag is only produced (and the
    /// MAC key only rotated) on the call where `finalize` is `true`.
    ///
    /// `output.len()` must equal `input.len()` on every call except the
    /// final one, where (in encrypt mode) it must equal
    /// `input.len() + variant.mac_len()` to make room for the trailing tag.
    /// Decrypt-mode tag verification on the final call follows the same
    /// constant-time contract as [`transform`](Self::transform).
    pub fn extended_transform(&mut self, output: &mut [u8], input: &[u8], finalize: bool) -> bool {
        let mac_len = self.variant.mac_len();

        if self.encrypt {
            let ciphertext_len = if finalize { output.len() - mac_len } else { output.len() };
            let (ciphertext_out, tag_out) = output.split_at_mut(ciphertext_len);
            self.counter += ciphertext_out.len() as u64;
            self.ctr_transform(ciphertext_out, &input[..ciphertext_len]);
            self.absorb_stream_chunk(ciphertext_out);

            if finalize {
                self.finalize_stream(tag_out);
            }
            true
        } else {
            let plaintext_len = if finalize { input.len() - mac_len } else { input.len() };
            let ciphertext_in = &input[..plaintext_len];
            self.counter += plaintext_len as u64;
            self.absorb_stream_chunk(ciphertext_in);

            if finalize {
                let mut expected_tag = [0u8; MAX_MAC_KEY_LEN];
                self.finalize_stream(&mut expected_tag[..mac_len]);
                if !ct_eq(&expected_tag[..mac_len], &input[plaintext_len..]) {
                    return false;
                }
            }

            self.ctr_transform(&mut output[..plaintext_len], ciphertext_in);
            true
        }
    }

    /// Lazily starts the running streaming MAC (absorbing the nonce at the
    /// start of the session, the same value [`transform`](Self::transform)
    /// would MAC over as `nonce_copy`) and absorbs one more ciphertext chunk.
    fn absorb_stream_chunk(&mut self, ciphertext_chunk: &[u8]) {
        if self.streaming.is_none() {
            let mac_len = self.variant.mac_len();
            let mac = match self.variant {
                RcsVariant::Rcs256 => {
                    let mut mac = Kmac256::new(&self.mac_key[..mac_len], self.info);
                    mac.absorb(&self.nonce);
                    StreamingMac::Rcs256(mac)
                }
                RcsVariant::Rcs512 => {
                    let mut mac = Kmac512::new(&self.mac_key[..mac_len], self.info);
                    mac.absorb(&self.nonce);
                    StreamingMac::Rcs512(mac)
                }
            };
            self.streaming = Some(mac);
        }

        match self.streaming.as_mut().expect("just initialized above") {
            StreamingMac::Rcs256(mac) => mac.absorb(ciphertext_chunk),
            StreamingMac::Rcs512(mac) => mac.absorb(ciphertext_chunk),
        }
    }

    /// Absorbs the associated data and the byte counter, squeezes the tag,
    /// and rotates the MAC key, ending the streaming session.
    fn finalize_stream(&mut self, tag_out: &mut [u8]) {
        let ad = self.ad.take().unwrap_or(&[]);
        let mac_counter = BLOCK_SIZE as u64 + self.counter + ad.len() as u64 + 8;
        let mut counter_bytes = [0u8; 8];
        write_u64_le(&mut counter_bytes, mac_counter);

        match self.streaming.take().expect("extended_transform always starts the stream first") {
            StreamingMac::Rcs256(mut mac) => {
                mac.absorb(ad);
                mac.absorb(&counter_bytes);
                mac.finalize(tag_out);
                rotate_mac_key_256(&mut self.mac_key[..self.variant.mac_len()], self.counter, self.info);
            }
            StreamingMac::Rcs512(mut mac) => {
                mac.absorb(ad);
                mac.absorb(&counter_bytes);
                mac.finalize(tag_out);
                rotate_mac_key_512(&mut self.mac_key[..self.variant.mac_len()], self.counter, self.info);
            }
        }
    }

    /// Zeroizes all secret state. Equivalent to dropping the `RcsState`;
    /// provided for callers that want to clear secrets before the end of
    /// scope.
    pub fn dispose(mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(variant: RcsVariant, key: &[u8], nonce: [u8; BLOCK_SIZE], info: &[u8], ad: &[u8], plaintext: &[u8]) {
        let mac_len = variant.mac_len();

        let mut ciphertext = vec![0u8; plaintext.len() + mac_len];
        let mut enc = RcsState::initialize(variant, key, nonce, info, true);
        enc.set_associated(ad);
        assert!(enc.transform(&mut ciphertext, plaintext));

        let mut recovered = vec![0u8; plaintext.len()];
        let mut dec = RcsState::initialize(variant, key, nonce, info, false);
        dec.set_associated(ad);
        assert!(dec.transform(&mut recovered, &ciphertext));
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn rcs256_decrypt_inverts_encrypt() {
        roundtrip(RcsVariant::Rcs256, &[0x2Au8; 32], [0u8; BLOCK_SIZE], b"info", b"associated", b"the quick brown fox");
    }

    #[test]
    fn rcs512_decrypt_inverts_encrypt() {
        roundtrip(RcsVariant::Rcs512, &[0x2Au8; 64], [1u8; BLOCK_SIZE], b"info-512", b"", b"jumps over the lazy dog, many times over to fill more than one block");
    }

    #[test]
    fn bit_flip_in_ciphertext_fails_authentication() {
        let key = [0x5Cu8; 32];
        let nonce = [2u8; BLOCK_SIZE];
        let plaintext = b"authenticate me";
        let mac_len = RcsVariant::Rcs256.mac_len();

        let mut ciphertext = vec![0u8; plaintext.len() + mac_len];
        let mut enc = RcsState::initialize(RcsVariant::Rcs256, &key, nonce, b"", true);
        assert!(enc.transform(&mut ciphertext, plaintext));

        ciphertext[0] ^= 0x01;

        let mut recovered = vec![0u8; plaintext.len()];
        let mut dec = RcsState::initialize(RcsVariant::Rcs256, &key, nonce, b"", false);
        assert!(!dec.transform(&mut recovered, &ciphertext));
        assert!(recovered.iter().all(|&b| b == 0));
    }

    #[test]
    fn repeated_nonce_still_rotates_the_mac_key() {
        // Two transforms under the same starting nonce must not reuse the
        // same MAC key, so their tags must differ even for identical
        // plaintexts.
        let key = [0x7Au8; 32];
        let nonce = [3u8; BLOCK_SIZE];
        let plaintext = b"same plaintext both times";
        let mac_len = RcsVariant::Rcs256.mac_len();

        let mut enc = RcsState::initialize(RcsVariant::Rcs256, &key, nonce, b"", true);
        let mut out_a = vec![0u8; plaintext.len() + mac_len];
        enc.transform(&mut out_a, plaintext);
        let tag_a = out_a[plaintext.len()..].to_vec();

        // Reset the nonce (simulating a caller's deliberate reuse) and
        // transform again on the same state.
        enc.reset_nonce(nonce);
        let mut out_b = vec![0u8; plaintext.len() + mac_len];
        enc.transform(&mut out_b, plaintext);
        let tag_b = out_b[plaintext.len()..].to_vec();

        assert_ne!(tag_a, tag_b);
    }

    #[test]
    fn seal_and_open_round_trip() {
        let key = [0x6Bu8; 32];
        let nonce = [9u8; BLOCK_SIZE];
        let plaintext = b"sealed via the Vec-returning convenience wrappers";

        let mut sealer = RcsState::initialize(RcsVariant::Rcs256, &key, nonce, b"", true);
        let sealed = sealer.seal(plaintext);
        assert_eq!(sealed.len(), plaintext.len() + RcsVariant::Rcs256.mac_len());

        let mut opener = RcsState::initialize(RcsVariant::Rcs256, &key, nonce, b"", false);
        let recovered = opener.open(&sealed).expect("tag must verify");
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn open_rejects_tampered_seal() {
        let key = [0x6Cu8; 32];
        let nonce = [10u8; BLOCK_SIZE];
        let plaintext = b"tamper with me";

        let mut sealer = RcsState::initialize(RcsVariant::Rcs256, &key, nonce, b"", true);
        let mut sealed = sealer.seal(plaintext);
        sealed[0] ^= 1;

        let mut opener = RcsState::initialize(RcsVariant::Rcs256, &key, nonce, b"", false);
        assert!(opener.open(&sealed).is_none());
    }

    #[test]
    fn extended_transform_matches_one_shot_transform() {
        let key = [0x11u8; 32];
        let nonce = [4u8; BLOCK_SIZE];
        let info = b"stream-info";
        let plaintext = b"a message split across two streamed chunks for testing";
        let mac_len = RcsVariant::Rcs256.mac_len();
        let split = 16;

        let mut one_shot = vec![0u8; plaintext.len() + mac_len];
        let mut enc_one_shot = RcsState::initialize(RcsVariant::Rcs256, &key, nonce, info, true);
        enc_one_shot.transform(&mut one_shot, plaintext);

        let mut streamed = vec![0u8; plaintext.len() + mac_len];
        let mut enc_streamed = RcsState::initialize(RcsVariant::Rcs256, &key, nonce, info, true);
        let (first_out, rest_out) = streamed.split_at_mut(split);
        enc_streamed.extended_transform(first_out, &plaintext[..split], false);
        enc_streamed.extended_transform(rest_out, &plaintext[split..], true);

        assert_eq!(one_shot, streamed);
    }
}
