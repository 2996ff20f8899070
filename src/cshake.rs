//! SP 800-185 `left_encode`/`right_encode`/`encode_string`/`bytepad`, and
//! cSHAKE-128/256/512: SHAKE pre-absorbed with a function-name string `N`
//! and a customization string `S`.
//!
//! When both `N` and `S` are empty, cSHAKE is defined to be identical to
//! SHAKE at the same security level (no prefix block, domain `0x1F`).
//! Otherwise the prefix `bytepad(encode_string(N) || encode_string(S), rate)`
//! is absorbed first and the domain separator becomes `0x04`.

use crate::keccak::{Sponge, DOMAIN_CSHAKE, DOMAIN_SHAKE};

/// `left_encode(x)`: one length byte `n`, followed by the `n` big-endian
/// bytes of `x`. `n` is forced to 1 when `x` is zero (SP 800-185's own
/// convention, reproduced exactly — see `spec.md` §9).
pub fn left_encode(value: u64) -> ([u8; 9], usize) {
    let mut out = [0u8; 9];
    let be = value.to_be_bytes();
    let mut n = 0usize;
    while n < 8 && be[n] == 0 {
        n += 1;
    }
    let mut nbytes = 8 - n;
    if nbytes == 0 {
        nbytes = 1;
    }
    out[0] = nbytes as u8;
    out[1..1 + nbytes].copy_from_slice(&be[8 - nbytes..]);
    (out, 1 + nbytes)
}

/// `right_encode(x)`: the `n` big-endian bytes of `x`, followed by the
/// length byte `n`. Same zero-value convention as `left_encode`.
pub fn right_encode(value: u64) -> ([u8; 9], usize) {
    let mut out = [0u8; 9];
    let be = value.to_be_bytes();
    let mut n = 0usize;
    while n < 8 && be[n] == 0 {
        n += 1;
    }
    let mut nbytes = 8 - n;
    if nbytes == 0 {
        nbytes = 1;
    }
    out[..nbytes].copy_from_slice(&be[8 - nbytes..]);
    out[nbytes] = nbytes as u8;
    (out, nbytes + 1)
}

/// Absorbs `encode_string(s) = left_encode(len(s) * 8) || s` into `sponge`,
/// returning the number of bytes absorbed (used to compute `bytepad`'s
/// trailing zero-padding length).
fn absorb_encoded_string<const R: usize>(sponge: &mut Sponge<R>, s: &[u8]) -> usize {
    let (enc, n) = left_encode((s.len() as u64) * 8);
    sponge.absorb(&enc[..n]);
    sponge.absorb(s);
    n + s.len()
}

/// Absorbs `bytepad(encode_string(name) || encode_string(custom), rate)`.
fn absorb_bytepad_prefix<const R: usize>(sponge: &mut Sponge<R>, rate: usize, name: &[u8], custom: &[u8]) {
    let (rate_enc, rate_enc_len) = left_encode(rate as u64);
    sponge.absorb(&rate_enc[..rate_enc_len]);

    let mut total = rate_enc_len;
    total += absorb_encoded_string(sponge, name);
    total += absorb_encoded_string(sponge, custom);

    let pad_len = (rate - (total % rate)) % rate;
    let zeros = [0u8; 200];
    let mut remaining = pad_len;
    while remaining > 0 {
        let take = remaining.min(zeros.len());
        sponge.absorb(&zeros[..take]);
        remaining -= take;
    }
}

/// A cSHAKE-128/256/512 instance, parameterized by its byte rate.
pub struct CShake<const RATE: usize> {
    sponge: Sponge<24>,
    domain: u8,
    finalized: bool,
}

impl<const RATE: usize> CShake<RATE> {
    /// Creates a new cSHAKE instance with the given function name and
    /// customization string, absorbing the `bytepad` prefix immediately
    /// unless both are empty (in which case this is plain SHAKE).
    pub fn new(name: &[u8], custom: &[u8]) -> Self {
        let mut sponge = Sponge::new(RATE);
        let domain = if name.is_empty() && custom.is_empty() {
            DOMAIN_SHAKE
        } else {
            absorb_bytepad_prefix(&mut sponge, RATE, name, custom);
            DOMAIN_CSHAKE
        };
        CShake { sponge, domain, finalized: false }
    }

    /// Absorbs more input. May be called any number of times before
    /// `squeeze`.
    pub fn absorb(&mut self, bytes: &[u8]) {
        debug_assert!(!self.finalized, "cannot absorb after squeezing has started");
        self.sponge.absorb(bytes);
    }

    /// Pads and permutes, switching the sponge into the squeeze phase. Only
    /// the first call has an effect; subsequent calls are no-ops so that
    /// `squeeze` may be called repeatedly without re-finalizing.
    fn ensure_finalized(&mut self) {
        if !self.finalized {
            self.sponge.finalize(self.domain);
            self.finalized = true;
        }
    }

    /// Fills `out` with squeezed output. May be called repeatedly to stream
    /// an arbitrarily long XOF output.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.ensure_finalized();
        self.sponge.squeeze(out);
    }
}

pub type CShake128 = CShake<168>;
pub type CShake256 = CShake<136>;
pub type CShake512 = CShake<72>;
