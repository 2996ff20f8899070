//! The Keccak-f[1600] permutation and the rate-based sponge built on top of
//! it: absorption with the `pad10*1` padding rule and domain-separated
//! block-rate squeezing. SHA-3, SHAKE, cSHAKE, and KMAC (in `crate::sha3`,
//! `crate::cshake`, `crate::kmac`) are all one construction apiece over
//! [`Sponge`].

pub mod compact;
pub mod unrolled;

use zeroize::Zeroize;

use crate::endian::{read_lanes_le, write_lanes_le};

/// The 200-byte (25 x 64-bit lane) Keccak state.
pub const STATE_BYTES: usize = 200;

/// SHA-3 fixed-output domain separation byte.
pub const DOMAIN_SHA3: u8 = 0x06;
/// SHAKE domain separation byte.
pub const DOMAIN_SHAKE: u8 = 0x1F;
/// cSHAKE / KMAC domain separation byte (used whenever the cSHAKE
/// customization prefix is non-empty, and always for KMAC).
pub const DOMAIN_CSHAKE: u8 = 0x04;

/// A Keccak-_p_[1600, `R`] sponge: the 25-lane state, the byte offset within
/// the current rate block being staged for absorption, and a 200-byte
/// staging buffer. `position < rate` is an invariant maintained between every
/// public call.
#[derive(Clone)]
pub struct Sponge<const R: usize> {
    lanes: [u64; 25],
    rate: usize,
    buf: [u8; STATE_BYTES],
    position: usize,
    squeezing: bool,
}

impl<const R: usize> Zeroize for Sponge<R> {
    fn zeroize(&mut self) {
        self.lanes.zeroize();
        self.buf.zeroize();
        self.position = 0;
    }
}

impl<const R: usize> Sponge<R> {
    /// Creates a new, zero-initialized sponge at the given byte rate.
    pub fn new(rate: usize) -> Self {
        debug_assert!(rate > 0 && rate <= STATE_BYTES);
        Sponge { lanes: [0u64; 25], rate, buf: [0u8; STATE_BYTES], position: 0, squeezing: false }
    }

    #[inline(always)]
    fn permute(&mut self) {
        unrolled::permute::<R>(&mut self.lanes);
    }

    /// Absorbs `bytes`, XOR-ing full rate-sized blocks directly into the
    /// state and staging any remainder for a later `absorb` or `finalize`
    /// call. May be called any number of times before `finalize`.
    pub fn absorb(&mut self, bytes: &[u8]) {
        debug_assert!(!self.squeezing, "cannot absorb after squeezing has started");

        let mut input = bytes;

        // Top up a partially-staged block first.
        if self.position > 0 {
            let want = self.rate - self.position;
            let take = want.min(input.len());
            self.buf[self.position..self.position + take].copy_from_slice(&input[..take]);
            self.position += take;
            input = &input[take..];

            if self.position == self.rate {
                let block = self.buf;
                self.absorb_block(&block[..self.rate]);
                self.position = 0;
            } else {
                return;
            }
        }

        while input.len() >= self.rate {
            self.absorb_block(&input[..self.rate]);
            input = &input[self.rate..];
        }

        if !input.is_empty() {
            self.buf[..input.len()].copy_from_slice(input);
            self.position = input.len();
        }
    }

    /// XORs one rate-sized block into the lanes and permutes.
    fn absorb_block(&mut self, block: &[u8]) {
        let rate_lanes = self.rate / 8;
        let mut lanes = [0u64; 25];
        read_lanes_le(block, &mut lanes[..rate_lanes]);
        for i in 0..rate_lanes {
            self.lanes[i] ^= lanes[i];
        }
        self.permute();
    }

    /// Applies the `pad10*1` rule to whatever remains staged (0..rate
    /// bytes), XORs the padded block in, and permutes once more. After this
    /// call the sponge is in the squeeze phase; `absorb` must not be called
    /// again without re-initializing.
    pub fn finalize(&mut self, domain: u8) {
        debug_assert!(!self.squeezing, "finalize called twice");

        let mut block = [0u8; STATE_BYTES];
        block[..self.position].copy_from_slice(&self.buf[..self.position]);
        block[self.position] = domain;
        block[self.rate - 1] |= 0x80;

        let rate_lanes = self.rate / 8;
        let mut lanes = [0u64; 25];
        read_lanes_le(&block[..self.rate], &mut lanes[..rate_lanes]);
        for i in 0..rate_lanes {
            self.lanes[i] ^= lanes[i];
        }

        self.position = 0;
        self.squeezing = true;
    }

    /// Fills `out` with squeezed output, permuting and emitting rate-sized
    /// blocks (the final block may be partial). May be called repeatedly
    /// after `finalize` to stream arbitrary-length XOF output.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        debug_assert!(self.squeezing, "squeeze called before finalize");

        let mut rest = out;
        while !rest.is_empty() {
            self.permute();

            let mut block = [0u8; STATE_BYTES];
            let rate_lanes = self.rate / 8;
            write_lanes_le(&self.lanes[..rate_lanes], &mut block[..self.rate]);

            let take = rest.len().min(self.rate);
            rest[..take].copy_from_slice(&block[..take]);
            rest = &mut rest[take..];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_then_finalize_matches_one_shot() {
        // Absorbing in two pieces must agree with absorbing the whole
        // message in one call (the buffering logic is purely an
        // implementation detail of the long-form API).
        let msg = b"the quick brown fox jumps over the lazy dog, twice for luck";

        let mut piecewise = Sponge::<24>::new(136);
        piecewise.absorb(&msg[..10]);
        piecewise.absorb(&msg[10..]);
        piecewise.finalize(DOMAIN_SHA3);
        let mut out_piecewise = [0u8; 32];
        piecewise.squeeze(&mut out_piecewise);

        let mut one_shot = Sponge::<24>::new(136);
        one_shot.absorb(msg);
        one_shot.finalize(DOMAIN_SHA3);
        let mut out_one_shot = [0u8; 32];
        one_shot.squeeze(&mut out_one_shot);

        assert_eq!(out_piecewise, out_one_shot);
    }
}
