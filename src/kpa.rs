//! KPA — Keccak-based Parallel Authentication: an 8-way data-parallel MAC
//! built from a 12-round reduced Keccak permutation, offered as an
//! alternative MAC backend to plain KMAC for throughput-sensitive callers.
//! Not wired into [`crate::rcs::RcsState`] by default — see `DESIGN.md` for
//! why this stays an explicit opt-in (`feature = "kpa"`) rather than
//! RCS's default MAC.
//!
//! This is the scalar reference form named in the specification; a SIMD
//! (AVX2/AVX-512) form sharing this module's leaf/root protocol is left to a
//! platform-specific follow-up crate, with the contract that its output must
//! be bit-exact equal to this one for every input (see
//! `tests/permutation_equivalence.rs` for the analogous compact/unrolled
//! contract this mirrors).

use zeroize::Zeroize;

use crate::endian::{read_lanes_le, write_lanes_le};
use crate::kmac::{kmac256, Kmac256};
use crate::keccak::compact;

/// Number of parallel leaves.
pub const LANES: usize = 8;
/// Reduced round count for the leaf permutation.
pub const ROUNDS: usize = 12;
/// Byte rate for each leaf (matches KMAC-256's rate; reused so leaf output
/// can be folded directly into a standard KMAC-256 root).
pub const LEAF_RATE: usize = 136;
/// Leaf squeeze width in bytes, folded into the root KMAC.
pub const LEAF_OUTPUT_LEN: usize = 32;

/// One of the eight independent 200-byte Keccak-_p_[1600, 12] leaf states.
struct Leaf {
    lanes: [u64; 25],
    buf: [u8; 200],
    position: usize,
}

impl Zeroize for Leaf {
    fn zeroize(&mut self) {
        self.lanes.zeroize();
        self.buf.zeroize();
        self.position = 0;
    }
}

impl Leaf {
    fn new(key: &[u8], custom: &[u8], lane_index: u8) -> Self {
        let mut leaf = Leaf { lanes: [0u64; 25], buf: [0u8; 200], position: 0 };
        // Per-lane domain separation: the lane index is absorbed ahead of
        // the shared key/customization so that no two leaves can ever see
        // an identical input stream.
        leaf.absorb(&[lane_index]);
        leaf.absorb(key);
        leaf.absorb(custom);
        leaf
    }

    fn absorb(&mut self, bytes: &[u8]) {
        let mut input = bytes;

        if self.position > 0 {
            let want = LEAF_RATE - self.position;
            let take = want.min(input.len());
            self.buf[self.position..self.position + take].copy_from_slice(&input[..take]);
            self.position += take;
            input = &input[take..];

            if self.position == LEAF_RATE {
                let block = self.buf;
                self.absorb_block(&block[..LEAF_RATE]);
                self.position = 0;
            } else {
                return;
            }
        }

        while input.len() >= LEAF_RATE {
            self.absorb_block(&input[..LEAF_RATE]);
            input = &input[LEAF_RATE..];
        }

        if !input.is_empty() {
            self.buf[..input.len()].copy_from_slice(input);
            self.position = input.len();
        }
    }

    fn absorb_block(&mut self, block: &[u8]) {
        let rate_lanes = LEAF_RATE / 8;
        let mut lanes = [0u64; 25];
        read_lanes_le(block, &mut lanes[..rate_lanes]);
        for i in 0..rate_lanes {
            self.lanes[i] ^= lanes[i];
        }
        compact::permute::<ROUNDS>(&mut self.lanes);
    }

    fn squeeze(&mut self, domain: u8, out: &mut [u8; LEAF_OUTPUT_LEN]) {
        let mut block = [0u8; 200];
        block[..self.position].copy_from_slice(&self.buf[..self.position]);
        block[self.position] = domain;
        block[LEAF_RATE - 1] |= 0x80;

        let rate_lanes = LEAF_RATE / 8;
        let mut lanes = [0u64; 25];
        read_lanes_le(&block[..LEAF_RATE], &mut lanes[..rate_lanes]);
        for i in 0..rate_lanes {
            self.lanes[i] ^= lanes[i];
        }

        compact::permute::<ROUNDS>(&mut self.lanes);
        let mut out_block = [0u8; 200];
        write_lanes_le(&self.lanes[..rate_lanes], &mut out_block[..LEAF_RATE]);
        out.copy_from_slice(&out_block[..LEAF_OUTPUT_LEN]);
    }
}

/// Computes the KPA tag of `message` under `key`/`custom`, writing
/// `out.len()` bytes (typically 32, matching RCS-256's MAC length).
///
/// Striping: `message` is split into `LANES` interleaved 200-byte-chunk
/// strides (lane `i` absorbs chunks `i`, `i + LANES`, `i + 2*LANES`, ...),
/// each leaf seeded with `key`/`custom` and its own lane index as a domain
/// tag. The eight leaf digests are then absorbed into a root KMAC-256
/// instance (keyed with `key`, customized with `custom`) that produces the
/// final tag — so KPA's output is always defined in terms of the same KMAC
/// primitive the rest of this crate uses, just with parallel leaf
/// absorption ahead of it.
pub fn kpa256(out: &mut [u8], key: &[u8], message: &[u8], custom: &[u8]) {
    const STRIPE: usize = 200;

    let mut leaves: [Leaf; LANES] =
        core::array::from_fn(|i| Leaf::new(key, custom, i as u8));

    for (chunk_index, chunk) in message.chunks(STRIPE).enumerate() {
        leaves[chunk_index % LANES].absorb(chunk);
    }

    let mut leaf_digests = [0u8; LANES * LEAF_OUTPUT_LEN];
    for (i, leaf) in leaves.iter_mut().enumerate() {
        let mut digest = [0u8; LEAF_OUTPUT_LEN];
        leaf.squeeze(crate::keccak::DOMAIN_CSHAKE, &mut digest);
        leaf_digests[i * LEAF_OUTPUT_LEN..(i + 1) * LEAF_OUTPUT_LEN].copy_from_slice(&digest);
        leaf.zeroize();
    }

    if out.len() == LEAF_OUTPUT_LEN {
        kmac256(out, key, &leaf_digests, custom);
    } else {
        let mut root = Kmac256::new(key, custom);
        root.absorb(&leaf_digests);
        root.finalize(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_identical_inputs() {
        let key = [0x33u8; 32];
        let message = b"striped across more than one 200-byte chunk to exercise every lane, hopefully";
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        kpa256(&mut a, &key, message, b"custom");
        kpa256(&mut b, &key, message, b"custom");
        assert_eq!(a, b);
    }

    #[test]
    fn single_bit_change_changes_the_tag() {
        let key = [0x44u8; 32];
        let mut message = vec![0u8; 512];
        for (i, b) in message.iter_mut().enumerate() {
            *b = i as u8;
        }
        let mut a = [0u8; 32];
        kpa256(&mut a, &key, &message, b"");

        message[300] ^= 1;
        let mut b = [0u8; 32];
        kpa256(&mut b, &key, &message, b"");

        assert_ne!(a, b);
    }

    #[test]
    fn short_message_within_a_single_lane() {
        let key = [0x55u8; 16];
        let mut out = [0u8; 32];
        kpa256(&mut out, &key, b"short", b"");
        assert_ne!(out, [0u8; 32]);
    }
}
