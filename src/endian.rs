//! Little-/big-endian pack and unpack helpers, constant-time equality, and
//! the little-endian multi-byte counter increment used by the RCS nonce.

use byteorder::{ByteOrder, LittleEndian};
use subtle::ConstantTimeEq;

/// Reads a little-endian `u64` lane array from a byte slice.
#[inline(always)]
pub fn read_lanes_le(bytes: &[u8], lanes: &mut [u64]) {
    LittleEndian::read_u64_into(bytes, lanes);
}

/// Writes a `u64` lane array as little-endian bytes.
#[inline(always)]
pub fn write_lanes_le(lanes: &[u64], bytes: &mut [u8]) {
    LittleEndian::write_u64_into(lanes, bytes);
}

/// Writes `value` as 8 little-endian bytes into `out[..8]`.
#[inline(always)]
pub fn write_u64_le(out: &mut [u8], value: u64) {
    LittleEndian::write_u64(out, value);
}

/// Compares two byte slices in constant time with respect to their contents.
///
/// Returns `false` immediately (in non-constant time) if the lengths differ,
/// since the length of a tag or ciphertext is never secret.
#[inline]
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}

/// Increments a little-endian multi-byte counter in place by one, propagating
/// carry across the whole buffer. Used to advance the RCS nonce by one block
/// after every 32-byte keystream block produced.
#[inline]
pub fn le_increment(counter: &mut [u8]) {
    let mut i = 0;
    let mut carry = 1u16;

    while i < counter.len() && carry != 0 {
        let sum = counter[i] as u16 + carry;
        counter[i] = sum as u8;
        carry = sum >> 8;
        i += 1;
    }
}
