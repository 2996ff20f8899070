//! Rijndael-256: the 32-byte wide-block member of the Rijndael family, run
//! only in the forward (encryption) direction since CTR mode needs nothing
//! else. Shares AES's S-box, round-key addition, and GF(2^8) MixColumns, but
//! widens `ShiftRows` to four 8-byte rows instead of AES's four 4-byte rows,
//! with row offsets `{0, 1, 3, 4}` rather than AES-128's `{0, 1, 2, 3}`.
//!
//! This is the scalar reference form. An AES-NI back-end (two `AESENC` halves
//! per round plus a shuffle/blend emulating the wide `ShiftRows`) would need
//! to produce bit-identical ciphertext to [`encrypt_block`] for every
//! key/nonce/plaintext triple; no such back-end is implemented here.

/// Block size in bytes.
pub const BLOCK_SIZE: usize = 32;
/// Columns per block row (`BLOCK_SIZE / 4` rows).
const COLUMNS: usize = BLOCK_SIZE / 4;

/// Forward AES S-box.
const S_BOX: [u8; 256] = [
    0x63, 0x7C, 0x77, 0x7B, 0xF2, 0x6B, 0x6F, 0xC5, 0x30, 0x01, 0x67, 0x2B, 0xFE, 0xD7, 0xAB, 0x76,
    0xCA, 0x82, 0xC9, 0x7D, 0xFA, 0x59, 0x47, 0xF0, 0xAD, 0xD4, 0xA2, 0xAF, 0x9C, 0xA4, 0x72, 0xC0,
    0xB7, 0xFD, 0x93, 0x26, 0x36, 0x3F, 0xF7, 0xCC, 0x34, 0xA5, 0xE5, 0xF1, 0x71, 0xD8, 0x31, 0x15,
    0x04, 0xC7, 0x23, 0xC3, 0x18, 0x96, 0x05, 0x9A, 0x07, 0x12, 0x80, 0xE2, 0xEB, 0x27, 0xB2, 0x75,
    0x09, 0x83, 0x2C, 0x1A, 0x1B, 0x6E, 0x5A, 0xA0, 0x52, 0x3B, 0xD6, 0xB3, 0x29, 0xE3, 0x2F, 0x84,
    0x53, 0xD1, 0x00, 0xED, 0x20, 0xFC, 0xB1, 0x5B, 0x6A, 0xCB, 0xBE, 0x39, 0x4A, 0x4C, 0x58, 0xCF,
    0xD0, 0xEF, 0xAA, 0xFB, 0x43, 0x4D, 0x33, 0x85, 0x45, 0xF9, 0x02, 0x7F, 0x50, 0x3C, 0x9F, 0xA8,
    0x51, 0xA3, 0x40, 0x8F, 0x92, 0x9D, 0x38, 0xF5, 0xBC, 0xB6, 0xDA, 0x21, 0x10, 0xFF, 0xF3, 0xD2,
    0xCD, 0x0C, 0x13, 0xEC, 0x5F, 0x97, 0x44, 0x17, 0xC4, 0xA7, 0x7E, 0x3D, 0x64, 0x5D, 0x19, 0x73,
    0x60, 0x81, 0x4F, 0xDC, 0x22, 0x2A, 0x90, 0x88, 0x46, 0xEE, 0xB8, 0x14, 0xDE, 0x5E, 0x0B, 0xDB,
    0xE0, 0x32, 0x3A, 0x0A, 0x49, 0x06, 0x24, 0x5C, 0xC2, 0xD3, 0xAC, 0x62, 0x91, 0x95, 0xE4, 0x79,
    0xE7, 0xC8, 0x37, 0x6D, 0x8D, 0xD5, 0x4E, 0xA9, 0x6C, 0x56, 0xF4, 0xEA, 0x65, 0x7A, 0xAE, 0x08,
    0xBA, 0x78, 0x25, 0x2E, 0x1C, 0xA6, 0xB4, 0xC6, 0xE8, 0xDD, 0x74, 0x1F, 0x4B, 0xBD, 0x8B, 0x8A,
    0x70, 0x3E, 0xB5, 0x66, 0x48, 0x03, 0xF6, 0x0E, 0x61, 0x35, 0x57, 0xB9, 0x86, 0xC1, 0x1D, 0x9E,
    0xE1, 0xF8, 0x98, 0x11, 0x69, 0xD9, 0x8E, 0x94, 0x9B, 0x1E, 0x87, 0xE9, 0xCE, 0x55, 0x28, 0xDF,
    0x8C, 0xA1, 0x89, 0x0D, 0xBF, 0xE6, 0x42, 0x68, 0x41, 0x99, 0x2D, 0x0F, 0xB0, 0x54, 0xBB, 0x16,
];

/// Row shift offsets: row 0 is untouched; row `r` is rotated left by
/// `SHIFT_OFFSETS[r]` columns out of [`COLUMNS`]. AES-128 uses `{0,1,2,3}`
/// over 4 columns; widening the block to 8 columns uses `{0,1,3,4}` instead
/// of `{0,1,2,3}` so that no row shift is a no-op modulo the wider block.
const SHIFT_OFFSETS: [usize; 4] = [0, 1, 3, 4];

#[inline(always)]
fn xtime(a: u8) -> u8 {
    let hi = a & 0x80 != 0;
    let shifted = a.wrapping_shl(1);
    if hi {
        shifted ^ 0x1B
    } else {
        shifted
    }
}

#[inline(always)]
fn gmul(a: u8, b: u8) -> u8 {
    let mut a = a;
    let mut b = b;
    let mut result = 0u8;
    for _ in 0..8 {
        if b & 1 != 0 {
            result ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    result
}

fn add_round_key(state: &mut [u8; BLOCK_SIZE], round_key: &[u8]) {
    for (s, k) in state.iter_mut().zip(round_key.iter()) {
        *s ^= k;
    }
}

fn sub_bytes(state: &mut [u8; BLOCK_SIZE]) {
    for b in state.iter_mut() {
        *b = S_BOX[*b as usize];
    }
}

/// Column-major indexing: byte `row + 4*col` holds row `row`, column `col`.
fn shift_rows(state: &mut [u8; BLOCK_SIZE]) {
    let original = *state;
    for row in 0..4 {
        let offset = SHIFT_OFFSETS[row];
        for col in 0..COLUMNS {
            state[col * 4 + row] = original[((col + offset) % COLUMNS) * 4 + row];
        }
    }
}

fn mix_columns(state: &mut [u8; BLOCK_SIZE]) {
    for col in 0..COLUMNS {
        let i = col * 4;
        let s0 = state[i];
        let s1 = state[i + 1];
        let s2 = state[i + 2];
        let s3 = state[i + 3];

        state[i] = gmul(s0, 2) ^ gmul(s1, 3) ^ s2 ^ s3;
        state[i + 1] = s0 ^ gmul(s1, 2) ^ gmul(s2, 3) ^ s3;
        state[i + 2] = s0 ^ s1 ^ gmul(s2, 2) ^ gmul(s3, 3);
        state[i + 3] = gmul(s0, 3) ^ s1 ^ s2 ^ gmul(s3, 2);
    }
}

/// Encrypts one 32-byte block under an already-expanded round-key schedule.
/// `round_keys` holds `(rounds + 1)` 32-byte round keys back to back. The
/// final round omits `mix_columns`, as in standard Rijndael.
pub fn encrypt_block(output: &mut [u8; BLOCK_SIZE], input: &[u8; BLOCK_SIZE], round_keys: &[u8], rounds: usize) {
    debug_assert_eq!(round_keys.len(), (rounds + 1) * BLOCK_SIZE);

    let mut state = *input;
    add_round_key(&mut state, &round_keys[..BLOCK_SIZE]);

    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, &round_keys[round * BLOCK_SIZE..(round + 1) * BLOCK_SIZE]);
    }

    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, &round_keys[rounds * BLOCK_SIZE..(rounds + 1) * BLOCK_SIZE]);

    *output = state;
}
