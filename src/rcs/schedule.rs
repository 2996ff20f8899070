//! The RCS key schedule: deriving the Rijndael-256 round-key array and the
//! initial KMAC key from the caller's key via cSHAKE, and the forward-secret
//! MAC-key rotation applied after every `transform` call.

use crate::cshake::{CShake256, CShake512};
use crate::endian::write_u64_le;

/// RCS-256 round count (fixed; not user-configurable).
pub const RCS256_ROUNDS: usize = 22;
/// RCS-512 round count (fixed; not user-configurable).
pub const RCS512_ROUNDS: usize = 30;

/// `(RCS256_ROUNDS + 1) * 32`: the byte length of the RCS-256 round-key array.
pub const RCS256_ROUNDKEY_LEN: usize = (RCS256_ROUNDS + 1) * 32;
/// `(RCS512_ROUNDS + 1) * 32`: the byte length of the RCS-512 round-key array.
pub const RCS512_ROUNDKEY_LEN: usize = (RCS512_ROUNDS + 1) * 32;

/// 17-byte customization-independent name tag identifying RCS-256 on the
/// canonical KMAC-authenticated path (as opposed to the legacy
/// HMAC-authenticated path, which uses `0x48` in place of the `0x4B` below).
pub const RCS256_NAME: [u8; 17] = [
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x52, 0x43, 0x53, 0x4B, 0x32, 0x35,
    0x36,
];

/// 17-byte name tag identifying RCS-512 on the KMAC-authenticated path.
pub const RCS512_NAME: [u8; 17] = [
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x52, 0x43, 0x53, 0x4B, 0x35, 0x31,
    0x32,
];

/// Squeezes `round_keys.len()` bytes of Rijndael-256 round-key material
/// followed by `mac_key.len()` bytes of MAC key from a single cSHAKE-256
/// instance keyed with `key`, customized with `info`, and named with
/// [`RCS256_NAME`].
///
/// The two outputs are drawn from one continuous squeeze stream (cSHAKE's
/// sponge has no operation to "skip ahead"), which still gives cipher-key /
/// MAC-key separation since the two regions never overlap.
pub fn expand_rcs256(key: &[u8], info: &[u8], round_keys: &mut [u8], mac_key: &mut [u8]) {
    let mut cshake = CShake256::new(&RCS256_NAME, info);
    cshake.absorb(key);
    cshake.squeeze(round_keys);
    cshake.squeeze(mac_key);
}

/// Same derivation as [`expand_rcs256`], but over cSHAKE-512 and
/// [`RCS512_NAME`].
pub fn expand_rcs512(key: &[u8], info: &[u8], round_keys: &mut [u8], mac_key: &mut [u8]) {
    let mut cshake = CShake512::new(&RCS512_NAME, info);
    cshake.absorb(key);
    cshake.squeeze(round_keys);
    cshake.squeeze(mac_key);
}

/// Rotates the MAC key forward: `new_key = cSHAKE(old_key, name_tag_with_counter, info)`,
/// where the name tag's first 8 bytes carry `le64(session_counter)` in place
/// of its usual leading zero bytes. This makes every transform's MAC key
/// depend on how many bytes the session has processed so far, so repeating a
/// nonce across two `transform` calls still produces unrelated tags.
pub fn rotate_mac_key_256(mac_key: &mut [u8], counter: u64, info: &[u8]) {
    let mut name = RCS256_NAME;
    write_u64_le(&mut name[..8], counter);

    let mut cshake = CShake256::new(&name, info);
    cshake.absorb(mac_key);
    cshake.squeeze(mac_key);
}

/// Rotates the MAC key forward for RCS-512, analogous to
/// [`rotate_mac_key_256`].
pub fn rotate_mac_key_512(mac_key: &mut [u8], counter: u64, info: &[u8]) {
    let mut name = RCS512_NAME;
    write_u64_le(&mut name[..8], counter);

    let mut cshake = CShake512::new(&name, info);
    cshake.absorb(mac_key);
    cshake.squeeze(mac_key);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_rcs256_is_deterministic() {
        let key = [0x11u8; 32];
        let info = b"test-info";
        let mut rk_a = [0u8; RCS256_ROUNDKEY_LEN];
        let mut mk_a = [0u8; 32];
        expand_rcs256(&key, info, &mut rk_a, &mut mk_a);

        let mut rk_b = [0u8; RCS256_ROUNDKEY_LEN];
        let mut mk_b = [0u8; 32];
        expand_rcs256(&key, info, &mut rk_b, &mut mk_b);

        assert_eq!(rk_a, rk_b);
        assert_eq!(mk_a, mk_b);
        assert_ne!(rk_a[..32], mk_a[..]);
    }

    #[test]
    fn rotate_mac_key_changes_the_key() {
        let mut key = [0x22u8; 32];
        let before = key;
        rotate_mac_key_256(&mut key, 1, b"info");
        assert_ne!(key, before);

        let mut key_counter_2 = before;
        rotate_mac_key_256(&mut key_counter_2, 2, b"info");
        assert_ne!(key, key_counter_2);
    }
}
