//! RCS: Rijndael-256 in an authenticated CTR stream mode, keyed and MAC'd
//! through cSHAKE/KMAC over Keccak-_f_[1600].
//!
//! This crate builds the cipher from its FIPS 202 / SP 800-185 foundations
//! up:
//!
//! - [`keccak`] — the Keccak-_f_[1600] permutation (two independent,
//!   bit-identical implementations) and the rate-based sponge built on it.
//! - [`sha3`] — SHA3-256/512 and SHAKE-128/256/512.
//! - [`cshake`] — cSHAKE-128/256/512 (SP 800-185).
//! - [`kmac`] — KMAC-128/256/512 (SP 800-185), the MAC used by [`rcs`].
//! - [`kpa`] *(feature `kpa`)* — an 8-way parallel MAC alternative to KMAC.
//! - [`rijndael256`] — the 32-byte wide-block Rijndael round function.
//! - [`rcs`] — the AEAD stream cipher itself: [`rcs::RcsState`].
//!
//! ```
//! use rcs::rcs::{RcsState, RcsVariant};
//!
//! let key = [0x2Au8; 32];
//! let nonce = [0u8; 32];
//! let plaintext = b"hello, authenticated world";
//!
//! let mut ciphertext = vec![0u8; plaintext.len() + RcsVariant::Rcs256.mac_len()];
//! let mut sealer = RcsState::initialize(RcsVariant::Rcs256, &key, nonce, b"", true);
//! assert!(sealer.transform(&mut ciphertext, plaintext));
//!
//! let mut recovered = vec![0u8; plaintext.len()];
//! let mut opener = RcsState::initialize(RcsVariant::Rcs256, &key, nonce, b"", false);
//! assert!(opener.transform(&mut recovered, &ciphertext));
//! assert_eq!(recovered, plaintext);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod cshake;
pub mod endian;
pub mod keccak;
pub mod kmac;
#[cfg(feature = "kpa")]
pub mod kpa;
pub mod rcs;
pub mod rijndael256;
pub mod sha3;
