//! Ring point (token) type and the hashing primitives that produce it.
//!
//! Every point on the ring is a `u32` read little-endian out of an MD5
//! digest. Lookup keys use the first 4-byte window; virtual nodes use the
//! first three (see [`crate::vnode`]).

use md5::{Digest, Md5};
use std::fmt;

/// Size of an MD5 digest in bytes.
pub const DIGEST_LEN: usize = 16;

/// Width of one ring point window inside a digest.
pub const WINDOW_LEN: usize = 4;

/// A position on the 32-bit ring.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct HashKey(pub u32);

impl HashKey {
    /// Ring point for an arbitrary lookup key: first window of its digest.
    pub fn from_key(key: &str) -> Self {
        Self::from_window(&digest(key), 0)
    }

    /// Decodes the `index`-th 4-byte little-endian window of `digest`.
    ///
    /// `index` must be below `DIGEST_LEN / WINDOW_LEN`.
    #[inline]
    pub fn from_window(digest: &[u8; DIGEST_LEN], index: usize) -> Self {
        let off = index * WINDOW_LEN;
        HashKey(u32::from_le_bytes([
            digest[off],
            digest[off + 1],
            digest[off + 2],
            digest[off + 3],
        ]))
    }

    /// Clockwise distance from `self` to `other`, wrapping at `u32::MAX`.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> u32 {
        other.0.wrapping_sub(self.0)
    }
}

impl From<u32> for HashKey {
    fn from(value: u32) -> Self {
        HashKey(value)
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// MD5 digest of `key`. The same key always yields the same bytes.
pub fn digest(key: &str) -> [u8; DIGEST_LEN] {
    Md5::digest(key.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn digest_matches_rfc1321_vectors() {
        assert_eq!(hex(&digest("")), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(hex(&digest("a")), "0cc175b9c0f1b6a831c399e269772661");
        assert_eq!(hex(&digest("abc")), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(
            hex(&digest("message digest")),
            "f96b697d7cb7938d525a2f31aaf161d0"
        );
    }

    #[test]
    fn digest_is_stable() {
        let first = digest("whatever");
        for _ in 0..10 {
            assert_eq!(digest("whatever"), first);
        }
    }

    #[test]
    fn windows_are_little_endian() {
        // md5("") = d4 1d 8c d9 | 8f 00 b2 04 | e9 80 09 98 | ec f8 42 7e
        let d = digest("");
        assert_eq!(HashKey::from_window(&d, 0), HashKey(0xd98c1dd4));
        assert_eq!(HashKey::from_window(&d, 1), HashKey(0x04b2008f));
        assert_eq!(HashKey::from_window(&d, 2), HashKey(0x980980e9));
        assert_eq!(HashKey::from_key(""), HashKey(0xd98c1dd4));
    }

    #[test]
    fn distance_wraps() {
        assert_eq!(HashKey(100).distance_to(&HashKey(300)), 200);
        assert_eq!(HashKey(u32::MAX).distance_to(&HashKey(0)), 1);
        assert_eq!(HashKey(5).distance_to(&HashKey(5)), 0);
    }

    #[test]
    fn display_is_zero_padded_hex() {
        assert_eq!(HashKey(0xab).to_string(), "000000ab");
    }
}
