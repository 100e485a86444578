use std::fmt;

use sha1::{Digest, Sha1};

use crate::{HEX_CHARS, PREFIX_LEN, SUFFIX_LEN};

/// SHA1 digest of a password, split into the prefix sent to the range API and
/// the suffix that never leaves the process.
///
/// Both halves are uppercase hex. The password itself is not kept.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PasswordDigest {
    prefix: [u8; PREFIX_LEN],
    suffix: [u8; SUFFIX_LEN],
}

impl PasswordDigest {
    /// Hashes the UTF-8 bytes of `password` and splits the hex digest 5/35.
    ///
    /// Callers are expected to reject empty passwords before getting here.
    pub fn split(password: &str) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(password.as_bytes());
        let hash: [u8; 20] = hasher.finalize().into();

        Self::from_sha1(&hash)
    }

    /// Builds the split hex form from a raw 20-byte SHA1 digest.
    pub fn from_sha1(hash: &[u8; 20]) -> Self {
        let mut hex = [0u8; PREFIX_LEN + SUFFIX_LEN];
        for (i, byte) in hash.iter().enumerate() {
            hex[i * 2] = HEX_CHARS[(byte >> 4) as usize];
            hex[i * 2 + 1] = HEX_CHARS[(byte & 0x0f) as usize];
        }

        let mut prefix = [0u8; PREFIX_LEN];
        let mut suffix = [0u8; SUFFIX_LEN];
        prefix.copy_from_slice(&hex[..PREFIX_LEN]);
        suffix.copy_from_slice(&hex[PREFIX_LEN..]);

        Self { prefix, suffix }
    }

    /// The first 5 hex characters, the only part of the digest sent out.
    #[inline]
    pub fn prefix(&self) -> &str {
        // SAFETY: every byte was taken from HEX_CHARS, which is ASCII
        unsafe { std::str::from_utf8_unchecked(&self.prefix) }
    }

    /// The remaining 35 hex characters, matched locally.
    #[inline]
    pub fn suffix(&self) -> &str {
        // SAFETY: every byte was taken from HEX_CHARS, which is ASCII
        unsafe { std::str::from_utf8_unchecked(&self.suffix) }
    }
}

// The suffix is left out so a stray `{:?}` never writes the full digest to a log.
impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("prefix", &self.prefix())
            .finish_non_exhaustive()
    }
}
