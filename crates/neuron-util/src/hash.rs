use sha1::{Digest, Sha1};

/// Number of hex characters kept by [`short_hash`].
pub const SHORT_HASH_LEN: usize = 8;

/// Compute the SHA-1 hash of a byte slice, returning a lowercase hex string.
pub fn sha1_hex(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// The first [`SHORT_HASH_LEN`] hex characters of the SHA-1 of `data`.
pub fn short_hash(data: &[u8]) -> String {
    let mut hex = sha1_hex(data);
    hex.truncate(SHORT_HASH_LEN);
    hex
}
