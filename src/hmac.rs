//! Generic HMAC over any [`HashAlgorithm`].
//!
//! This is hand-rolled rather than delegated to the `hmac` crate: the
//! HMAC construction generic over a pluggable hash is core subject
//! matter of this engine (it must work over Whirlpool, which has no
//! `hmac`-crate-compatible `digest::Digest + BlockSizeUser` wiring
//! bundled by default), not an external collaborator.

use crate::hash::HashAlgorithm;

/// Compute `HMAC(key, message)` using hash primitive `H`.
///
/// Follows RFC 2104: a key longer than the hash's block size is first
/// replaced by its digest; the (possibly shortened) key is then
/// zero-padded to the block size and combined with the inner/outer pad
/// constants `0x36`/`0x5c`.
pub fn hmac<H: HashAlgorithm>(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut key = key.to_vec();
    if key.len() > H::BLOCK_SIZE {
        let mut hasher = H::default();
        hasher.update(&key);
        key = hasher.finalize();
    }
    key.resize(H::BLOCK_SIZE, 0);

    let mut ipad = vec![0x36u8; H::BLOCK_SIZE];
    let mut opad = vec![0x5cu8; H::BLOCK_SIZE];
    for i in 0..H::BLOCK_SIZE {
        ipad[i] ^= key[i];
        opad[i] ^= key[i];
    }

    let mut inner = H::default();
    inner.update(&ipad);
    inner.update(message);
    let inner_digest = inner.finalize();

    let mut outer = H::default();
    outer.update(&opad);
    outer.update(&inner_digest);
    outer.finalize()
}
