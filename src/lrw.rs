//! The LRW tweakable block-cipher mode.
//!
//! `C_i = E_K1(P_i XOR (K2 · i)) XOR (K2 · i)`, where `K2 · i` is
//! multiplication in GF(2¹²⁸) (see [`crate::gf128`]) and `E_K1` is
//! already keyed. Because the tweak `T = K2 · i` is XORed on both sides
//! of the cipher call, decrypting is the same shape with `E` replaced by
//! its inverse — the mode is self-dual under cipher inversion.

use crate::gf128;

/// Block size LRW operates on, in bytes.
pub const BLOCK_SIZE: usize = 16;

fn xor16(a: &[u8; 16], b: &[u8; 16]) -> [u8; 16] {
    let mut out = [0u8; 16];
    for i in 0..16 {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// Encode a GF(2¹²⁸) element as 16 big-endian bytes.
fn tweak_bytes(t: u128) -> [u8; 16] {
    t.to_be_bytes()
}

/// Decode 16 big-endian bytes as a GF(2¹²⁸) element.
fn tweak_key(bytes: &[u8; 16]) -> u128 {
    u128::from_be_bytes(*bytes)
}

/// Apply one LRW transform to a single 16-byte block.
///
/// `cipher_op` is the already-keyed single-block transform (encrypt or
/// decrypt — LRW is symmetric in which one is supplied). `lrw_key` is
/// the 16-byte tweak key `K2`. `index` is the 1-based LRW block index.
pub fn lrw(cipher_op: impl FnOnce([u8; 16]) -> [u8; 16], lrw_key: &[u8; 16], index: u128, block: &[u8; 16]) -> [u8; 16] {
    let k2 = tweak_key(lrw_key);
    let t = tweak_bytes(gf128::mul(k2, index));
    let whitened_in = xor16(&t, block);
    let ciphered = cipher_op(whitened_in);
    xor16(&t, &ciphered)
}

/// Apply LRW to a multiple of 16 bytes, one independent block at a time.
///
/// `index_start` is the LRW index of the first block; subsequent blocks
/// use `index_start + k` for the k-th 16-byte sub-block (0-based).
///
/// # Panics
///
/// Panics if `data.len()` is not a multiple of [`BLOCK_SIZE`] or if
/// `index_start == 0` — both are programming errors, not recoverable
/// input conditions.
pub fn lrw_many(
    mut cipher_op: impl FnMut([u8; 16]) -> [u8; 16],
    lrw_key: &[u8; 16],
    index_start: u128,
    data: &[u8],
) -> Vec<u8> {
    assert!(
        data.len() % BLOCK_SIZE == 0,
        "lrw_many: data length must be a multiple of {BLOCK_SIZE}"
    );
    assert!(index_start >= 1, "lrw_many: index_start must be 1-based");

    let mut out = Vec::with_capacity(data.len());
    for (k, chunk) in data.chunks_exact(BLOCK_SIZE).enumerate() {
        let mut block = [0u8; 16];
        block.copy_from_slice(chunk);
        let transformed = lrw(&mut cipher_op, lrw_key, index_start + k as u128, &block);
        out.extend_from_slice(&transformed);
    }
    out
}
