//! PBKDF2 key derivation, parametric over the HMAC hash.
//!
//! Hand-rolled for the same reason as [`crate::hmac`]: this crate needs
//! PBKDF2 over Whirlpool, which the `pbkdf2` crate on crates.io does not
//! support out of the box, and RFC 2898's iterated-HMAC loop is small
//! enough that reimplementing it here keeps the hash plumbing uniform
//! across SHA-1, RIPEMD-160, and Whirlpool.

use crate::hash::HashAlgorithm;
use crate::hmac::hmac;

/// Derive `dk_len` bytes of keying material from `password`/`salt` using
/// `iterations` rounds of HMAC-`H`.
///
/// # Panics
///
/// Panics if `iterations == 0` — a zero iteration count is a
/// programming error, not a recoverable input condition.
pub fn pbkdf2<H: HashAlgorithm>(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    dk_len: usize,
) -> Vec<u8> {
    assert!(iterations > 0, "pbkdf2: iterations must be nonzero");

    let h_len = H::DIGEST_SIZE;
    let block_count = dk_len.div_ceil(h_len);

    let mut derived = Vec::with_capacity(block_count * h_len);
    for block_index in 1..=block_count as u32 {
        derived.extend_from_slice(&f::<H>(password, salt, iterations, block_index));
    }
    derived.truncate(dk_len);
    derived
}

/// `F(P, S, c, i)` from RFC 2898: `U_1 XOR U_2 XOR ... XOR U_c`.
fn f<H: HashAlgorithm>(password: &[u8], salt: &[u8], iterations: u32, block_index: u32) -> Vec<u8> {
    let mut salt_and_index = salt.to_vec();
    salt_and_index.extend_from_slice(&block_index.to_be_bytes());

    let mut u_prev = hmac::<H>(password, &salt_and_index);
    let mut result = u_prev.clone();
    for _ in 2..=iterations {
        let u_next = hmac::<H>(password, &u_prev);
        for (r, u) in result.iter_mut().zip(u_next.iter()) {
            *r ^= u;
        }
        u_prev = u_next;
    }
    result
}
