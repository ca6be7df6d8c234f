//! Arithmetic in GF(2¹²⁸), the finite field underlying the LRW tweak.
//!
//! Field elements are represented as `u128`, bit *i* holding the
//! coefficient of `x^i`. The reduction polynomial is
//! `p(x) = x^128 + x^7 + x^2 + x + 1`; since its only terms above `x^127`
//! are the leading `x^128`, reducing a 256-bit product only ever needs
//! to fold the low byte of `p` (`0x87`) back in, one overflowing bit at
//! a time.

/// Multiply two field elements, reducing modulo `x^128+x^7+x^2+x+1`.
///
/// Carry-less (polynomial) multiply followed by reduction. This mirrors
/// the bit-at-a-time shift-and-XOR approach used for GF(2^8) multiply in
/// AES MixColumns, generalized to 128 bits and a 256-bit intermediate
/// product held as two `u128` halves (`hi`, `lo`).
pub fn mul(a: u128, b: u128) -> u128 {
    let mut hi: u128 = 0;
    let mut lo: u128 = 0;

    for i in 0..128 {
        if (a >> i) & 1 != 0 {
            // XOR in `b` shifted left by `i`, split across the 256-bit
            // accumulator (hi:lo).
            if i == 0 {
                lo ^= b;
            } else {
                lo ^= b << i;
                hi ^= b >> (128 - i);
            }
        }
    }

    // Reduce the 256-bit product (hi:lo) modulo p(x). Working from the
    // top bit down, each set bit above position 127 is cancelled by
    // XORing in p(x) shifted so its leading term lines up, which for
    // this p(x) only ever touches the low 8 bits (0x87) once the x^128
    // term itself has been cancelled.
    for i in (0..128).rev() {
        if (hi >> i) & 1 != 0 {
            hi ^= 1u128 << i;
            // p(x) without its x^128 term is 0x87, shifted left by i to
            // align with the bit we just cleared.
            if i == 0 {
                lo ^= 0x87;
                hi ^= 0; // no bits spill back into hi at i == 0
            } else {
                lo ^= 0x87u128 << i;
                hi ^= 0x87u128 >> (128 - i);
            }
        }
    }

    lo
}

/// Addition in GF(2¹²⁸) — characteristic 2, so this is XOR.
#[inline]
pub fn add(a: u128, b: u128) -> u128 {
    a ^ b
}

/// Subtraction in GF(2¹²⁸) — identical to [`add`] in characteristic 2.
#[inline]
pub fn sub(a: u128, b: u128) -> u128 {
    a ^ b
}
