//! Hash-primitive adapters.
//!
//! [`HashAlgorithm`] is the incremental-hash capability the HMAC and
//! PBKDF2 code in this crate is generic over (see [`crate::hmac`] and
//! [`crate::pbkdf2`]). The three concrete implementations below are
//! thin wrappers around RustCrypto's `digest::Digest` so that the rest
//! of this crate never has to name `sha1`/`ripemd`/`whirlpool` directly.

use digest::Digest;

/// An incremental hash primitive, usable as an HMAC/PBKDF2 oracle.
///
/// Mirrors the capability HMAC and PBKDF2 need from a hash primitive:
/// a way to start fresh, feed data incrementally, finish the digest,
/// and compile-time block/digest sizes.
pub trait HashAlgorithm: Default {
    /// Output size of the digest, in bytes.
    const DIGEST_SIZE: usize;
    /// Internal block size the hash operates on, in bytes.
    const BLOCK_SIZE: usize;

    /// Human-readable name, used for introspection (§4.L).
    const NAME: &'static str;

    /// Feed more data into the running hash state.
    fn update(&mut self, data: &[u8]);

    /// Consume the hasher and produce the digest.
    fn finalize(self) -> Vec<u8>;
}

macro_rules! digest_adapter {
    ($name:ident, $inner:ty, $digest_size:expr, $block_size:expr, $label:expr) => {
        /// Adapter wrapping a RustCrypto digest as a [`HashAlgorithm`].
        #[derive(Default, Clone)]
        pub struct $name($inner);

        impl HashAlgorithm for $name {
            const DIGEST_SIZE: usize = $digest_size;
            const BLOCK_SIZE: usize = $block_size;
            const NAME: &'static str = $label;

            fn update(&mut self, data: &[u8]) {
                Digest::update(&mut self.0, data);
            }

            fn finalize(self) -> Vec<u8> {
                self.0.finalize().to_vec()
            }
        }
    };
}

digest_adapter!(Sha1State, sha1::Sha1, 20, 64, "SHA-1");
digest_adapter!(Ripemd160State, ripemd::Ripemd160, 20, 64, "RIPEMD-160");
digest_adapter!(WhirlpoolState, whirlpool::Whirlpool, 64, 64, "Whirlpool");
