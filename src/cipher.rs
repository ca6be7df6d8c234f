//! Block ciphers and the cipher-cascade chain.
//!
//! Rijndael-128 (AES-256), Serpent, and Twofish are treated as external
//! collaborators — this module only adapts the RustCrypto crates that
//! implement them to this crate's own [`BlockCipher`] capability, and
//! builds the ordered cascade on top.

use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

/// A single-block cipher, already keyed, operating on 16-byte blocks
/// with a 256-bit key.
pub trait BlockCipher {
    /// Install a 256-bit key.
    fn new(key: &[u8; 32]) -> Self
    where
        Self: Sized;

    /// Encrypt one 16-byte block in place.
    fn encrypt_block(&self, block: &mut [u8; 16]);

    /// Decrypt one 16-byte block in place.
    fn decrypt_block(&self, block: &mut [u8; 16]);

    /// This cipher's name, for cascade introspection.
    fn name(&self) -> &'static str;

    /// Convenience: encrypt a block by value (used as an `FnMut` target
    /// for [`crate::lrw::lrw_many`]).
    fn encrypt_block_copy(&self, mut block: [u8; 16]) -> [u8; 16] {
        self.encrypt_block(&mut block);
        block
    }

    /// Convenience: decrypt a block by value.
    fn decrypt_block_copy(&self, mut block: [u8; 16]) -> [u8; 16] {
        self.decrypt_block(&mut block);
        block
    }
}

macro_rules! rustcrypto_block_cipher {
    ($name:ident, $inner:ty, $label:expr) => {
        #[doc = concat!("256-bit-keyed ", $label, ", adapted to [`BlockCipher`].")]
        pub struct $name($inner);

        impl BlockCipher for $name {
            fn new(key: &[u8; 32]) -> Self {
                $name(<$inner as KeyInit>::new(GenericArray::from_slice(key)))
            }

            fn encrypt_block(&self, block: &mut [u8; 16]) {
                let mut ga = *GenericArray::from_slice(&block[..]);
                BlockEncrypt::encrypt_block(&self.0, &mut ga);
                block.copy_from_slice(&ga);
            }

            fn decrypt_block(&self, block: &mut [u8; 16]) {
                let mut ga = *GenericArray::from_slice(&block[..]);
                BlockDecrypt::decrypt_block(&self.0, &mut ga);
                block.copy_from_slice(&ga);
            }

            fn name(&self) -> &'static str {
                $label
            }
        }
    };
}

rustcrypto_block_cipher!(Rijndael, aes::Aes256, "Rijndael");
rustcrypto_block_cipher!(SerpentCipher, serpent::Serpent, "Serpent");
rustcrypto_block_cipher!(TwofishCipher, twofish::Twofish, "Twofish");

/// Which concrete cipher occupies a cascade slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherKind {
    Rijndael,
    Serpent,
    Twofish,
}

impl CipherKind {
    fn keyed(self, key: &[u8; 32]) -> Box<dyn BlockCipher> {
        match self {
            CipherKind::Rijndael => Box::new(Rijndael::new(key)),
            CipherKind::Serpent => Box::new(SerpentCipher::new(key)),
            CipherKind::Twofish => Box::new(TwofishCipher::new(key)),
        }
    }
}

/// The 8 fixed cipher cascades the unlocker tries, in a stable order
/// so resuming a search from a known cascade index is reproducible.
pub const CASCADES: [&[CipherKind]; 8] = [
    &[CipherKind::Rijndael],
    &[CipherKind::Serpent],
    &[CipherKind::Twofish],
    &[CipherKind::Twofish, CipherKind::Rijndael],
    &[CipherKind::Serpent, CipherKind::Twofish, CipherKind::Rijndael],
    &[CipherKind::Rijndael, CipherKind::Serpent],
    &[CipherKind::Rijndael, CipherKind::Twofish, CipherKind::Serpent],
    &[CipherKind::Serpent, CipherKind::Twofish],
];

/// An ordered cascade of 1-3 block ciphers, applied outer-to-inner on
/// encrypt and inner-to-outer on decrypt.
pub struct CipherChain {
    kinds: &'static [CipherKind],
    ciphers: Vec<Box<dyn BlockCipher>>,
}

impl CipherChain {
    /// Build an unkeyed chain for the given cascade.
    pub fn new(kinds: &'static [CipherKind]) -> Self {
        CipherChain {
            kinds,
            ciphers: Vec::new(),
        }
    }

    /// Install one 256-bit key per cipher in the cascade. `keys` may
    /// contain more entries than the cascade needs; for shorter
    /// cascades, trailing keys are simply ignored.
    pub fn set_keys(&mut self, keys: &[[u8; 32]]) {
        assert!(
            keys.len() >= self.kinds.len(),
            "CipherChain::set_keys: not enough key material for this cascade"
        );
        self.ciphers = self
            .kinds
            .iter()
            .zip(keys.iter())
            .map(|(kind, key)| kind.keyed(key))
            .collect();
    }

    /// Encrypt one 16-byte block: `C_1`, then `C_2`, ..., then `C_n`.
    pub fn encrypt_block(&self, block: [u8; 16]) -> [u8; 16] {
        self.ciphers
            .iter()
            .fold(block, |b, cipher| cipher.encrypt_block_copy(b))
    }

    /// Decrypt one 16-byte block: `C_n`, then `C_{n-1}`, ..., then `C_1`.
    pub fn decrypt_block(&self, block: [u8; 16]) -> [u8; 16] {
        self.ciphers
            .iter()
            .rev()
            .fold(block, |b, cipher| cipher.decrypt_block_copy(b))
    }

    /// Cascade name for introspection, outer-to-inner on encrypt order
    /// reversed to read inner-to-outer, matching the Python original's
    /// `CipherChain.get_name()`.
    pub fn name(&self) -> String {
        self.ciphers
            .iter()
            .rev()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join("-")
    }
}
