//! **tcvault** - a read-only decryption engine for legacy TrueCrypt
//! volumes.
//!
//! Given a volume file and a passphrase, [`unlock::unlock`] brute-forces
//! the `(hash, cipher cascade, normal/hidden variant)` combination that
//! decrypts the volume header, then [`volume::UnlockedVolume`] exposes a
//! random-access, sector-granular decrypt API over the body.
//!
//! # Layout
//! | Module | Responsibility |
//! |--------|-----------------|
//! | [`gf128`]  | Multiplication in the binary field GF(2^128) |
//! | [`hash`]   | Adapters over the pluggable hash primitives |
//! | [`hmac`]   | HMAC generic over [`hash::HashAlgorithm`] |
//! | [`pbkdf2`] | PBKDF2 generic over an HMAC hash |
//! | [`lrw`]    | The LRW tweakable block-cipher mode |
//! | [`cipher`] | Block ciphers and the cipher-cascade chain |
//! | [`header`] | The decrypted volume header and its key pool |
//! | [`source`] | The random-access byte source abstraction |
//! | [`unlock`] | The brute-force volume-unlock probe |
//! | [`volume`] | The unlocked-volume handle and sector reader |

pub mod cipher;
pub mod error;
pub mod gf128;
pub mod hash;
pub mod header;
pub mod hmac;
pub mod lrw;
pub mod pbkdf2;
pub mod source;
pub mod unlock;
mod utils;
pub mod volume;

pub use error::{Error, Result};
pub use source::VolumeSource;
pub use unlock::unlock;
pub use volume::UnlockedVolume;
