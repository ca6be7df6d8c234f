//! The 448-byte decrypted volume header and the 128-byte key pool it
//! carries at offset 192.
//!
//! Layout (all integers big-endian):
//!
//! ```text
//! [0x00]  4   magic                    must equal ASCII "TRUE"
//! [0x04]  2   format version           observational
//! [0x06]  2   minimum program version  observational
//! [0x08]  4   CRC-32 of [0xC0..0x1C0)  must match the stored value
//! [0x0C]  8   volume-creation FILETIME observational
//! [0x14]  8   header-creation FILETIME observational
//! [0x1C]  8   hidden-volume size       zero for normal volumes
//! [0xC0]  256 master key pool          only the first 128 bytes are used
//! ```

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::utils::{be_u16, be_u32, be_u64, crc32, filetime_to_unix};

/// Total size of the encrypted/decrypted header region.
pub const HEADER_SIZE: usize = 448;

/// Byte offset within the decrypted header of the master key pool.
pub const KEY_POOL_OFFSET: usize = 192;

/// Size in bytes of the key-deriving portion of a PBKDF2 output: a
/// 16-byte LRW tweak key, 16 reserved bytes, and three 32-byte cipher
/// keys.
pub const KEY_POOL_SIZE: usize = 128;

/// Whether `header` (exactly [`HEADER_SIZE`] bytes) is a valid,
/// CRC-checked TrueCrypt volume header.
///
/// Checks the `TRUE` magic at offset 0 and that the stored CRC-32 at
/// offset 8 matches the computed CRC-32 of bytes `[192..448)`.
pub fn is_valid_header(header: &[u8]) -> bool {
    if header.len() != HEADER_SIZE {
        return false;
    }
    if &header[0..4] != b"TRUE" {
        return false;
    }
    let stored_crc = be_u32(&header[8..12]);
    crc32(&header[192..448]) == stored_crc
}

/// A 128-byte key pool, the output of PBKDF2 (or the first 128 bytes of
/// a decrypted header's 256-byte master key pool field), split into an
/// LRW tweak key and up to three 256-bit cipher keys.
///
/// Zeroized on drop: this is the only place keying material is held for
/// any length of time outside of a keyed cipher's own key schedule.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyPool([u8; KEY_POOL_SIZE]);

impl KeyPool {
    /// Wrap raw PBKDF2 output (or a header's key-pool bytes) as a [`KeyPool`].
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len() < KEY_POOL_SIZE`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buf = [0u8; KEY_POOL_SIZE];
        buf.copy_from_slice(&bytes[..KEY_POOL_SIZE]);
        KeyPool(buf)
    }

    /// The 16-byte LRW tweak key at `[0..16)`.
    pub fn tweak_key(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out.copy_from_slice(&self.0[0..16]);
        out
    }

    /// The 256-bit key for cipher slot `n` (0-based, `n < 3`) at
    /// `[32 + 32*n .. 64 + 32*n)`.
    pub fn cipher_key(&self, n: usize) -> [u8; 32] {
        assert!(n < 3, "KeyPool::cipher_key: only 3 cipher slots exist");
        let start = 32 + 32 * n;
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.0[start..start + 32]);
        out
    }

    /// All three cipher keys, in slot order.
    pub fn cipher_keys(&self) -> [[u8; 32]; 3] {
        [self.cipher_key(0), self.cipher_key(1), self.cipher_key(2)]
    }
}

/// A CRC-validated decrypted header, retained on an unlocked volume for
/// introspection.
#[derive(Clone)]
pub struct DecryptedHeader {
    bytes: [u8; HEADER_SIZE],
}

impl DecryptedHeader {
    /// Wrap already-validated decrypted header bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len() != HEADER_SIZE`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert_eq!(bytes.len(), HEADER_SIZE);
        let mut buf = [0u8; HEADER_SIZE];
        buf.copy_from_slice(bytes);
        DecryptedHeader { bytes: buf }
    }

    /// Raw header bytes.
    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.bytes
    }

    /// Format version field at offset 4.
    pub fn format_version(&self) -> u16 {
        be_u16(&self.bytes[4..6])
    }

    /// Minimum program version field at offset 6.
    pub fn min_program_version(&self) -> u16 {
        be_u16(&self.bytes[6..8])
    }

    /// Volume-creation timestamp, converted from FILETIME to Unix time.
    pub fn volume_created_at(&self) -> i64 {
        filetime_to_unix(be_u64(&self.bytes[12..20]))
    }

    /// Header-creation timestamp, converted from FILETIME to Unix time.
    pub fn header_created_at(&self) -> i64 {
        filetime_to_unix(be_u64(&self.bytes[20..28]))
    }

    /// Hidden-volume size in bytes; zero for a normal volume.
    pub fn hidden_size(&self) -> u64 {
        be_u64(&self.bytes[28..36])
    }

    /// The master key pool carried at offset 192 (first 128 of its 256
    /// bytes are the ones actually used).
    pub fn master_key_pool(&self) -> KeyPool {
        KeyPool::from_bytes(&self.bytes[KEY_POOL_OFFSET..])
    }
}
