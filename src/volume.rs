//! The unlocked-volume handle and its random-access sector-decrypt API.

use crate::cipher::CipherChain;
use crate::error::{Error, Result};
use crate::header::DecryptedHeader;
use crate::lrw::lrw_many;
use crate::source::VolumeSource;

const SECTOR_SIZE: u64 = 512;
const HIDDEN_VOLUME_OFFSET: u64 = 1536;
const LRW_BLOCKS_PER_SECTOR: u128 = 32;

/// An unlocked TrueCrypt volume: owns the underlying source, the keyed
/// master cipher chain, the master LRW tweak key, and the CRC-validated
/// decrypted header for introspection.
///
/// Exclusive owner of its source for its whole lifetime - seeking then
/// reading is inherently non-reentrant, so this type is not `Sync`.
pub struct UnlockedVolume<S: VolumeSource> {
    source: S,
    chain: CipherChain,
    master_tweak_key: [u8; 16],
    header: DecryptedHeader,
    file_len: u64,
    hash_name: &'static str,
}

impl<S: VolumeSource> UnlockedVolume<S> {
    pub(crate) fn new(
        source: S,
        chain: CipherChain,
        master_tweak_key: [u8; 16],
        header: DecryptedHeader,
        file_len: u64,
        hash_name: &'static str,
    ) -> Self {
        UnlockedVolume {
            source,
            chain,
            master_tweak_key,
            header,
            file_len,
            hash_name,
        }
    }

    fn hidden_size(&self) -> u64 {
        self.header.hidden_size()
    }

    /// Decrypt and return the 512-byte sector at 1-based logical
    /// `index`. Returns an empty vector past the end of the volume.
    ///
    /// # Panics
    ///
    /// Panics if `index == 0` - sector indices are 1-based by
    /// definition; a zero index is a programming error, not a
    /// recoverable input condition.
    pub fn read_sector(&mut self, index: u64) -> Result<Vec<u8>> {
        assert!(index > 0, "read_sector: index is 1-based, 0 is invalid");

        let lrw_index = (u128::from(index) - 1) * LRW_BLOCKS_PER_SECTOR + 1;

        let hidden_size = self.hidden_size();
        let (base, last_sector_offset) = if hidden_size > 0 {
            (
                self.file_len - hidden_size - HIDDEN_VOLUME_OFFSET - SECTOR_SIZE,
                SECTOR_SIZE + HIDDEN_VOLUME_OFFSET,
            )
        } else {
            (0, SECTOR_SIZE)
        };
        let seek_to = base + SECTOR_SIZE * index;

        if seek_to > self.file_len - last_sector_offset {
            return Ok(Vec::new());
        }

        self.source.seek_from_start(seek_to)?;
        let ciphertext = self.source.read_exact_vec(SECTOR_SIZE as usize)?;
        let chain = &self.chain;
        Ok(lrw_many(
            |b| chain.decrypt_block(b),
            &self.master_tweak_key,
            lrw_index,
            &ciphertext,
        ))
    }

    /// Total number of sectors readable via [`Self::read_sector`].
    pub fn sector_count(&self) -> u64 {
        let hidden_size = self.hidden_size();
        if hidden_size > 0 {
            hidden_size / SECTOR_SIZE
        } else {
            (self.file_len - SECTOR_SIZE) / SECTOR_SIZE
        }
    }

    /// Name of the cipher cascade that unlocked this volume, e.g.
    /// `"Rijndael"` or `"Serpent-Twofish-Rijndael"`.
    pub fn cascade_name(&self) -> String {
        self.chain.name()
    }

    /// Name of the HMAC hash primitive that unlocked this volume, e.g.
    /// `"SHA-1"` or `"Whirlpool"`.
    pub fn hash_name(&self) -> &'static str {
        self.hash_name
    }

    /// Whether this volume is a hidden volume.
    pub fn is_hidden(&self) -> bool {
        self.hidden_size() > 0
    }

    /// Size of the hidden volume in bytes, or 0 for a normal volume.
    pub fn hidden_volume_size(&self) -> u64 {
        self.hidden_size()
    }

    /// On-disk format version recorded in the header.
    pub fn format_version(&self) -> u16 {
        self.header.format_version()
    }

    /// Minimum program version recorded in the header.
    pub fn min_program_version(&self) -> u16 {
        self.header.min_program_version()
    }

    /// Volume-creation time, as a Unix timestamp.
    pub fn volume_created_at(&self) -> i64 {
        self.header.volume_created_at()
    }

    /// Header-creation time, as a Unix timestamp.
    pub fn header_created_at(&self) -> i64 {
        self.header.header_created_at()
    }

    /// Lowercase hex rendering of the full 448-byte decrypted header,
    /// for diagnostics. Not security-critical: the header is public
    /// once unlocked.
    pub fn header_hex(&self) -> String {
        to_hex(self.header.as_bytes())
    }

    /// Lowercase hex rendering of the 128-byte master key pool.
    ///
    /// This *is* sensitive - it is the actual decryption key material
    /// for the volume body - and is exposed only for diagnostics at the
    /// caller's own discretion.
    pub fn master_pool_hex(&self) -> String {
        let pool = self.header.master_key_pool();
        let mut bytes = Vec::with_capacity(16 + 32 * 3);
        bytes.extend_from_slice(&pool.tweak_key());
        for key in pool.cipher_keys() {
            bytes.extend_from_slice(&key);
        }
        to_hex(&bytes)
    }
}

fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}
