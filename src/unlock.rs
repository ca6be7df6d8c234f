//! The brute-force volume-unlock probe.
//!
//! Tries every `(variant, hash, cascade)` triple - 2 variants x 3 hashes
//! x 8 cascades, 48 trials in the worst case - until one decrypts a
//! header whose magic and CRC-32 both check out. The first triple that
//! validates wins; the probe never reports which ones came closest.

use crate::cipher::{CipherChain, CASCADES};
use crate::error::{Error, Result};
use crate::hash::{HashAlgorithm, Ripemd160State, Sha1State, WhirlpoolState};
use crate::header::{is_valid_header, DecryptedHeader, HEADER_SIZE, KEY_POOL_SIZE};
use crate::lrw::lrw_many;
use crate::pbkdf2::pbkdf2;
use crate::source::VolumeSource;
use crate::volume::UnlockedVolume;

const SALT_SIZE: usize = 64;
const HIDDEN_VOLUME_OFFSET: u64 = 1536;

/// Which region of the file a trial is probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Normal,
    Hidden,
}

impl Variant {
    fn label(self) -> &'static str {
        match self {
            Variant::Normal => "normal",
            Variant::Hidden => "hidden",
        }
    }
}

/// Attempt to unlock `source` with `password`.
///
/// `progress` is called synchronously with human-readable trial
/// descriptions; it has no return value and cannot abort the probe.
///
/// Returns [`Error::NotUnlockable`] if no `(variant, hash, cascade)`
/// triple validates - this covers both a wrong passphrase and a file
/// that is not a TrueCrypt volume at all, deliberately indistinguishable
/// from the outside. Returns [`Error::MalformedInput`] if the file is
/// too short to hold even a normal-volume salt and header.
pub fn unlock<S: VolumeSource>(
    mut source: S,
    password: &[u8],
    mut progress: impl FnMut(&str),
) -> Result<UnlockedVolume<S>> {
    let file_len = source.len()?;
    if file_len < (SALT_SIZE + HEADER_SIZE) as u64 {
        return Err(Error::MalformedInput(
            "file is too short to hold a volume salt and header",
        ));
    }

    for variant in [Variant::Normal, Variant::Hidden] {
        if variant == Variant::Hidden && file_len < HIDDEN_VOLUME_OFFSET {
            continue;
        }
        let off = match variant {
            Variant::Normal => 0,
            Variant::Hidden => file_len - HIDDEN_VOLUME_OFFSET,
        };

        progress(&format!("is this a {} volume?", variant.label()));

        source.seek_from_start(off)?;
        let salt = source.read_exact_vec(SALT_SIZE)?;
        let enc_header = source.read_exact_vec(HEADER_SIZE)?;

        // SHA-1 and RIPEMD-160 run 2000 PBKDF2 rounds; Whirlpool runs
        // only 1000 - a deliberate difference in the legacy format, not
        // a shortcut taken here.
        let mut attempt = try_hash::<Sha1State>(&salt, &enc_header, password, 2000, &mut progress);
        if attempt.is_none() {
            attempt = try_hash::<Ripemd160State>(&salt, &enc_header, password, 2000, &mut progress);
        }
        if attempt.is_none() {
            attempt = try_hash::<WhirlpoolState>(&salt, &enc_header, password, 1000, &mut progress);
        }

        if let Some(result) = attempt {
            return Ok(UnlockedVolume::new(
                source,
                result.chain,
                result.master_tweak_key,
                result.decrypted,
                file_len,
                result.hash_name,
            ));
        }
    }

    Err(Error::NotUnlockable)
}

struct TrialSuccess {
    decrypted: DecryptedHeader,
    chain: CipherChain,
    master_tweak_key: [u8; 16],
    hash_name: &'static str,
}

/// Try every cascade under one HMAC hash `H`. Returns the first
/// validated decryption, re-keyed with the header's master key pool.
fn try_hash<H: HashAlgorithm>(
    salt: &[u8],
    enc_header: &[u8],
    password: &[u8],
    iterations: u32,
    progress: &mut impl FnMut(&str),
) -> Option<TrialSuccess> {
    progress(&format!("trying {}", H::NAME));

    let header_pool = pbkdf2::<H>(password, salt, iterations, KEY_POOL_SIZE);
    let header_pool = crate::header::KeyPool::from_bytes(&header_pool);
    let header_tweak_key = header_pool.tweak_key();
    let header_cipher_keys = header_pool.cipher_keys();

    for &kinds in &CASCADES {
        let mut chain = CipherChain::new(kinds);
        chain.set_keys(&header_cipher_keys);

        progress(&format!("...{}", chain.name()));

        let decrypted = lrw_many(|b| chain.decrypt_block(b), &header_tweak_key, 1, enc_header);
        if !is_valid_header(&decrypted) {
            continue;
        }

        let header = DecryptedHeader::from_bytes(&decrypted);
        let master_pool = header.master_key_pool();
        let master_tweak_key = master_pool.tweak_key();

        let mut master_chain = CipherChain::new(kinds);
        master_chain.set_keys(&master_pool.cipher_keys());

        return Some(TrialSuccess {
            decrypted: header,
            chain: master_chain,
            master_tweak_key,
            hash_name: H::NAME,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::CipherKind;
    use crate::header::HEADER_SIZE;
    use std::io::Cursor;

    /// Build a plaintext 448-byte header with a given hidden size and a
    /// master key pool, with a correct CRC already stamped in.
    fn plaintext_header(hidden_size: u64, master_tweak: [u8; 16], master_keys: [[u8; 32]; 3]) -> [u8; HEADER_SIZE] {
        let mut h = [0u8; HEADER_SIZE];
        h[0..4].copy_from_slice(b"TRUE");
        h[4..6].copy_from_slice(&1u16.to_be_bytes());
        h[6..8].copy_from_slice(&1u16.to_be_bytes());
        h[28..36].copy_from_slice(&hidden_size.to_be_bytes());
        h[192..208].copy_from_slice(&master_tweak);
        h[224..256].copy_from_slice(&master_keys[0]);
        h[256..288].copy_from_slice(&master_keys[1]);
        h[288..320].copy_from_slice(&master_keys[2]);
        let crc = crate::utils::crc32(&h[192..448]);
        h[8..12].copy_from_slice(&crc.to_be_bytes());
        h
    }

    /// Encrypt a plaintext header into its on-disk form under a
    /// password-derived header key pool.
    fn encrypt_header<H: HashAlgorithm>(
        password: &[u8],
        salt: &[u8; 64],
        iterations: u32,
        kinds: &'static [CipherKind],
        plaintext: &[u8; HEADER_SIZE],
    ) -> Vec<u8> {
        let pool = pbkdf2::<H>(password, salt, iterations, KEY_POOL_SIZE);
        let pool = crate::header::KeyPool::from_bytes(&pool);
        let mut chain = CipherChain::new(kinds);
        chain.set_keys(&pool.cipher_keys());
        lrw_many(|b| chain.encrypt_block(b), &pool.tweak_key(), 1, plaintext)
    }

    fn encrypt_body(kinds: &'static [CipherKind], master_tweak: [u8; 16], master_keys: [[u8; 32]; 3], plaintext: &[u8]) -> Vec<u8> {
        let mut chain = CipherChain::new(kinds);
        chain.set_keys(&master_keys);
        lrw_many(|b| chain.encrypt_block(b), &master_tweak, 1, plaintext)
    }

    /// Build a non-hidden volume file: salt, header, and an N-sector body.
    fn build_normal_volume<H: HashAlgorithm>(
        password: &[u8],
        iterations: u32,
        kinds: &'static [CipherKind],
        sectors: u64,
    ) -> Vec<u8> {
        let salt = [0x5au8; 64];
        let master_tweak = [0x99u8; 16];
        let master_keys = [[0xaau8; 32], [0xbbu8; 32], [0xccu8; 32]];

        let plaintext_h = plaintext_header(0, master_tweak, master_keys);
        let enc_header = encrypt_header::<H>(password, &salt, iterations, kinds, &plaintext_h);

        let body_plain = vec![0x42u8; (sectors * 512) as usize];
        let body_cipher = encrypt_body(kinds, master_tweak, master_keys, &body_plain);

        let mut file = Vec::with_capacity(512 + body_cipher.len());
        file.extend_from_slice(&salt);
        file.extend_from_slice(&enc_header);
        file.extend_from_slice(&body_cipher);
        file
    }

    fn unlocks<H: HashAlgorithm>(password: &str, iterations: u32, kinds: &'static [CipherKind]) {
        let file = build_normal_volume::<H>(password.as_bytes(), iterations, kinds, 4);
        let volume = unlock(Cursor::new(file), password.as_bytes(), |_| {}).unwrap();
        assert_eq!(volume.sector_count(), 4);
        assert!(!volume.is_hidden());
    }

    #[test]
    fn rijndael_sha1_unlocks() {
        unlocks::<Sha1State>("password", 2000, CASCADES[0]);
    }

    #[test]
    fn rijndael_twofish_serpent_sha1_unlocks() {
        unlocks::<Sha1State>("password", 2000, CASCADES[6]);
    }

    #[test]
    fn serpent_ripemd160_unlocks() {
        unlocks::<Ripemd160State>("password", 2000, CASCADES[1]);
    }

    #[test]
    fn twofish_whirlpool_unlocks_with_1000_iterations() {
        unlocks::<WhirlpoolState>("password", 1000, CASCADES[2]);
    }

    #[test]
    fn wrong_password_is_not_unlockable() {
        let file = build_normal_volume::<Sha1State>(b"password", 2000, CASCADES[0], 4);
        let result = unlock(Cursor::new(file), b"wrong password", |_| {});
        assert!(matches!(result, Err(Error::NotUnlockable)));
    }

    #[test]
    fn hidden_and_outer_volumes_unlock_under_their_own_passphrase() {
        let kinds = CASCADES[2]; // Twofish-only
        let outer_password = b"outer";
        let inner_password = b"inner";

        let outer_salt = [0x11u8; 64];
        let outer_master_tweak = [0x22u8; 16];
        let outer_master_keys = [[0x33u8; 32], [0x34u8; 32], [0x35u8; 32]];

        let hidden_salt = [0x44u8; 64];
        let hidden_master_tweak = [0x55u8; 16];
        let hidden_master_keys = [[0x66u8; 32], [0x67u8; 32], [0x68u8; 32]];
        let hidden_size: u64 = 4 * 512;
        let padding: u64 = 512;

        let file_len = 512 + padding + hidden_size + 1536;

        let outer_plain_header = plaintext_header(0, outer_master_tweak, outer_master_keys);
        let outer_enc_header =
            encrypt_header::<WhirlpoolState>(outer_password, &outer_salt, 1000, kinds, &outer_plain_header);

        let hidden_plain_header = plaintext_header(hidden_size, hidden_master_tweak, hidden_master_keys);
        let hidden_enc_header =
            encrypt_header::<WhirlpoolState>(inner_password, &hidden_salt, 1000, kinds, &hidden_plain_header);

        let outer_filler = vec![0xf0u8; padding as usize];
        let hidden_body_plain = vec![0x77u8; hidden_size as usize];
        let hidden_body_cipher = encrypt_body(kinds, hidden_master_tweak, hidden_master_keys, &hidden_body_plain);
        let tail_filler = vec![0x00u8; 1024];

        let mut file = Vec::with_capacity(file_len as usize);
        file.extend_from_slice(&outer_salt);
        file.extend_from_slice(&outer_enc_header);
        file.extend_from_slice(&outer_filler);
        file.extend_from_slice(&hidden_body_cipher);
        file.extend_from_slice(&hidden_salt);
        file.extend_from_slice(&hidden_enc_header);
        file.extend_from_slice(&tail_filler);
        assert_eq!(file.len() as u64, file_len);

        let mut outer = unlock(Cursor::new(file.clone()), outer_password, |_| {}).unwrap();
        assert!(!outer.is_hidden());
        let outer_sector_one = outer.read_sector(1).unwrap();
        assert_eq!(outer_sector_one.len(), 512);

        let mut hidden = unlock(Cursor::new(file), inner_password, |_| {}).unwrap();
        assert!(hidden.is_hidden());
        assert_eq!(hidden.sector_count(), hidden_size / 512);
        let hidden_sector_one = hidden.read_sector(1).unwrap();
        assert_eq!(hidden_sector_one, hidden_body_plain[0..512]);
    }
}
