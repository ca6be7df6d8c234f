//! Endian, CRC, and timestamp helpers shared by header parsing.
//!
//! Every integer on the wire in a TrueCrypt volume is big-endian; these
//! helpers read exactly the bytes they promise, with no partial-read
//! ambiguity.

/// Read a big-endian `u16` from an exact-size slice.
#[inline]
pub(crate) fn be_u16(b: &[u8]) -> u16 {
    u16::from_be_bytes(b[..2].try_into().unwrap())
}

/// Read a big-endian `u32` from an exact-size slice.
#[inline]
pub(crate) fn be_u32(b: &[u8]) -> u32 {
    u32::from_be_bytes(b[..4].try_into().unwrap())
}

/// Read a big-endian `u64` from an exact-size slice.
#[inline]
pub(crate) fn be_u64(b: &[u8]) -> u64 {
    u64::from_be_bytes(b[..8].try_into().unwrap())
}

/// CRC-32 (ITU-V.42 / ZIP polynomial, reflected `0xEDB88320`) of `data`.
#[inline]
pub(crate) fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Convert a Windows FILETIME (100-ns intervals since 1601-01-01 UTC) to
/// a Unix timestamp (seconds since 1970-01-01 UTC).
///
/// Integer division; sub-second precision is discarded, matching the
/// original format's own truncating conversion.
#[inline]
pub(crate) fn filetime_to_unix(filetime: u64) -> i64 {
    const EPOCH_DIFF_SECS: i64 = 11_644_473_600;
    (filetime / 10_000_000) as i64 - EPOCH_DIFF_SECS
}
