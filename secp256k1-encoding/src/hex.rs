//! Hex encoding/decoding, built on the [`hex`] crate's buffer-based
//! `encode_to_slice`/`decode_to_slice` so callers at the library boundary
//! get `&str`/`&[u8]` convenience without pulling in `alloc`.

use secp256k1_core::{Error, Result};

/// Lower-case hex encoding of `bytes`, written into a caller-supplied
/// buffer twice the input length. Returns the filled prefix.
pub fn to_hex<'a>(bytes: &[u8], out: &'a mut [u8]) -> &'a str {
    let out = &mut out[..bytes.len() * 2];
    hex::encode_to_slice(bytes, out).expect("output buffer sized for this input");
    core::str::from_utf8(out).expect("hex digits are valid UTF-8")
}

/// Decodes a hex string (with or without a leading `0x`) into a
/// caller-supplied buffer. Returns the filled prefix, or
/// [`Error::InvalidHex`] if `s` has an odd length, contains non-hex
/// characters, or decodes to more bytes than `out` holds.
pub fn from_hex<'a>(s: &str, out: &'a mut [u8]) -> Result<&'a [u8]> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.len() % 2 != 0 {
        return Err(Error::InvalidHex);
    }
    let n = s.len() / 2;
    if n > out.len() {
        return Err(Error::InvalidHex);
    }
    hex::decode_to_slice(s, &mut out[..n]).map_err(|_| Error::InvalidHex)?;
    Ok(&out[..n])
}

/// Decodes exactly 32 bytes of hex into a fixed-size array, the common
/// case for private keys, x-only public keys, and message digests.
pub fn from_hex_32(s: &str) -> Result<[u8; 32]> {
    let mut buf = [0u8; 32];
    let decoded = from_hex(s, &mut buf)?;
    if decoded.len() != 32 {
        return Err(Error::InvalidLength);
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let bytes = [0xde, 0xad, 0xbe, 0xef];
        let mut hex_buf = [0u8; 8];
        let hex_str = to_hex(&bytes, &mut hex_buf);
        assert_eq!(hex_str, "deadbeef");

        let mut decoded = [0u8; 4];
        let out = from_hex(hex_str, &mut decoded).unwrap();
        assert_eq!(out, &bytes);
    }

    #[test]
    fn accepts_0x_prefix() {
        let mut decoded = [0u8; 4];
        let out = from_hex("0xdeadbeef", &mut decoded).unwrap();
        assert_eq!(out, &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn rejects_odd_length() {
        let mut decoded = [0u8; 4];
        assert_eq!(from_hex("abc", &mut decoded), Err(Error::InvalidHex));
    }

    #[test]
    fn rejects_non_hex() {
        let mut decoded = [0u8; 4];
        assert_eq!(from_hex("zzzz", &mut decoded), Err(Error::InvalidHex));
    }

    #[test]
    fn from_hex_32_checks_length() {
        assert_eq!(from_hex_32("deadbeef"), Err(Error::InvalidLength));
    }
}
