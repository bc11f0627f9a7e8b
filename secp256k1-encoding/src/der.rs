//! DER codec for ECDSA signatures: `ECDSA-Sig-Value ::= SEQUENCE { r
//! INTEGER, s INTEGER }`.
//!
//! Hand-rolled rather than built on the `der` crate: the wire format here
//! is two fixed-width unsigned integers, small enough that a stack buffer
//! and a few dozen lines of ASN.1 cover it completely, with exact control
//! over the minimal-length and sign-padding rules signatures depend on.

use secp256k1_core::{Error, Result};

const INTEGER_TAG: u8 = 0x02;
const SEQUENCE_TAG: u8 = 0x30;
/// One scalar's worst-case encoded size: tag + length + 0x00 pad + 32 bytes.
const MAX_INTEGER_LEN: usize = 35;
/// Worst-case total: sequence tag + length + two worst-case integers.
const MAX_SIGNATURE_LEN: usize = 2 + 2 * MAX_INTEGER_LEN;

/// A DER-encoded ECDSA signature, stored in a fixed-size stack buffer
/// (the format never exceeds 72 bytes for secp256k1's 256-bit `r`/`s`).
pub struct DerSignature {
    buf: [u8; MAX_SIGNATURE_LEN],
    len: usize,
}

impl DerSignature {
    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// Encodes `(r, s)`, each a big-endian 32-byte unsigned integer, as a DER
/// `ECDSA-Sig-Value`.
pub fn encode(r: &[u8; 32], s: &[u8; 32]) -> DerSignature {
    let mut content = [0u8; 2 * MAX_INTEGER_LEN];
    let mut pos = 0;
    encode_integer(r, &mut content, &mut pos);
    encode_integer(s, &mut content, &mut pos);
    let content_len = pos;

    let mut buf = [0u8; MAX_SIGNATURE_LEN];
    let mut out_pos = 0;
    buf[out_pos] = SEQUENCE_TAG;
    out_pos += 1;
    // `content_len` is at most 2 * 35 = 70, always short-form.
    buf[out_pos] = content_len as u8;
    out_pos += 1;
    buf[out_pos..out_pos + content_len].copy_from_slice(&content[..content_len]);
    out_pos += content_len;

    DerSignature { buf, len: out_pos }
}

/// Writes a single DER `INTEGER` for the unsigned big-endian value `v`:
/// strips leading zero bytes (keeping at least one byte for the value
/// zero), then prepends a `0x00` pad byte iff the remaining leading byte
/// has its high bit set, to keep the ASN.1 `INTEGER` unambiguously
/// non-negative.
fn encode_integer(v: &[u8; 32], out: &mut [u8], pos: &mut usize) {
    let mut start = 0;
    while start < 31 && v[start] == 0 {
        start += 1;
    }
    let trimmed = &v[start..];
    let needs_pad = trimmed[0] & 0x80 != 0;
    let value_len = trimmed.len() + needs_pad as usize;

    out[*pos] = INTEGER_TAG;
    *pos += 1;
    out[*pos] = value_len as u8;
    *pos += 1;
    if needs_pad {
        out[*pos] = 0x00;
        *pos += 1;
    }
    out[*pos..*pos + trimmed.len()].copy_from_slice(trimmed);
    *pos += trimmed.len();
}

/// Decodes a DER `ECDSA-Sig-Value` into `(r, s)` as big-endian 32-byte
/// arrays, zero-extended on the left.
///
/// Rejects: a non-`SEQUENCE` or non-`INTEGER` tag, a long-form ASN.1
/// length (never needed for values this small), a length that doesn't
/// exactly account for every byte (no trailing garbage, no truncation),
/// an integer wider than 33 bytes (out of range for a 256-bit scalar plus
/// an optional sign-pad byte), and any non-canonical integer encoding: a
/// superfluous leading `0x00` not followed by a high-bit byte, or a
/// missing pad byte when the leading value byte's high bit is set.
pub fn decode(bytes: &[u8]) -> Result<([u8; 32], [u8; 32])> {
    if bytes.len() < 2 || bytes[0] != SEQUENCE_TAG {
        return Err(Error::InvalidSignature);
    }
    let seq_len = bytes[1] as usize;
    if bytes[1] & 0x80 != 0 {
        return Err(Error::InvalidSignature);
    }
    if bytes.len() != 2 + seq_len {
        return Err(Error::InvalidSignature);
    }

    let mut pos = 2;
    let end = bytes.len();
    let r = decode_integer(bytes, &mut pos, end)?;
    let s = decode_integer(bytes, &mut pos, end)?;
    if pos != end {
        return Err(Error::InvalidSignature);
    }
    Ok((r, s))
}

fn decode_integer(bytes: &[u8], pos: &mut usize, end: usize) -> Result<[u8; 32]> {
    if *pos + 2 > end || bytes[*pos] != INTEGER_TAG {
        return Err(Error::InvalidSignature);
    }
    *pos += 1;
    let ilen = bytes[*pos] as usize;
    if ilen & 0x80 != 0 {
        return Err(Error::InvalidSignature);
    }
    *pos += 1;
    if ilen == 0 || *pos + ilen > end || ilen > 33 {
        return Err(Error::InvalidSignature);
    }
    let value = &bytes[*pos..*pos + ilen];
    *pos += ilen;

    if ilen > 1 && value[0] == 0x00 && value[1] & 0x80 == 0 {
        return Err(Error::InvalidSignature);
    }
    if ilen < 33 && value[0] & 0x80 != 0 {
        return Err(Error::InvalidSignature);
    }

    let mut out = [0u8; 32];
    if ilen == 33 {
        out.copy_from_slice(&value[1..]);
    } else {
        out[32 - ilen..].copy_from_slice(value);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_generic_values() {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r[31] = 0x01;
        s[0] = 0xff; // high bit set, needs a pad byte
        s[31] = 0x02;

        let der = encode(&r, &s);
        let (r2, s2) = decode(der.as_bytes()).unwrap();
        assert_eq!(r, r2);
        assert_eq!(s, s2);

        let der2 = encode(&r2, &s2);
        assert_eq!(der.as_bytes(), der2.as_bytes());
    }

    #[test]
    fn minimal_length_small_values() {
        let mut r = [0u8; 32];
        let s = [0u8; 32]; // s == 0
        r[31] = 0x05;

        let der = encode(&r, &s);
        // SEQUENCE(0x30) len | INTEGER(0x02) 01 05 | INTEGER(0x02) 01 00
        assert_eq!(der.as_bytes(), &[0x30, 0x06, 0x02, 0x01, 0x05, 0x02, 0x01, 0x00]);
    }

    #[test]
    fn rejects_trailing_bytes() {
        let r = {
            let mut b = [0u8; 32];
            b[31] = 1;
            b
        };
        let der = encode(&r, &r);
        let mut with_trailer = der.as_bytes().to_vec();
        with_trailer.push(0xAA);
        assert_eq!(decode(&with_trailer), Err(Error::InvalidSignature));
    }

    #[test]
    fn rejects_non_minimal_padding() {
        // INTEGER with a superfluous leading 0x00 before a byte < 0x80.
        let bad = [0x30, 0x08, 0x02, 0x02, 0x00, 0x05, 0x02, 0x01, 0x05];
        assert_eq!(decode(&bad), Err(Error::InvalidSignature));
    }

    #[test]
    fn rejects_wrong_tag() {
        let bad = [0x31, 0x06, 0x02, 0x01, 0x05, 0x02, 0x01, 0x00];
        assert_eq!(decode(&bad), Err(Error::InvalidSignature));
    }

    #[test]
    fn rejects_length_mismatch() {
        let bad = [0x30, 0x07, 0x02, 0x01, 0x05, 0x02, 0x01, 0x00];
        assert_eq!(decode(&bad), Err(Error::InvalidSignature));
    }
}
