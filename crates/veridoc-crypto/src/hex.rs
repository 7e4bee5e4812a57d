//! Lowercase-hex helpers for 32-byte digests.
//!
//! Every digest in this workspace travels as a 64-char lowercase hex
//! string; these helpers are the single conversion point.

use veridoc_core::TreeError;

/// Encode bytes as lowercase hex.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a 64-char hex string to 32 bytes.
pub fn hex_to_32bytes(hex: &str) -> Result<[u8; 32], TreeError> {
    let malformed = || TreeError::MalformedDigest {
        digest: hex.to_string(),
    };
    if hex.len() != 64 {
        return Err(malformed());
    }
    let mut out = [0u8; 32];
    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        let s = std::str::from_utf8(chunk).map_err(|_| malformed())?;
        out[i] = u8::from_str_radix(s, 16).map_err(|_| malformed())?;
    }
    Ok(out)
}

/// True for a 64-char lowercase-hex string.
pub fn is_hex_32(s: &str) -> bool {
    s.len() == 64
        && s.bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
