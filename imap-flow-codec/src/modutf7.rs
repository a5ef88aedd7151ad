//! Modified UTF-7 (RFC 3501 §5.1.3), used to encode mailbox names onto the wire.
//!
//! Printable ASCII (`0x20..=0x7E`) passes through unchanged, with `&` escaped as `&-`. Any other
//! character starts a shifted sequence: the run of non-ASCII characters is encoded as UTF-16BE,
//! base64'd with [`base64::alphabet::IMAP_MUTF7`] (`,` instead of `/`, no padding), and wrapped in
//! `&...-`.

use base64::{
    alphabet::IMAP_MUTF7,
    engine::{general_purpose::NO_PAD, GeneralPurpose},
};
use thiserror::Error;

const ENGINE: GeneralPurpose = GeneralPurpose::new(&IMAP_MUTF7, NO_PAD);

/// A mailbox name failed to decode as modified UTF-7.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ModUtf7Error {
    /// A shifted sequence decoded to an odd number of bytes, so it cannot be split into UTF-16
    /// code units.
    #[error("shifted sequence decoded to {n} bytes, which is not a multiple of 2")]
    OddByteCount { n: usize },

    /// The input is not a valid encoding: invalid base64, unterminated shift, an invalid UTF-16
    /// sequence, or a non-canonical re-encoding (see [`validate`]).
    #[error("invalid modified UTF-7 encoding: {buffer}")]
    InvalidEncoding { buffer: String },
}

fn is_direct(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E)
}

/// Encode a mailbox name into its on-the-wire modified UTF-7 form.
pub fn encode(input: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut pending_shift: Vec<u16> = Vec::new();

    let flush_shift = |out: &mut Vec<u8>, pending_shift: &mut Vec<u16>| {
        if pending_shift.is_empty() {
            return;
        }

        let mut bytes = Vec::with_capacity(pending_shift.len() * 2);
        for unit in pending_shift.drain(..) {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }

        out.push(b'&');
        out.extend_from_slice(ENGINE.encode(&bytes).replace('/', ",").as_bytes());
        out.push(b'-');
    };

    for ch in input.chars() {
        if ch.is_ascii() && is_direct(ch as u8) && ch != '&' {
            flush_shift(&mut out, &mut pending_shift);
            out.push(ch as u8);
        } else if ch == '&' {
            flush_shift(&mut out, &mut pending_shift);
            out.extend_from_slice(b"&-");
        } else {
            let mut buf = [0u16; 2];
            pending_shift.extend_from_slice(ch.encode_utf16(&mut buf));
        }
    }

    flush_shift(&mut out, &mut pending_shift);

    out
}

/// Decode a wire-format mailbox name from its modified UTF-7 form.
pub fn decode(input: &[u8]) -> Result<String, ModUtf7Error> {
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        let byte = input[i];

        if byte != b'&' {
            if !is_direct(byte) {
                return Err(ModUtf7Error::InvalidEncoding {
                    buffer: imap_types::utils::escape_byte_string(input),
                });
            }
            out.push(byte as char);
            i += 1;
            continue;
        }

        // `byte == b'&'`: either the `&-` escape or a shifted sequence.
        if input.get(i + 1) == Some(&b'-') {
            out.push('&');
            i += 2;
            continue;
        }

        let start = i + 1;
        let end = input[start..]
            .iter()
            .position(|b| *b == b'-')
            .map(|p| start + p)
            .ok_or_else(|| ModUtf7Error::InvalidEncoding {
                buffer: imap_types::utils::escape_byte_string(input),
            })?;

        let shifted = &input[start..end];
        let unshifted = shifted.iter().map(|b| if *b == b',' { b'/' } else { *b });
        let raw: Vec<u8> = unshifted.collect();

        let decoded = ENGINE
            .decode(&raw)
            .map_err(|_| ModUtf7Error::InvalidEncoding {
                buffer: imap_types::utils::escape_byte_string(input),
            })?;

        if decoded.len() % 2 != 0 {
            return Err(ModUtf7Error::OddByteCount { n: decoded.len() });
        }

        let units: Vec<u16> = decoded
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();

        for unit in char::decode_utf16(units) {
            let ch = unit.map_err(|_| ModUtf7Error::InvalidEncoding {
                buffer: imap_types::utils::escape_byte_string(input),
            })?;
            out.push(ch);
        }

        i = end + 1;
    }

    Ok(out)
}

/// Round-trip `input` through [`decode`] then [`encode`] and fail if the result differs
/// byte-for-byte, catching non-canonical (but technically parseable) encodings.
pub fn validate(input: &[u8]) -> Result<(), ModUtf7Error> {
    let decoded = decode(input)?;
    let reencoded = encode(&decoded);

    if reencoded == input {
        Ok(())
    } else {
        Err(ModUtf7Error::InvalidEncoding {
            buffer: imap_types::utils::escape_byte_string(input),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(encode("INBOX"), b"INBOX");
        assert_eq!(decode(b"INBOX").unwrap(), "INBOX");
    }

    #[test]
    fn ampersand_is_escaped() {
        assert_eq!(encode("a&b"), b"a&-b");
        assert_eq!(decode(b"a&-b").unwrap(), "a&b");
    }

    #[test]
    fn german_umlaut_round_trips() {
        let name = "Entw\u{00fc}rfe";
        let wire = encode(name);
        assert_eq!(decode(&wire).unwrap(), name);
        assert!(validate(&wire).is_ok());
    }

    #[test]
    fn japanese_example_round_trips() {
        // The canonical RFC 3501 example mailbox name.
        let name = "\u{65e5}\u{672c}\u{8a9e}";
        let wire = encode(name);
        assert_eq!(decode(&wire).unwrap(), name);
        assert!(validate(&wire).is_ok());
    }

    #[test]
    fn odd_byte_count_is_rejected() {
        // "&AA-" decodes to a single raw byte, which cannot be split into UTF-16 code units.
        let err = decode(b"&AA-").unwrap_err();
        assert!(matches!(err, ModUtf7Error::OddByteCount { n: 1 }));
    }

    #[test]
    fn unterminated_shift_is_rejected() {
        assert!(decode(b"&AAA").is_err());
    }
}
