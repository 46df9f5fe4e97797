//! Modular crypt format used by bcrypt.
//!
//! ```text
//! $2a$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW
//! \__/\_/\____________________/\_____________________________/
//!  |   |          |                          |
//!  |   cost       salt (16 bytes, 22 chars)  digest (23 bytes, 31 chars)
//!  version
//! ```
//!
//! Salt and digest use bcrypt's radix-64 alphabet
//! (`./A-Za-z0-9`), unpadded, with unused trailing bits set to zero.

use base64::{
    Engine,
    alphabet::BCRYPT,
    engine::{GeneralPurpose, general_purpose::NO_PAD},
};
use zeroize::Zeroizing;

use super::{SaltParts, Version};
use crate::{
    crypto::{Cost, DIGEST_LEN, SALT_LEN},
    error::{Error, FormatError, Result},
};

/// Length of the encoded entropy.
pub const ENCODED_SALT_LEN: usize = 22;
/// Length of the encoded digest.
pub const ENCODED_DIGEST_LEN: usize = 31;
/// Length of `$2a$NN$` plus the encoded entropy.
pub const SALT_STR_LEN: usize = 7 + ENCODED_SALT_LEN;
/// Length of a full hash string.
pub const HASH_STR_LEN: usize = SALT_STR_LEN + ENCODED_DIGEST_LEN;

const RADIX64: GeneralPurpose = GeneralPurpose::new(&BCRYPT, NO_PAD);

/// Writes `$<version>$<cost>$<entropy>` into `out` and returns the number
/// of bytes written.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if `out` is shorter than [`SALT_STR_LEN`].
pub fn encode_salt_into(
    version: Version,
    cost: Cost,
    entropy: &[u8; SALT_LEN],
    out: &mut [u8],
) -> Result<usize> {
    if out.len() < SALT_STR_LEN {
        return Err(Error::Encoding {
            needed: SALT_STR_LEN,
            available: out.len(),
        });
    }

    let cost = cost.get() as u8;
    out[0] = b'$';
    out[1..3].copy_from_slice(version.as_str().as_bytes());
    out[3] = b'$';
    out[4] = b'0' + cost / 10;
    out[5] = b'0' + cost % 10;
    out[6] = b'$';

    RADIX64
        .encode_slice(entropy, &mut out[7..SALT_STR_LEN])
        .map_err(|_| Error::Encoding {
            needed: SALT_STR_LEN,
            available: out.len(),
        })?;

    Ok(SALT_STR_LEN)
}

/// Encodes the primitive's digest for appending after the salt.
pub fn encode_digest(digest: &[u8; DIGEST_LEN]) -> String {
    RADIX64.encode(digest)
}

/// Parses a 29-character salt.
pub fn decode_salt(text: &str) -> Result<SaltParts> {
    check_len(text, SALT_STR_LEN)?;
    decode_prefix(text.as_bytes())
}

/// Parses a 60-character hash, validating the digest as well as the salt.
pub fn decode_hash(text: &str) -> Result<SaltParts> {
    check_len(text, HASH_STR_LEN)?;
    let bytes = text.as_bytes();
    let parts = decode_prefix(bytes)?;

    let mut digest = Zeroizing::new([0u8; DIGEST_LEN]);
    decode_exact(&bytes[SALT_STR_LEN..], &mut *digest, "digest")?;

    Ok(parts)
}

fn check_len(text: &str, expected: usize) -> Result<()> {
    if text.len() != expected {
        return Err(FormatError::Length {
            expected,
            actual: text.len(),
        }
        .into());
    }
    Ok(())
}

fn decode_prefix(bytes: &[u8]) -> Result<SaltParts> {
    if bytes[0] != b'$' || bytes[3] != b'$' || bytes[6] != b'$' {
        return Err(FormatError::Prefix.into());
    }

    let marker = &bytes[1..3];
    let version = Version::from_marker(marker).ok_or_else(|| {
        FormatError::UnsupportedVersion(String::from_utf8_lossy(marker).into_owned())
    })?;

    let cost_field = &bytes[4..6];
    let cost = match cost_field {
        [tens @ b'0'..=b'9', ones @ b'0'..=b'9'] => {
            i64::from((tens - b'0') * 10 + (ones - b'0'))
        }
        _ => return Err(invalid_cost(cost_field)),
    };
    let cost = Cost::strict(cost).map_err(|_| invalid_cost(cost_field))?;

    let mut entropy = Zeroizing::new([0u8; SALT_LEN]);
    decode_exact(&bytes[7..SALT_STR_LEN], &mut *entropy, "salt")?;

    Ok(SaltParts {
        version,
        cost,
        entropy,
    })
}

fn invalid_cost(field: &[u8]) -> Error {
    FormatError::Cost(String::from_utf8_lossy(field).into_owned()).into()
}

fn decode_exact(input: &[u8], out: &mut [u8], what: &'static str) -> Result<()> {
    match RADIX64.decode_slice(input, out) {
        Ok(n) if n == out.len() => Ok(()),
        _ => Err(FormatError::Encoding(what).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: &str = "$2y$05$HlFShUxTu4ZHHfOLJwfmCeDj/kuKFKboanXtDJXxCC7aIPTUgxNDe";
    const KNOWN_ENTROPY: [u8; SALT_LEN] = [
        38, 113, 212, 141, 108, 213, 195, 166, 201, 38, 20, 13, 47, 40, 104, 18,
    ];

    fn format_err(text: &str) -> FormatError {
        match decode_hash(text) {
            Err(Error::Format(e)) => e,
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn encodes_known_salt() {
        let mut buf = [0u8; 64];
        let n = encode_salt_into(Version::TwoY, Cost::new(5), &KNOWN_ENTROPY, &mut buf).unwrap();
        assert_eq!(&buf[..n], &KNOWN.as_bytes()[..SALT_STR_LEN]);
    }

    #[test]
    fn zero_entropy_encodes_as_dots() {
        let mut buf = [0u8; SALT_STR_LEN];
        encode_salt_into(Version::TwoA, Cost::new(4), &[0u8; SALT_LEN], &mut buf).unwrap();
        assert_eq!(&buf, b"$2a$04$......................");
    }

    #[test]
    fn short_buffer_is_encoding_error() {
        let mut buf = [0u8; SALT_STR_LEN - 1];
        let err = encode_salt_into(Version::TwoA, Cost::new(12), &[0u8; SALT_LEN], &mut buf)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Encoding {
                needed: SALT_STR_LEN,
                available: 28
            }
        ));
    }

    #[test]
    fn decodes_known_hash() {
        let parts = decode_hash(KNOWN).unwrap();
        assert_eq!(parts.version(), Version::TwoY);
        assert_eq!(parts.cost().get(), 5);
        assert_eq!(*parts.entropy(), KNOWN_ENTROPY);

        let parts = decode_salt(&KNOWN[..SALT_STR_LEN]).unwrap();
        assert_eq!(*parts.entropy(), KNOWN_ENTROPY);
    }

    #[test]
    fn boundary_costs_decode() {
        for cost in ["04", "31"] {
            let text = format!("$2a${cost}$......................");
            assert_eq!(
                decode_salt(&text).unwrap().cost().to_string(),
                cost.to_string()
            );
        }
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            format_err(""),
            FormatError::Length {
                expected: HASH_STR_LEN,
                actual: 0
            }
        );
        assert!(matches!(
            format_err("not-a-valid-hash"),
            FormatError::Length { .. }
        ));
        assert!(matches!(
            format_err(&KNOWN[..SALT_STR_LEN]),
            FormatError::Length { .. }
        ));
    }

    #[test]
    fn rejects_bad_prefix() {
        let text = KNOWN.replacen('$', "!", 1);
        assert_eq!(format_err(&text), FormatError::Prefix);
    }

    #[test]
    fn rejects_unknown_version() {
        let text = KNOWN.replacen("2y", "2x", 1);
        assert_eq!(
            format_err(&text),
            FormatError::UnsupportedVersion("2x".into())
        );
        let text = KNOWN.replacen("2y", "1$", 1);
        assert!(decode_hash(&text).is_err());
    }

    #[test]
    fn rejects_out_of_range_cost() {
        for cost in ["03", "32", "99", "ab", "-1"] {
            let text = KNOWN.replacen("05", cost, 1);
            assert_eq!(format_err(&text), FormatError::Cost(cost.into()), "{cost}");
        }
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        let mut text = KNOWN.to_string();
        text.replace_range(10..11, "+");
        assert_eq!(format_err(&text), FormatError::Encoding("salt"));

        let mut text = KNOWN.to_string();
        text.replace_range(40..41, "=");
        assert_eq!(format_err(&text), FormatError::Encoding("digest"));
    }

    #[test]
    fn rejects_non_zero_trailing_bits() {
        // last salt character may only carry two bits
        let mut text = KNOWN.to_string();
        text.replace_range(28..29, "f");
        assert_eq!(format_err(&text), FormatError::Encoding("salt"));
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        let text = "$2a$04$OOOOOOOOOOOOOOOOOOOOO£OOOOOOOOOOOOOOOOOOOOOOOOOOOOOO";
        assert!(decode_hash(text).is_err());
    }
}
