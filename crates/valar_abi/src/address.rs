//! Algorand addresses are base32-encoded strings that represent 32 bytes plus a checksum.
//!
//! The [`Address`] type keeps the raw 32 bytes, which is the form addresses take inside
//! ABI tuples, and converts to and from the 58-character text form on demand.

use sha2::{Digest, Sha512_256};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::ABIError;
use crate::constants::{
    ALGORAND_ADDRESS_LENGTH, ALGORAND_CHECKSUM_BYTE_LENGTH, ALGORAND_PUBLIC_KEY_BYTE_LENGTH,
    APP_ID_PREFIX, HASH_BYTES_LENGTH,
};

/// Represents an Algorand address as decoded bytes without the checksum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; ALGORAND_PUBLIC_KEY_BYTE_LENGTH]);

impl Address {
    /// The all-zero address, used on chain as the "no account" marker.
    pub const ZERO: Address = Address([0u8; ALGORAND_PUBLIC_KEY_BYTE_LENGTH]);

    /// Returns the 32 bytes of the address.
    pub fn as_bytes(&self) -> &[u8; ALGORAND_PUBLIC_KEY_BYTE_LENGTH] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Builds an address from a byte slice that must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ABIError> {
        let bytes: [u8; ALGORAND_PUBLIC_KEY_BYTE_LENGTH] =
            bytes.try_into().map_err(|_| ABIError::DecodingError {
                message: format!(
                    "Address byte string must be {} bytes long",
                    ALGORAND_PUBLIC_KEY_BYTE_LENGTH
                ),
            })?;
        Ok(Address(bytes))
    }

    /// Computes the account address of an application.
    pub fn from_app_id(app_id: u64) -> Self {
        let mut to_hash = APP_ID_PREFIX.to_vec();
        to_hash.extend_from_slice(&app_id.to_be_bytes());
        let mut hasher = Sha512_256::new();
        hasher.update(&to_hash);
        let mut digest = [0u8; ALGORAND_PUBLIC_KEY_BYTE_LENGTH];
        digest.copy_from_slice(&hasher.finalize()[..HASH_BYTES_LENGTH]);
        Address(digest)
    }

    /// Returns the base32-encoded string representation of the address, including the checksum.
    pub fn as_str(&self) -> String {
        let mut buffer = [0u8; ALGORAND_PUBLIC_KEY_BYTE_LENGTH + ALGORAND_CHECKSUM_BYTE_LENGTH];
        buffer[..ALGORAND_PUBLIC_KEY_BYTE_LENGTH].copy_from_slice(&self.0);
        buffer[ALGORAND_PUBLIC_KEY_BYTE_LENGTH..].copy_from_slice(&self.checksum());

        base32::encode(base32::Alphabet::Rfc4648 { padding: false }, &buffer)
    }

    /// Computes the 4-byte checksum for the address.
    pub fn checksum(&self) -> [u8; ALGORAND_CHECKSUM_BYTE_LENGTH] {
        let mut hasher = Sha512_256::new();
        hasher.update(self.0);

        let mut checksum = [0u8; ALGORAND_CHECKSUM_BYTE_LENGTH];
        checksum.copy_from_slice(
            &hasher.finalize()[(HASH_BYTES_LENGTH - ALGORAND_CHECKSUM_BYTE_LENGTH)..],
        );
        checksum
    }
}

impl FromStr for Address {
    type Err = ABIError;

    /// Parses a 58-character base32 Algorand address, validating its checksum.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ALGORAND_ADDRESS_LENGTH {
            return Err(ABIError::ValidationError {
                message: format!(
                    "Algorand address must be exactly {} characters",
                    ALGORAND_ADDRESS_LENGTH
                ),
            });
        }
        let decoded = base32::decode(base32::Alphabet::Rfc4648 { padding: false }, s)
            .ok_or_else(|| ABIError::ValidationError {
                message: "Invalid base32 encoding for Algorand address".to_string(),
            })?;

        if decoded.len() != ALGORAND_PUBLIC_KEY_BYTE_LENGTH + ALGORAND_CHECKSUM_BYTE_LENGTH {
            return Err(ABIError::ValidationError {
                message: "Could not decode address into 32-byte public key".to_string(),
            });
        }

        let address = Address::from_slice(&decoded[..ALGORAND_PUBLIC_KEY_BYTE_LENGTH])?;
        if address.checksum()[..] != decoded[ALGORAND_PUBLIC_KEY_BYTE_LENGTH..] {
            return Err(ABIError::ValidationError {
                message: "Checksum is invalid".to_string(),
            });
        }
        Ok(address)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl From<[u8; ALGORAND_PUBLIC_KEY_BYTE_LENGTH]> for Address {
    fn from(value: [u8; ALGORAND_PUBLIC_KEY_BYTE_LENGTH]) -> Self {
        Address(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO_ADDRESS: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ";

    #[test]
    fn test_zero_address_text_form() {
        assert_eq!(Address::ZERO.to_string(), ZERO_ADDRESS);
        assert_eq!(Address::from_str(ZERO_ADDRESS).unwrap(), Address::ZERO);
        assert!(Address::default().is_zero());
    }

    #[test]
    fn test_from_app_id() {
        let address = Address::from_app_id(123);
        assert_eq!(
            address.to_string(),
            "WRBMNT66ECE2AOYKM76YVWIJMBW6Z3XCQZOKG5BL7NISAQC2LBGEKTZLRM"
        );
    }

    #[test]
    fn test_text_form_survives_parsing() {
        let address = Address([7u8; 32]);
        let parsed = Address::from_str(&address.to_string()).unwrap();
        assert_eq!(parsed, address);
    }

    #[test]
    fn test_parse_rejects_bad_checksum() {
        let mut text = Address([7u8; 32]).to_string();
        let replacement = if &text[10..11] == "A" { "B" } else { "A" };
        text.replace_range(10..11, replacement);
        assert_eq!(
            Address::from_str(&text).unwrap_err().to_string(),
            "ABI validation failed: Checksum is invalid"
        );
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            Address::from_str("ABC").unwrap_err().to_string(),
            "ABI validation failed: Algorand address must be exactly 58 characters"
        );
    }

    #[test]
    fn test_from_slice_wrong_length() {
        assert_eq!(
            Address::from_slice(&[0u8; 31]).unwrap_err().to_string(),
            "ABI decoding failed: Address byte string must be 32 bytes long"
        );
    }
}
