use num_bigint::BigUint;

use crate::{ABIError, ABIType, ABIValue};

impl ABIType {
    pub(crate) fn encode_uint(&self, value: &ABIValue) -> Result<Vec<u8>, ABIError> {
        let bit_size = match self {
            ABIType::Uint(bit_size) => bit_size,
            _ => {
                return Err(ABIError::EncodingError {
                    message: "ABI type mismatch, expected uint".to_string(),
                });
            }
        };
        let value = match value {
            ABIValue::Uint(n) => n,
            _ => {
                return Err(ABIError::EncodingError {
                    message: "ABI value mismatch, expected uint".to_string(),
                });
            }
        };

        if value.bits() > bit_size.value() as u64 {
            return Err(ABIError::EncodingError {
                message: format!("{} is too big to fit in uint{}", value, bit_size.value()),
            });
        }

        let bytes = value.to_bytes_be();
        let mut result = vec![0u8; bit_size.byte_len() - bytes.len()];
        result.extend_from_slice(&bytes);
        Ok(result)
    }

    pub(crate) fn decode_uint(&self, bytes: &[u8]) -> Result<ABIValue, ABIError> {
        let expected_len = match self {
            ABIType::Uint(bit_size) => bit_size.byte_len(),
            _ => {
                return Err(ABIError::DecodingError {
                    message: "ABI type mismatch, expected uint".to_string(),
                });
            }
        };
        if bytes.len() != expected_len {
            return Err(ABIError::DecodingError {
                message: format!(
                    "Invalid byte array length, expected {} bytes, got {}",
                    expected_len,
                    bytes.len()
                ),
            });
        }

        Ok(ABIValue::Uint(BigUint::from_bytes_be(bytes)))
    }
}
