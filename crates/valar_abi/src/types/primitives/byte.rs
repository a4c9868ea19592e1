use crate::{ABIError, ABIType, ABIValue};

impl ABIType {
    pub(crate) fn encode_byte(&self, value: &ABIValue) -> Result<Vec<u8>, ABIError> {
        match (self, value) {
            (ABIType::Byte, ABIValue::Byte(n)) => Ok(vec![*n]),
            (ABIType::Byte, _) => Err(ABIError::EncodingError {
                message: "ABI value mismatch, expected byte".to_string(),
            }),
            _ => Err(ABIError::EncodingError {
                message: "ABI type mismatch, expected byte".to_string(),
            }),
        }
    }

    pub(crate) fn decode_byte(&self, bytes: &[u8]) -> Result<ABIValue, ABIError> {
        match self {
            ABIType::Byte => match bytes {
                [byte] => Ok(ABIValue::Byte(*byte)),
                _ => Err(ABIError::DecodingError {
                    message: "Byte array must be 1 byte long".to_string(),
                }),
            },
            _ => Err(ABIError::DecodingError {
                message: "ABI type mismatch, expected byte".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_wrong_type() {
        let result = ABIType::Byte.encode(&ABIValue::from(10u64));
        assert_eq!(
            result.unwrap_err().to_string(),
            "ABI encoding failed: ABI value mismatch, expected byte"
        );
    }

    #[test]
    fn test_decode_wrong_length() {
        let result = ABIType::Byte.decode(&[10, 20]);
        assert_eq!(
            result.unwrap_err().to_string(),
            "ABI decoding failed: Byte array must be 1 byte long"
        );
    }
}
