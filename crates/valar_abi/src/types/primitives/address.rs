use crate::{ABIError, ABIType, ABIValue, Address};

impl ABIType {
    pub(crate) fn encode_address(&self, value: &ABIValue) -> Result<Vec<u8>, ABIError> {
        match (self, value) {
            (ABIType::Address, ABIValue::Address(address)) => Ok(address.as_bytes().to_vec()),
            (ABIType::Address, _) => Err(ABIError::EncodingError {
                message: "ABI value mismatch, expected address".to_string(),
            }),
            _ => Err(ABIError::EncodingError {
                message: "ABI type mismatch, expected address".to_string(),
            }),
        }
    }

    pub(crate) fn decode_address(&self, bytes: &[u8]) -> Result<ABIValue, ABIError> {
        match self {
            ABIType::Address => Ok(ABIValue::Address(Address::from_slice(bytes)?)),
            _ => Err(ABIError::DecodingError {
                message: "ABI type mismatch, expected address".to_string(),
            }),
        }
    }
}
