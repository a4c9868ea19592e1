use crate::{ABIError, ABIType, ABIValue};

impl ABIType {
    pub(crate) fn encode_tuple(&self, value: &ABIValue) -> Result<Vec<u8>, ABIError> {
        let child_types = match self {
            ABIType::Tuple(child_types) => child_types.iter().collect::<Vec<_>>(),
            _ => {
                return Err(ABIError::EncodingError {
                    message: "ABI type mismatch, expected tuple".to_string(),
                });
            }
        };

        let values = match value {
            ABIValue::Array(n) => n,
            _ => {
                return Err(ABIError::EncodingError {
                    message: "ABI value mismatch, expected an array of values".to_string(),
                });
            }
        };

        encode_abi_types(&child_types, values)
    }

    pub(crate) fn decode_tuple(&self, bytes: &[u8]) -> Result<ABIValue, ABIError> {
        let child_types = match self {
            ABIType::Tuple(child_types) => child_types.iter().collect::<Vec<_>>(),
            _ => {
                return Err(ABIError::DecodingError {
                    message: "ABI type mismatch, expected tuple".to_string(),
                });
            }
        };

        if bytes.len() != self.byte_len() {
            return Err(ABIError::DecodingError {
                message: format!(
                    "Invalid byte array length for {}, expected {} bytes, got {}",
                    self,
                    self.byte_len(),
                    bytes.len()
                ),
            });
        }

        decode_abi_types(&child_types, bytes)
    }
}

/// Encodes a sequence of static values back to back.
pub fn encode_abi_types(abi_types: &[&ABIType], values: &[ABIValue]) -> Result<Vec<u8>, ABIError> {
    if abi_types.len() != values.len() {
        return Err(ABIError::EncodingError {
            message: format!(
                "Mismatch lengths between the values and types, expected {} values, got {}",
                abi_types.len(),
                values.len()
            ),
        });
    }

    let mut result: Vec<u8> = Vec::new();
    for (child_type, value) in abi_types.iter().zip(values) {
        result.extend(child_type.encode(value)?);
    }
    Ok(result)
}

/// Decodes a sequence of static values laid out back to back.
///
/// The caller is responsible for checking that `bytes` has the combined length of all types.
pub fn decode_abi_types(abi_types: &[&ABIType], bytes: &[u8]) -> Result<ABIValue, ABIError> {
    let mut values: Vec<ABIValue> = Vec::with_capacity(abi_types.len());
    let mut bytes_cursor: usize = 0;

    for child_type in abi_types {
        let child_type_size = child_type.byte_len();
        let slice = bytes
            .get(bytes_cursor..bytes_cursor + child_type_size)
            .ok_or_else(|| ABIError::DecodingError {
                message: format!(
                    "Index out of bounds: trying to access bytes[{}..{}] but slice has length {}",
                    bytes_cursor,
                    bytes_cursor + child_type_size,
                    bytes.len()
                ),
            })?;

        values.push(child_type.decode(slice)?);
        bytes_cursor += child_type_size;
    }

    if bytes_cursor < bytes.len() {
        return Err(ABIError::DecodingError {
            message: "Input bytes not fully consumed".to_string(),
        });
    }

    Ok(ABIValue::Array(values))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    use crate::{ABIType, ABIValue, Address};

    #[test]
    fn test_linked_list_layout() {
        let abi_type = ABIType::from_str("(uint64,address,address)").unwrap();
        let first = Address([1u8; 32]);
        let last = Address([2u8; 32]);
        let value = ABIValue::Array(vec![
            ABIValue::from(3u64),
            ABIValue::from(first),
            ABIValue::from(last),
        ]);

        let encoded = abi_type.encode(&value).unwrap();
        let mut expected = hex::decode("0000000000000003").unwrap();
        expected.extend([1u8; 32]);
        expected.extend([2u8; 32]);
        assert_eq!(encoded, expected);
        assert_eq!(abi_type.decode(&encoded).unwrap(), value);
    }

    #[test]
    fn test_nested_tuple_layout() {
        let abi_type = ABIType::from_str("(byte[4],(uint64,address),uint8)").unwrap();
        let value = ABIValue::Array(vec![
            ABIValue::from_bytes(b"val_"),
            ABIValue::Array(vec![
                ABIValue::from(7u64),
                ABIValue::from(Address([5u8; 32])),
            ]),
            ABIValue::from(9u32),
        ]);

        let encoded = abi_type.encode(&value).unwrap();
        assert_eq!(encoded.len(), 4 + 8 + 32 + 1);
        assert_eq!(&encoded[..4], b"val_");
        assert_eq!(&encoded[4..12], &7u64.to_be_bytes());
        assert_eq!(encoded[44], 9);
        assert_eq!(abi_type.decode(&encoded).unwrap(), value);
    }

    #[test]
    fn test_decode_rejects_short_input() {
        let abi_type = ABIType::from_str("(uint64,uint64)").unwrap();
        assert_eq!(
            abi_type.decode(&[0u8; 15]).unwrap_err().to_string(),
            "ABI decoding failed: Invalid byte array length for (uint64,uint64), expected 16 bytes, got 15"
        );
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let abi_type = ABIType::from_str("(byte,uint64)").unwrap();
        assert!(abi_type.decode(&[0u8; 10]).is_err());
    }

    #[test]
    fn test_encode_rejects_value_count_mismatch() {
        let abi_type = ABIType::from_str("(uint64,uint64)").unwrap();
        let result = abi_type.encode(&ABIValue::Array(vec![ABIValue::from(1u64)]));
        assert_eq!(
            result.unwrap_err().to_string(),
            "ABI encoding failed: Mismatch lengths between the values and types, expected 2 values, got 1"
        );
    }
}
