use crate::{
    ABIError, ABIValue,
    constants::{ALGORAND_PUBLIC_KEY_BYTE_LENGTH, BITS_PER_BYTE, MAX_BIT_SIZE, STATIC_ARRAY_REGEX},
};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Represents a validated bit size for ABI uint types (8-512, multiple of 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSize(u16);

impl BitSize {
    /// Creates a new [`BitSize`] with validation.
    ///
    /// # Arguments
    /// * `bits` - The bit size, must be 8-512 and divisible by 8.
    pub fn new(bits: u16) -> Result<Self, ABIError> {
        if bits < BITS_PER_BYTE as u16 || bits > MAX_BIT_SIZE || bits % BITS_PER_BYTE as u16 != 0 {
            return Err(ABIError::ValidationError {
                message: format!(
                    "Bit size must be between {} and {} and divisible by {}, got {}",
                    BITS_PER_BYTE, MAX_BIT_SIZE, BITS_PER_BYTE, bits
                ),
            });
        }
        Ok(BitSize(bits))
    }

    /// Returns the bit size value.
    pub fn value(&self) -> u16 {
        self.0
    }

    /// Number of bytes a uint of this size occupies.
    pub fn byte_len(&self) -> usize {
        (self.0 / BITS_PER_BYTE as u16) as usize
    }
}

/// A statically sized ABI type as defined in [ARC-0004](https://arc.algorand.foundation/ARCs/arc-0004#types).
///
/// Every value of one of these types encodes to exactly [`ABIType::byte_len`] bytes, so a
/// type doubles as the layout description of a global state value or a box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ABIType {
    /// An unsigned integer of a specific bit size.
    Uint(BitSize),
    /// An Algorand address.
    Address,
    /// A tuple of other ABI types.
    Tuple(Vec<ABIType>),
    /// A single byte.
    Byte,
    /// A static-length array of another ABI type.
    StaticArray(Box<ABIType>, usize),
}

impl ABIType {
    /// Encodes an [`ABIValue`] according to this ABI type.
    ///
    /// # Arguments
    /// * `value` - The value to encode, must match this type.
    ///
    /// # Returns
    /// The encoded bytes if successful, or an [`ABIError`] if encoding fails.
    pub fn encode(&self, value: &ABIValue) -> Result<Vec<u8>, ABIError> {
        match self {
            ABIType::Uint(_) => self.encode_uint(value),
            ABIType::Address => self.encode_address(value),
            ABIType::Tuple(_) => self.encode_tuple(value),
            ABIType::StaticArray(_, _) => self.encode_static_array(value),
            ABIType::Byte => self.encode_byte(value),
        }
    }

    /// Decodes bytes according to this ABI type.
    ///
    /// The input must be exactly [`ABIType::byte_len`] bytes long.
    pub fn decode(&self, bytes: &[u8]) -> Result<ABIValue, ABIError> {
        match self {
            ABIType::Uint(_) => self.decode_uint(bytes),
            ABIType::Address => self.decode_address(bytes),
            ABIType::Byte => self.decode_byte(bytes),
            ABIType::Tuple(_) => self.decode_tuple(bytes),
            ABIType::StaticArray(_, _) => self.decode_static_array(bytes),
        }
    }

    /// Returns the encoded size of this type in bytes.
    pub fn byte_len(&self) -> usize {
        match self {
            ABIType::Uint(bit_size) => bit_size.byte_len(),
            ABIType::Address => ALGORAND_PUBLIC_KEY_BYTE_LENGTH,
            ABIType::Byte => 1,
            ABIType::StaticArray(child_type, size) => child_type.byte_len() * *size,
            ABIType::Tuple(child_types) => child_types.iter().map(ABIType::byte_len).sum(),
        }
    }
}

impl Display for ABIType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ABIType::Uint(bit_size) => write!(f, "uint{}", bit_size.value()),
            ABIType::Address => write!(f, "address"),
            ABIType::Tuple(child_types) => {
                let type_strings: Vec<String> = child_types.iter().map(|t| t.to_string()).collect();
                write!(f, "({})", type_strings.join(","))
            }
            ABIType::Byte => write!(f, "byte"),
            ABIType::StaticArray(child_type, length) => {
                write!(f, "{}[{}]", child_type, length)
            }
        }
    }
}

impl FromStr for ABIType {
    type Err = ABIError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.ends_with("[]") {
            return Err(ABIError::ValidationError {
                message: format!("Dynamic array type {} has no fixed size", s),
            });
        }

        // Static array
        if s.ends_with(']') {
            let captures =
                STATIC_ARRAY_REGEX
                    .captures(s)
                    .ok_or_else(|| ABIError::ValidationError {
                        message: format!("Malformed static array string: {}", s),
                    })?;
            let length_str = &captures[2];
            let length = length_str
                .parse::<usize>()
                .map_err(|_| ABIError::ValidationError {
                    message: format!("Invalid array length: {}", length_str),
                })?;

            let element_type = ABIType::from_str(&captures[1])?;
            return Ok(ABIType::StaticArray(Box::new(element_type), length));
        }

        if let Some(size_str) = s.strip_prefix("uint") {
            if !size_str.is_empty() && size_str.chars().all(|c| c.is_ascii_digit()) {
                let size = size_str
                    .parse::<u16>()
                    .map_err(|_| ABIError::ValidationError {
                        message: format!("Invalid uint size: {}", size_str),
                    })?;
                return Ok(ABIType::Uint(BitSize::new(size)?));
            }
            return Err(ABIError::ValidationError {
                message: format!("Malformed uint string: {}", size_str),
            });
        }

        if s.len() >= 2 && s.starts_with('(') && s.ends_with(')') {
            let child_types = parse_tuple_content(&s[1..s.len() - 1])?
                .iter()
                .map(|type_str| ABIType::from_str(type_str))
                .collect::<Result<Vec<_>, _>>()?;

            return Ok(ABIType::Tuple(child_types));
        }

        match s {
            "byte" => Ok(ABIType::Byte),
            "address" => Ok(ABIType::Address),
            "string" => Err(ABIError::ValidationError {
                message: "Type string has no fixed size".to_string(),
            }),
            _ => Err(ABIError::ValidationError {
                message: format!("Cannot convert string '{}' to an ABI type", s),
            }),
        }
    }
}

pub(crate) fn parse_tuple_content(content: &str) -> Result<Vec<String>, ABIError> {
    if content.is_empty() {
        return Ok(Vec::new());
    }

    if content.starts_with(',') || content.ends_with(',') {
        return Err(ABIError::ValidationError {
            message: "Tuple string should not start or end with a comma".to_string(),
        });
    }
    if content.contains(",,") {
        return Err(ABIError::ValidationError {
            message: "Tuple string should not have consecutive commas".to_string(),
        });
    }

    let mut tuple_strings: Vec<String> = Vec::new();
    let mut depth: i32 = 0;
    let mut word = String::new();

    for ch in content.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                tuple_strings.push(std::mem::take(&mut word));
                continue;
            }
            _ => {}
        }
        word.push(ch);
    }
    if !word.is_empty() {
        tuple_strings.push(word);
    }
    if depth != 0 {
        return Err(ABIError::ValidationError {
            message: "Tuple string has mismatched parentheses".to_string(),
        });
    }

    Ok(tuple_strings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("uint64", ABIType::Uint(BitSize::new(64).unwrap()), 8)]
    #[case("byte", ABIType::Byte, 1)]
    #[case("address", ABIType::Address, 32)]
    #[case("byte[4]", ABIType::StaticArray(Box::new(ABIType::Byte), 4), 4)]
    #[case(
        "uint64[110]",
        ABIType::StaticArray(Box::new(ABIType::Uint(BitSize::new(64).unwrap())), 110),
        880
    )]
    #[case(
        "(uint64,address,address)",
        ABIType::Tuple(vec![
            ABIType::Uint(BitSize::new(64).unwrap()),
            ABIType::Address,
            ABIType::Address,
        ]),
        72
    )]
    #[case(
        "(byte,uint8,(byte,address))",
        ABIType::Tuple(vec![
            ABIType::Byte,
            ABIType::Uint(BitSize::new(8).unwrap()),
            ABIType::Tuple(vec![ABIType::Byte, ABIType::Address]),
        ]),
        35
    )]
    fn test_parse_display_and_size(
        #[case] type_str: &str,
        #[case] expected: ABIType,
        #[case] byte_len: usize,
    ) {
        let parsed = ABIType::from_str(type_str).unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), type_str);
        assert_eq!(parsed.byte_len(), byte_len);
    }

    #[rstest]
    #[case(
        "uint64[]",
        "ABI validation failed: Dynamic array type uint64[] has no fixed size"
    )]
    #[case("string", "ABI validation failed: Type string has no fixed size")]
    #[case(
        "uint7",
        "ABI validation failed: Bit size must be between 8 and 512 and divisible by 8, got 7"
    )]
    #[case("uint", "ABI validation failed: Malformed uint string: ")]
    #[case(
        "(uint64,,byte)",
        "ABI validation failed: Tuple string should not have consecutive commas"
    )]
    #[case(
        "(uint64,(byte)",
        "ABI validation failed: Tuple string has mismatched parentheses"
    )]
    #[case(
        "bool",
        "ABI validation failed: Cannot convert string 'bool' to an ABI type"
    )]
    #[case(
        "ufixed64x2",
        "ABI validation failed: Cannot convert string 'ufixed64x2' to an ABI type"
    )]
    fn test_parse_rejects(#[case] type_str: &str, #[case] message: &str) {
        assert_eq!(
            ABIType::from_str(type_str).unwrap_err().to_string(),
            message
        );
    }
}
