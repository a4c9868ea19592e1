use num_bigint::BigUint;

use crate::{ABIError, Address};

/// Represents a value that can be encoded or decoded as an ABI type.
#[derive(Debug, Clone, PartialEq)]
pub enum ABIValue {
    /// An unsigned integer value.
    Uint(BigUint),
    /// A byte value.
    Byte(u8),
    /// An array of ABI values, used for both static arrays and tuples.
    Array(Vec<ABIValue>),
    /// An Algorand address.
    Address(Address),
}

impl From<BigUint> for ABIValue {
    fn from(value: BigUint) -> Self {
        ABIValue::Uint(value)
    }
}

impl From<u32> for ABIValue {
    fn from(value: u32) -> Self {
        ABIValue::Uint(BigUint::from(value))
    }
}

impl From<u64> for ABIValue {
    fn from(value: u64) -> Self {
        ABIValue::Uint(BigUint::from(value))
    }
}

impl From<Address> for ABIValue {
    fn from(value: Address) -> Self {
        ABIValue::Address(value)
    }
}

impl From<Vec<ABIValue>> for ABIValue {
    fn from(value: Vec<ABIValue>) -> Self {
        ABIValue::Array(value)
    }
}

impl ABIValue {
    /// Create an ABIValue::Byte from a u8 value
    pub fn from_byte(value: u8) -> Self {
        ABIValue::Byte(value)
    }

    /// Create a `byte[N]` array value from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        ABIValue::Array(bytes.iter().copied().map(ABIValue::Byte).collect())
    }

    /// Create a `uint64[N]` array value.
    pub fn from_u64s(values: &[u64]) -> Self {
        ABIValue::Array(values.iter().copied().map(ABIValue::from).collect())
    }

    /// Returns the value as a `u64`, failing if it is not a uint or does not fit.
    pub fn as_u64(&self) -> Result<u64, ABIError> {
        match self {
            ABIValue::Uint(n) => u64::try_from(n).map_err(|_| ABIError::DecodingError {
                message: format!("{} does not fit in u64", n),
            }),
            _ => Err(ABIError::DecodingError {
                message: "ABI value mismatch, expected uint".to_string(),
            }),
        }
    }

    pub fn as_byte(&self) -> Result<u8, ABIError> {
        match self {
            ABIValue::Byte(b) => Ok(*b),
            _ => Err(ABIError::DecodingError {
                message: "ABI value mismatch, expected byte".to_string(),
            }),
        }
    }

    pub fn as_address(&self) -> Result<Address, ABIError> {
        match self {
            ABIValue::Address(a) => Ok(*a),
            _ => Err(ABIError::DecodingError {
                message: "ABI value mismatch, expected address".to_string(),
            }),
        }
    }

    /// Consumes the value and returns its elements, failing for non-array values.
    pub fn into_array(self) -> Result<Vec<ABIValue>, ABIError> {
        match self {
            ABIValue::Array(values) => Ok(values),
            _ => Err(ABIError::DecodingError {
                message: "ABI value mismatch, expected an array of values".to_string(),
            }),
        }
    }

    /// Collects a decoded `byte[N]` into a fixed-size array.
    pub fn into_byte_array<const N: usize>(self) -> Result<[u8; N], ABIError> {
        let bytes = self
            .into_array()?
            .iter()
            .map(ABIValue::as_byte)
            .collect::<Result<Vec<_>, _>>()?;
        let length = bytes.len();
        bytes.try_into().map_err(|_| ABIError::DecodingError {
            message: format!("Expected {} bytes, got {}", N, length),
        })
    }

    /// Collects a decoded `uint64[N]` into a fixed-size array.
    pub fn into_u64_array<const N: usize>(self) -> Result<[u64; N], ABIError> {
        let values = self
            .into_array()?
            .iter()
            .map(ABIValue::as_u64)
            .collect::<Result<Vec<_>, _>>()?;
        let length = values.len();
        values.try_into().map_err(|_| ABIError::DecodingError {
            message: format!("Expected {} uint64 values, got {}", N, length),
        })
    }
}
