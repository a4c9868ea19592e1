//! Fixed-layout records stored in Noticeboard global state and boxes.
//!
//! Every record is an ARC-4 tuple. [`AbiRecord`] ties a Rust struct to its tuple type string
//! so that decoding is "decode the tuple, then read the fields in order".
mod asset;
mod fees;
mod terms;
mod users;

pub use asset::{NoticeboardAssetInfo, decode_noticeboard_asset_box};
pub use fees::{NoticeboardFees, decode_noticeboard_fees};
pub use terms::{
    DelegationTermsBalance, DelegationTermsGeneral, NoticeboardTermsNodeLimits,
    NoticeboardTermsTiming, decode_noticeboard_terms_node, decode_noticeboard_terms_timing,
};
pub use users::{UserInfo, UsersDoubleLinkedList, decode_user_double_linked_list};

use std::str::FromStr;

use valar_abi::{ABIError, ABIType, ABIValue, Address};

use crate::NoticeboardError;

/// A Rust mirror of an ARC-4 tuple stored by the contracts.
pub trait AbiRecord: Sized {
    /// Name used in error messages.
    const NAME: &'static str;

    /// ARC-4 type string of the on-chain tuple, such as `(uint64,address,address)`.
    const ABI_TYPE: &'static str;

    /// Builds the record from its decoded tuple fields.
    fn from_fields(fields: &mut TupleFields) -> Result<Self, NoticeboardError>;

    /// Returns the record as a tuple value ready for encoding.
    fn to_abi_value(&self) -> ABIValue;

    /// Parses [`AbiRecord::ABI_TYPE`].
    fn abi_type() -> Result<ABIType, NoticeboardError> {
        ABIType::from_str(Self::ABI_TYPE).map_err(|e| NoticeboardError::InvalidLayout {
            record: Self::NAME,
            source: e,
        })
    }

    /// Decodes the record from exactly [`ABIType::byte_len`] bytes.
    fn decode(bytes: &[u8]) -> Result<Self, NoticeboardError> {
        let value = Self::abi_type()?
            .decode(bytes)
            .map_err(|e| NoticeboardError::Decode {
                record: Self::NAME,
                source: e,
            })?;
        let mut fields = TupleFields::new(Self::NAME, value)?;
        let record = Self::from_fields(&mut fields)?;
        fields.finish()?;
        Ok(record)
    }

    /// Encodes the record to its on-chain bytes.
    fn encode(&self) -> Result<Vec<u8>, NoticeboardError> {
        Self::abi_type()?
            .encode(&self.to_abi_value())
            .map_err(|e| NoticeboardError::Encode {
                record: Self::NAME,
                source: e,
            })
    }
}

/// Sequential reader over the fields of a decoded tuple.
pub struct TupleFields {
    record: &'static str,
    fields: std::vec::IntoIter<ABIValue>,
}

impl TupleFields {
    pub fn new(record: &'static str, value: ABIValue) -> Result<Self, NoticeboardError> {
        let fields = value.into_array().map_err(|e| NoticeboardError::Decode {
            record,
            source: e,
        })?;
        Ok(Self {
            record,
            fields: fields.into_iter(),
        })
    }

    fn next_value(&mut self) -> Result<ABIValue, NoticeboardError> {
        self.fields.next().ok_or_else(|| NoticeboardError::InvalidRecord {
            record: self.record,
            message: "tuple has fewer fields than expected".to_string(),
        })
    }

    fn decoded<T>(&self, result: Result<T, ABIError>) -> Result<T, NoticeboardError> {
        result.map_err(|e| NoticeboardError::Decode {
            record: self.record,
            source: e,
        })
    }

    pub fn next_u64(&mut self) -> Result<u64, NoticeboardError> {
        let value = self.next_value()?;
        self.decoded(value.as_u64())
    }

    pub fn next_byte(&mut self) -> Result<u8, NoticeboardError> {
        let value = self.next_value()?;
        self.decoded(value.as_byte())
    }

    pub fn next_address(&mut self) -> Result<Address, NoticeboardError> {
        let value = self.next_value()?;
        self.decoded(value.as_address())
    }

    pub fn next_bytes<const N: usize>(&mut self) -> Result<[u8; N], NoticeboardError> {
        let value = self.next_value()?;
        self.decoded(value.into_byte_array::<N>())
    }

    pub fn next_u64s<const N: usize>(&mut self) -> Result<[u64; N], NoticeboardError> {
        let value = self.next_value()?;
        self.decoded(value.into_u64_array::<N>())
    }

    /// Fails if fields remain unread.
    pub fn finish(mut self) -> Result<(), NoticeboardError> {
        match self.fields.next() {
            None => Ok(()),
            Some(_) => Err(NoticeboardError::InvalidRecord {
                record: self.record,
                message: "tuple has more fields than expected".to_string(),
            }),
        }
    }
}

/// Decodes a raw 32-byte address value.
pub fn decode_abi_address(data: &[u8]) -> Result<Address, NoticeboardError> {
    ABIType::Address
        .decode(data)
        .and_then(|value| value.as_address())
        .map_err(|e| NoticeboardError::Decode {
            record: "address",
            source: e,
        })
}
