use valar_abi::ABIValue;

use super::{AbiRecord, TupleFields};
use crate::NoticeboardError;

/// Whether an asset is accepted as payment, and the fee floors that apply to it.
///
/// Stored in a box keyed by the asset ID.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoticeboardAssetInfo {
    pub accepted: bool,
    pub fee_round_min_min: u64,
    pub fee_round_var_min: u64,
    pub fee_setup_min: u64,
}

impl AbiRecord for NoticeboardAssetInfo {
    const NAME: &'static str = "NoticeboardAssetInfo";

    const ABI_TYPE: &'static str = "(byte,uint64,uint64,uint64)";

    fn from_fields(fields: &mut TupleFields) -> Result<Self, NoticeboardError> {
        Ok(Self {
            accepted: fields.next_byte()? != 0,
            fee_round_min_min: fields.next_u64()?,
            fee_round_var_min: fields.next_u64()?,
            fee_setup_min: fields.next_u64()?,
        })
    }

    fn to_abi_value(&self) -> ABIValue {
        ABIValue::Array(vec![
            ABIValue::from_byte(u8::from(self.accepted)),
            ABIValue::from(self.fee_round_min_min),
            ABIValue::from(self.fee_round_var_min),
            ABIValue::from(self.fee_setup_min),
        ])
    }
}

pub fn decode_noticeboard_asset_box(data: &[u8]) -> Result<NoticeboardAssetInfo, NoticeboardError> {
    NoticeboardAssetInfo::decode(data)
}
