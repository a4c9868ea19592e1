use valar_abi::ABIValue;

use super::{AbiRecord, TupleFields};
use crate::NoticeboardError;

/// Platform fees charged by the Noticeboard, in microALGO.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoticeboardFees {
    pub commission_min: u64,
    pub val_user_reg: u64,
    pub del_user_reg: u64,
    pub val_ad_creation: u64,
    pub del_contract_creation: u64,
}

impl AbiRecord for NoticeboardFees {
    const NAME: &'static str = "NoticeboardFees";

    const ABI_TYPE: &'static str = "(uint64,uint64,uint64,uint64,uint64)";

    fn from_fields(fields: &mut TupleFields) -> Result<Self, NoticeboardError> {
        Ok(Self {
            commission_min: fields.next_u64()?,
            val_user_reg: fields.next_u64()?,
            del_user_reg: fields.next_u64()?,
            val_ad_creation: fields.next_u64()?,
            del_contract_creation: fields.next_u64()?,
        })
    }

    fn to_abi_value(&self) -> ABIValue {
        ABIValue::from_u64s(&[
            self.commission_min,
            self.val_user_reg,
            self.del_user_reg,
            self.val_ad_creation,
            self.del_contract_creation,
        ])
    }
}

pub fn decode_noticeboard_fees(data: &[u8]) -> Result<NoticeboardFees, NoticeboardError> {
    NoticeboardFees::decode(data)
}
