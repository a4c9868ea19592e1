use valar_abi::{ABIValue, Address};

use super::{AbiRecord, TupleFields};
use crate::NoticeboardError;

/// Bounds on delegation contract timing, in rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoticeboardTermsTiming {
    pub rounds_duration_min_min: u64,
    pub rounds_duration_max_max: u64,
    pub before_expiry: u64,
    pub report_period: u64,
}

impl AbiRecord for NoticeboardTermsTiming {
    const NAME: &'static str = "NoticeboardTermsTiming";

    const ABI_TYPE: &'static str = "(uint64,uint64,uint64,uint64)";

    fn from_fields(fields: &mut TupleFields) -> Result<Self, NoticeboardError> {
        Ok(Self {
            rounds_duration_min_min: fields.next_u64()?,
            rounds_duration_max_max: fields.next_u64()?,
            before_expiry: fields.next_u64()?,
            report_period: fields.next_u64()?,
        })
    }

    fn to_abi_value(&self) -> ABIValue {
        ABIValue::from_u64s(&[
            self.rounds_duration_min_min,
            self.rounds_duration_max_max,
            self.before_expiry,
            self.report_period,
        ])
    }
}

pub fn decode_noticeboard_terms_timing(
    data: &[u8],
) -> Result<NoticeboardTermsTiming, NoticeboardError> {
    NoticeboardTermsTiming::decode(data)
}

/// Limits a validator can set on a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoticeboardTermsNodeLimits {
    pub stake_max_max: u64,
    pub stake_max_min: u64,
    pub cnt_del_max_max: u64,
}

impl AbiRecord for NoticeboardTermsNodeLimits {
    const NAME: &'static str = "NoticeboardTermsNodeLimits";

    const ABI_TYPE: &'static str = "(uint64,uint64,uint64)";

    fn from_fields(fields: &mut TupleFields) -> Result<Self, NoticeboardError> {
        Ok(Self {
            stake_max_max: fields.next_u64()?,
            stake_max_min: fields.next_u64()?,
            cnt_del_max_max: fields.next_u64()?,
        })
    }

    fn to_abi_value(&self) -> ABIValue {
        ABIValue::from_u64s(&[
            self.stake_max_max,
            self.stake_max_min,
            self.cnt_del_max_max,
        ])
    }
}

pub fn decode_noticeboard_terms_node(
    data: &[u8],
) -> Result<NoticeboardTermsNodeLimits, NoticeboardError> {
    NoticeboardTermsNodeLimits::decode(data)
}

/// General payment terms agreed in a delegator contract.
///
/// `commission` is the platform share of every fee in parts per million. Partner fees are
/// paid on top of the validator fees and go to `partner_address`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelegationTermsGeneral {
    pub commission: u64,
    pub fee_round: u64,
    pub fee_setup: u64,
    pub fee_asset_id: u64,
    pub partner_address: Address,
    pub fee_round_partner: u64,
    pub fee_setup_partner: u64,
    pub rounds_breach: u64,
}

impl AbiRecord for DelegationTermsGeneral {
    const NAME: &'static str = "DelegationTermsGeneral";

    const ABI_TYPE: &'static str = "(uint64,uint64,uint64,uint64,address,uint64,uint64,uint64)";

    fn from_fields(fields: &mut TupleFields) -> Result<Self, NoticeboardError> {
        Ok(Self {
            commission: fields.next_u64()?,
            fee_round: fields.next_u64()?,
            fee_setup: fields.next_u64()?,
            fee_asset_id: fields.next_u64()?,
            partner_address: fields.next_address()?,
            fee_round_partner: fields.next_u64()?,
            fee_setup_partner: fields.next_u64()?,
            rounds_breach: fields.next_u64()?,
        })
    }

    fn to_abi_value(&self) -> ABIValue {
        ABIValue::Array(vec![
            ABIValue::from(self.commission),
            ABIValue::from(self.fee_round),
            ABIValue::from(self.fee_setup),
            ABIValue::from(self.fee_asset_id),
            ABIValue::from(self.partner_address),
            ABIValue::from(self.fee_round_partner),
            ABIValue::from(self.fee_setup_partner),
            ABIValue::from(self.rounds_breach),
        ])
    }
}

/// Stake and breach limits agreed in a delegator contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelegationTermsBalance {
    pub stake_max: u64,
    pub cnt_breach_del_max: u64,
    pub rounds_breach: u64,
    pub gratis_bonus: u64,
}

impl AbiRecord for DelegationTermsBalance {
    const NAME: &'static str = "DelegationTermsBalance";

    const ABI_TYPE: &'static str = "(uint64,uint64,uint64,uint64)";

    fn from_fields(fields: &mut TupleFields) -> Result<Self, NoticeboardError> {
        Ok(Self {
            stake_max: fields.next_u64()?,
            cnt_breach_del_max: fields.next_u64()?,
            rounds_breach: fields.next_u64()?,
            gratis_bonus: fields.next_u64()?,
        })
    }

    fn to_abi_value(&self) -> ABIValue {
        ABIValue::from_u64s(&[
            self.stake_max,
            self.cnt_breach_del_max,
            self.rounds_breach,
            self.gratis_bonus,
        ])
    }
}
