use valar_abi::{ABIValue, Address};

use crate::NoticeboardError;
use crate::app_state::GlobalStateMap;
use crate::records::{AbiRecord, DelegationTermsBalance, DelegationTermsGeneral, TupleFields};

/// Lifecycle of a delegator contract, stored as a one-byte tag.
///
/// Tags outside the known table are kept as `Other` and encode back to the same byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DelegatorContractState {
    #[default]
    None,
    Set,
    Ready,
    Submitted,
    Live,
    EndedNotSubmitted,
    EndedNotConfirmed,
    EndedLimits,
    EndedWithdrawn,
    EndedExpired,
    EndedUpgrade,
    EndedCannotPay,
    EndedSuspended,
    Other(u8),
}

impl DelegatorContractState {
    pub fn tag(self) -> u8 {
        match self {
            DelegatorContractState::None => 0x00,
            DelegatorContractState::Set => 0x01,
            DelegatorContractState::Ready => 0x02,
            DelegatorContractState::Submitted => 0x03,
            DelegatorContractState::Live => 0x04,
            DelegatorContractState::EndedNotSubmitted => 0x10,
            DelegatorContractState::EndedNotConfirmed => 0x11,
            DelegatorContractState::EndedLimits => 0x12,
            DelegatorContractState::EndedWithdrawn => 0x13,
            DelegatorContractState::EndedExpired => 0x14,
            DelegatorContractState::EndedUpgrade => 0x15,
            DelegatorContractState::EndedCannotPay => 0x16,
            DelegatorContractState::EndedSuspended => 0x17,
            DelegatorContractState::Other(tag) => tag,
        }
    }

    pub fn is_ended(self) -> bool {
        matches!(
            self,
            DelegatorContractState::EndedNotSubmitted
                | DelegatorContractState::EndedNotConfirmed
                | DelegatorContractState::EndedLimits
                | DelegatorContractState::EndedWithdrawn
                | DelegatorContractState::EndedExpired
                | DelegatorContractState::EndedUpgrade
                | DelegatorContractState::EndedCannotPay
                | DelegatorContractState::EndedSuspended
        )
    }
}

impl From<u8> for DelegatorContractState {
    fn from(tag: u8) -> Self {
        match tag {
            0x00 => DelegatorContractState::None,
            0x01 => DelegatorContractState::Set,
            0x02 => DelegatorContractState::Ready,
            0x03 => DelegatorContractState::Submitted,
            0x04 => DelegatorContractState::Live,
            0x10 => DelegatorContractState::EndedNotSubmitted,
            0x11 => DelegatorContractState::EndedNotConfirmed,
            0x12 => DelegatorContractState::EndedLimits,
            0x13 => DelegatorContractState::EndedWithdrawn,
            0x14 => DelegatorContractState::EndedExpired,
            0x15 => DelegatorContractState::EndedUpgrade,
            0x16 => DelegatorContractState::EndedCannotPay,
            0x17 => DelegatorContractState::EndedSuspended,
            other => DelegatorContractState::Other(other),
        }
    }
}

/// Participation key registration parameters submitted by a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRegTxnInfo {
    pub vote_first: u64,
    pub vote_last: u64,
    pub vote_key_dilution: u64,
    pub vote_pk: [u8; 32],
    pub selection_pk: [u8; 32],
    pub state_proof_pk: [u8; 64],
}

impl Default for KeyRegTxnInfo {
    fn default() -> Self {
        Self {
            vote_first: 0,
            vote_last: 0,
            vote_key_dilution: 0,
            vote_pk: [0u8; 32],
            selection_pk: [0u8; 32],
            state_proof_pk: [0u8; 64],
        }
    }
}

impl AbiRecord for KeyRegTxnInfo {
    const NAME: &'static str = "KeyRegTxnInfo";

    const ABI_TYPE: &'static str = "(uint64,uint64,uint64,byte[32],byte[32],byte[64])";

    fn from_fields(fields: &mut TupleFields) -> Result<Self, NoticeboardError> {
        Ok(Self {
            vote_first: fields.next_u64()?,
            vote_last: fields.next_u64()?,
            vote_key_dilution: fields.next_u64()?,
            vote_pk: fields.next_bytes()?,
            selection_pk: fields.next_bytes()?,
            state_proof_pk: fields.next_bytes()?,
        })
    }

    fn to_abi_value(&self) -> ABIValue {
        ABIValue::Array(vec![
            ABIValue::from(self.vote_first),
            ABIValue::from(self.vote_last),
            ABIValue::from(self.vote_key_dilution),
            ABIValue::from_bytes(&self.vote_pk),
            ABIValue::from_bytes(&self.selection_pk),
            ABIValue::from_bytes(&self.state_proof_pk),
        ])
    }
}

/// Decoded snapshot of a delegator contract's global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegatorContractGlobalState {
    pub state: DelegatorContractState,
    pub del_manager: Address,
    pub validator_ad_app_id: u64,
    pub noticeboard_app_id: u64,
    pub delegation_terms_general: DelegationTermsGeneral,
    pub delegation_terms_balance: DelegationTermsBalance,
    pub round_start: u64,
    pub round_end: u64,
    pub sel_key: [u8; 32],
    pub vote_key: [u8; 32],
    pub state_proof_key: [u8; 64],
    pub vote_key_dilution: u64,
}

impl Default for DelegatorContractGlobalState {
    fn default() -> Self {
        Self {
            state: DelegatorContractState::None,
            del_manager: Address::ZERO,
            validator_ad_app_id: 0,
            noticeboard_app_id: 0,
            delegation_terms_general: DelegationTermsGeneral::default(),
            delegation_terms_balance: DelegationTermsBalance::default(),
            round_start: 0,
            round_end: 0,
            sel_key: [0u8; 32],
            vote_key: [0u8; 32],
            state_proof_key: [0u8; 64],
            vote_key_dilution: 0,
        }
    }
}

impl DelegatorContractGlobalState {
    pub fn from_global_state(gs: &GlobalStateMap) -> Result<Self, NoticeboardError> {
        let [state_tag] = gs.fixed_bytes::<1>("state")?;
        Ok(Self {
            state: DelegatorContractState::from(state_tag),
            del_manager: Address(gs.fixed_bytes("del_manager")?),
            validator_ad_app_id: gs.uint("validator_ad_app_id")?,
            noticeboard_app_id: gs.uint("noticeboard_app_id")?,
            delegation_terms_general: gs.record("delegation_terms_general")?,
            delegation_terms_balance: gs.record("delegation_terms_balance")?,
            round_start: gs.uint("round_start")?,
            round_end: gs.uint("round_end")?,
            sel_key: gs.fixed_bytes("sel_key")?,
            vote_key: gs.fixed_bytes("vote_key")?,
            state_proof_key: gs.fixed_bytes("state_proof_key")?,
            vote_key_dilution: gs.uint("vote_key_dilution")?,
        })
    }

    pub fn to_global_state(&self) -> Result<GlobalStateMap, NoticeboardError> {
        let mut gs = GlobalStateMap::new();
        gs.insert_bytes("state", vec![self.state.tag()]);
        gs.insert_bytes("del_manager", self.del_manager.as_bytes().to_vec());
        gs.insert_uint("validator_ad_app_id", self.validator_ad_app_id);
        gs.insert_uint("noticeboard_app_id", self.noticeboard_app_id);
        gs.insert_record("delegation_terms_general", &self.delegation_terms_general)?;
        gs.insert_record("delegation_terms_balance", &self.delegation_terms_balance)?;
        gs.insert_uint("round_start", self.round_start);
        gs.insert_uint("round_end", self.round_end);
        gs.insert_bytes("sel_key", self.sel_key.to_vec());
        gs.insert_bytes("vote_key", self.vote_key.to_vec());
        gs.insert_bytes("state_proof_key", self.state_proof_key.to_vec());
        gs.insert_uint("vote_key_dilution", self.vote_key_dilution);
        Ok(gs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_global_state_map_conversion() {
        let state = DelegatorContractGlobalState {
            state: DelegatorContractState::Ready,
            del_manager: Address([8u8; 32]),
            validator_ad_app_id: 1001,
            noticeboard_app_id: 1000,
            delegation_terms_general: DelegationTermsGeneral {
                commission: 100_000,
                fee_setup: 1_000_000,
                ..Default::default()
            },
            round_start: 10,
            round_end: 1_010,
            ..Default::default()
        };

        let gs = state.to_global_state().unwrap();
        assert_eq!(
            DelegatorContractGlobalState::from_global_state(&gs).unwrap(),
            state
        );
    }

    #[test]
    fn test_state_tags() {
        for state in [
            DelegatorContractState::Ready,
            DelegatorContractState::Submitted,
            DelegatorContractState::EndedCannotPay,
        ] {
            assert_eq!(DelegatorContractState::from(state.tag()), state);
        }
        assert!(DelegatorContractState::EndedExpired.is_ended());
        assert!(!DelegatorContractState::Live.is_ended());
        assert!(!DelegatorContractState::Other(0x20).is_ended());
    }

    #[test]
    fn test_unknown_state_tag_round_trips() {
        let mut gs = DelegatorContractGlobalState::default()
            .to_global_state()
            .unwrap();
        gs.insert_bytes("state", vec![0x05]);

        let state = DelegatorContractGlobalState::from_global_state(&gs).unwrap();
        assert_eq!(state.state, DelegatorContractState::Other(0x05));
        assert_eq!(state.to_global_state().unwrap(), gs);
    }

    #[test]
    fn test_key_reg_info_layout() {
        let info = KeyRegTxnInfo {
            vote_first: 1,
            vote_last: 2,
            vote_key_dilution: 3,
            vote_pk: [4u8; 32],
            selection_pk: [5u8; 32],
            state_proof_pk: [6u8; 64],
        };
        let encoded = info.encode().unwrap();
        assert_eq!(encoded.len(), 24 + 32 + 32 + 64);
        assert_eq!(KeyRegTxnInfo::decode(&encoded).unwrap(), info);
    }
}
