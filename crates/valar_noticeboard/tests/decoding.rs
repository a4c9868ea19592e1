mod common;

use pretty_assertions::assert_eq;
use rstest::rstest;
use valar_noticeboard::constants::{APP_IDS_CAPACITY, DLL_VAL, ROLE_VAL};
use valar_noticeboard::{
    AbiRecord, Address, GlobalStateMap, NoticeboardAssetInfo, NoticeboardError, UserInfo,
    ValidatorAdGlobalState, ValidatorAdState, decode_noticeboard_asset_box,
    decode_noticeboard_fees,
};

use crate::common::{TestResult, init_test_logging};

const VALIDATOR_AD_GLOBAL_STATE_JSON: &str = r#"[
    {"key": "c3RhdGU=", "value": {"bytes": "BQ==", "type": 1, "uint": 0}},
    {"key": "dmFsX293bmVy", "value": {"bytes": "AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE=", "type": 1, "uint": 0}},
    {"key": "dmFsX21hbmFnZXI=", "value": {"bytes": "AgICAgICAgICAgICAgICAgICAgICAgICAgICAgICAgI=", "type": 1, "uint": 0}},
    {"key": "bm90aWNlYm9hcmRfYXBwX2lk", "value": {"bytes": "", "type": 2, "uint": 1000}},
    {"key": "Y250X2RlbA==", "value": {"bytes": "", "type": 2, "uint": 3}},
    {"key": "dG90YWxfYWxnb19lYXJuZWQ=", "value": {"bytes": "", "type": 2, "uint": 2111111}},
    {"key": "dG90YWxfYWxnb19mZWVzX2dlbmVyYXRlZA==", "value": {"type": 2, "uint": 234567}}
]"#;

fn user_box(app_ids: &[(usize, u64)], cnt_app_ids: u64) -> Vec<u8> {
    let mut slots = [0u64; APP_IDS_CAPACITY];
    for (idx, app_id) in app_ids {
        slots[*idx] = *app_id;
    }

    let mut data = Vec::new();
    data.extend_from_slice(&ROLE_VAL);
    data.extend_from_slice(&DLL_VAL);
    data.extend_from_slice(&[0u8; 32]);
    data.extend_from_slice(&[7u8; 32]);
    for slot in slots {
        data.extend_from_slice(&slot.to_be_bytes());
    }
    data.extend_from_slice(&cnt_app_ids.to_be_bytes());
    data
}

#[test]
fn test_validator_ad_state_from_algod_json() -> TestResult {
    init_test_logging();
    let gs = GlobalStateMap::from_json(VALIDATOR_AD_GLOBAL_STATE_JSON)?;
    assert_eq!(gs.len(), 7);

    let state = ValidatorAdGlobalState::from_global_state(&gs)?;
    assert_eq!(
        state,
        ValidatorAdGlobalState {
            state: ValidatorAdState::Ready,
            val_owner: Address([1u8; 32]),
            val_manager: Address([2u8; 32]),
            noticeboard_app_id: 1000,
            cnt_del: 3,
            total_algo_earned: 2_111_111,
            total_algo_fees_generated: 234_567,
        }
    );
    Ok(())
}

#[test]
fn test_wrong_value_kind_is_reported() {
    let json = VALIDATOR_AD_GLOBAL_STATE_JSON.replace(
        r#"{"bytes": "", "type": 2, "uint": 3}"#,
        r#"{"bytes": "AQ==", "type": 1, "uint": 0}"#,
    );
    let gs = GlobalStateMap::from_json(&json).unwrap();

    assert_eq!(
        ValidatorAdGlobalState::from_global_state(&gs).unwrap_err(),
        NoticeboardError::StateValueMismatch {
            key: "cnt_del".to_string(),
            expected: "a uint",
        }
    );
}

#[test]
fn test_user_box_slots() -> TestResult {
    let info = UserInfo::from_bytes(&user_box(&[(1, 1005), (4, 1007)], 2))?;

    assert!(info.is_validator());
    assert_eq!(info.next_user, Address([7u8; 32]));
    assert_eq!(info.cnt_app_ids, 2);
    assert_eq!(info.get_free_app_idx(), Some(0));
    assert_eq!(info.get_app_idx(1005), Some(1));
    assert_eq!(info.get_app_idx(1007), Some(4));
    assert_eq!(info.get_app_idx(1006), None);
    assert_eq!(info.encode()?, user_box(&[(1, 1005), (4, 1007)], 2));
    Ok(())
}

#[test]
fn test_user_box_count_over_capacity() {
    let err = UserInfo::from_bytes(&user_box(&[], 111)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid UserInfo: cnt_app_ids 111 exceeds the capacity of 110 slots"
    );
}

#[rstest]
#[case::accepted("01", true)]
#[case::not_accepted("00", false)]
fn test_asset_box(#[case] flag: &str, #[case] accepted: bool) -> TestResult {
    let data = hex::decode(format!(
        "{}{}{}{}",
        flag, "0000000000002710", "0000000000000064", "00000000000f4240"
    ))?;

    assert_eq!(
        decode_noticeboard_asset_box(&data)?,
        NoticeboardAssetInfo {
            accepted,
            fee_round_min_min: 10_000,
            fee_round_var_min: 100,
            fee_setup_min: 1_000_000,
        }
    );
    Ok(())
}

#[test]
fn test_truncated_fees_are_rejected() {
    let data = hex::decode("00000000000000010000000000000002").unwrap();
    assert!(matches!(
        decode_noticeboard_fees(&data),
        Err(NoticeboardError::Decode { .. })
    ));
}
