//! Scenarios for a validator submitting participation keys to a delegator contract.
use log::{debug, info};
use valar_abi::Address;

use super::{
    Scenario, ScenarioError, ScenarioOutcome, Snapshot, check_eq, expect_logic_error,
    first_account,
};
use crate::constants::{
    ACTION_KEYS_SUBMIT, ALGO_ASA_ID, ERROR_APP_NOT_WITH_USER, ERROR_USER_DOES_NOT_EXIST,
    MSG_CORE_KEYS_SUBMIT,
};
use crate::delegator_contract::DelegatorContractState;
use crate::earnings::{calc_earnings, vote_key_dilution};
use crate::global_state::NoticeboardState;
use crate::harness::{ActionInputs, ActionResult, HarnessError, NoticeboardHarness};
use crate::validator_ad::ValidatorAdState;

const NB_STATE: NoticeboardState = NoticeboardState::Set;
const VA_STATE: ValidatorAdState = ValidatorAdState::Ready;
const DC_STATE: DelegatorContractState = DelegatorContractState::Ready;

const SKIP_SAME_AS_FOR_ALGO: &str = "Same behavior as when paying in ALGO";

/// Apps created by [`setup`] and the validator manager that acts on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub val_app_id: u64,
    pub del_app_id: u64,
    pub val_manager: Address,
}

/// All keys_submit scenarios, by name.
pub fn all<H: NoticeboardHarness>() -> Vec<(&'static str, Scenario<H>)> {
    vec![
        ("action", action::<H> as Scenario<H>),
        (
            "del_manager_does_not_exist",
            del_manager_does_not_exist::<H> as Scenario<H>,
        ),
        (
            "val_owner_does_not_exist",
            val_owner_does_not_exist::<H> as Scenario<H>,
        ),
        ("wrong_indices", wrong_indices::<H> as Scenario<H>),
        ("action_w_partner", action_w_partner::<H> as Scenario<H>),
        (
            "notification_message_not_sent",
            notification_message_not_sent::<H> as Scenario<H>,
        ),
    ]
}

/// Brings the Noticeboard, a validator ad and a delegator contract to the states
/// keys_submit starts from.
pub fn setup<H: NoticeboardHarness>(
    nb: &mut H,
    action_inputs: &ActionInputs,
) -> Result<Deployment, ScenarioError> {
    let val_manager = first_account(nb.val_managers(), "validator manager")?;
    nb.initialize_state(NB_STATE, action_inputs)?;
    let val_app_id = nb.initialize_validator_ad_state(action_inputs, VA_STATE)?;
    let del_app_id = nb.initialize_delegator_contract_state(action_inputs, val_app_id, DC_STATE)?;
    debug!(
        "Set up validator ad {} and delegator contract {}",
        val_app_id, del_app_id
    );
    Ok(Deployment {
        val_app_id,
        del_app_id,
        val_manager,
    })
}

fn submit<H: NoticeboardHarness>(
    nb: &mut H,
    deployment: Deployment,
    action_inputs: &ActionInputs,
) -> Result<ActionResult, HarnessError> {
    nb.delegator_action(
        deployment.del_app_id,
        ACTION_KEYS_SUBMIT,
        action_inputs,
        deployment.val_app_id,
        &deployment.val_manager,
    )
}

fn check_confirmed(res: &ActionResult) -> Result<(), ScenarioError> {
    if res.confirmed_round == 0 {
        return Err(ScenarioError::Mismatch {
            what: "confirmed round".to_string(),
            expected: "a non-zero round".to_string(),
            actual: "0".to_string(),
        });
    }
    Ok(())
}

fn skip_unless_algo(asset: u64) -> Option<ScenarioOutcome> {
    (asset != ALGO_ASA_ID).then(|| ScenarioOutcome::Skipped {
        reason: SKIP_SAME_AS_FOR_ALGO.to_string(),
    })
}

/// Submits keys and checks messages, balances, contract states and user records.
pub fn action<H: NoticeboardHarness>(
    nb: &mut H,
    asset: u64,
) -> Result<ScenarioOutcome, ScenarioError> {
    let action_inputs = ActionInputs::new(asset);
    let deployment = setup(nb, &action_inputs)?;

    let start = Snapshot::capture(nb, deployment.val_app_id, deployment.del_app_id, asset)?;

    let res = submit(nb, deployment, &action_inputs)?;
    check_confirmed(&res)?;

    let note = res.inner_txns.last().map(|txn| txn.note.as_slice());
    check_eq("notification note", &Some(MSG_CORE_KEYS_SUBMIT), &note)?;

    check_eq(
        "Noticeboard global state",
        &start.global_state,
        &nb.get_global_state()?,
    )?;

    let end = Snapshot::capture(nb, deployment.val_app_id, deployment.del_app_id, asset)?;
    let terms = &start.delegator_contract.delegation_terms_general;
    let paid = terms.fee_setup;
    let earnings = calc_earnings(paid, terms.commission)?;
    debug!("Setup fee {} split into {:?}", paid, earnings);

    let algo_platform = if asset == ALGO_ASA_ID {
        earnings.platform
    } else {
        0
    };
    check_eq(
        "Noticeboard ALGO balance",
        &(start.noticeboard_algo + algo_platform),
        &end.noticeboard_algo,
    )?;
    check_eq(
        "Noticeboard asset balance",
        &(start.noticeboard_asset + earnings.platform),
        &end.noticeboard_asset,
    )?;
    check_eq(
        "validator ad balance",
        &(start.validator_ad_balance + earnings.validator),
        &end.validator_ad_balance,
    )?;
    check_eq(
        "delegator contract balance",
        &start.delegator_contract_balance.checked_sub(paid),
        &Some(end.delegator_contract_balance),
    )?;

    let key_reg = action_inputs.key_reg;
    let mut dc_expected = start.delegator_contract.clone();
    dc_expected.state = DelegatorContractState::Submitted;
    dc_expected.sel_key = key_reg.selection_pk;
    dc_expected.vote_key = key_reg.vote_pk;
    dc_expected.state_proof_key = key_reg.state_proof_pk;
    dc_expected.vote_key_dilution =
        vote_key_dilution(dc_expected.round_start, dc_expected.round_end)?;
    check_eq(
        "delegator contract state",
        &dc_expected,
        &end.delegator_contract,
    )?;

    let mut va_expected = start.validator_ad.clone();
    if asset == ALGO_ASA_ID {
        va_expected.total_algo_earned += earnings.validator;
        va_expected.total_algo_fees_generated += earnings.platform;
    }
    check_eq("validator ad state", &va_expected, &end.validator_ad)?;

    check_eq(
        "delegator user info",
        &start.del_user_info,
        &end.del_user_info,
    )?;
    check_eq(
        "validator user info",
        &start.val_user_info,
        &end.val_user_info,
    )?;

    info!(
        "Keys submitted to delegator contract {}",
        deployment.del_app_id
    );
    Ok(ScenarioOutcome::Passed)
}

fn rejected_without_changes<H: NoticeboardHarness>(
    nb: &mut H,
    asset: u64,
    code: &str,
    override_inputs: impl FnOnce(&mut ActionInputs, Address),
) -> Result<ScenarioOutcome, ScenarioError> {
    let mut action_inputs = ActionInputs::new(asset);
    let deployment = setup(nb, &action_inputs)?;
    let start = Snapshot::capture(nb, deployment.val_app_id, deployment.del_app_id, asset)?;

    override_inputs(&mut action_inputs, nb.dispenser());
    expect_logic_error(
        ACTION_KEYS_SUBMIT,
        code,
        submit(nb, deployment, &action_inputs),
    )?;

    let end = Snapshot::capture(nb, deployment.val_app_id, deployment.del_app_id, asset)?;
    check_eq("state after rejection", &start, &end)?;
    Ok(ScenarioOutcome::Passed)
}

/// Names a delegator manager without a user record.
pub fn del_manager_does_not_exist<H: NoticeboardHarness>(
    nb: &mut H,
    asset: u64,
) -> Result<ScenarioOutcome, ScenarioError> {
    if let Some(skipped) = skip_unless_algo(asset) {
        return Ok(skipped);
    }
    rejected_without_changes(nb, asset, ERROR_USER_DOES_NOT_EXIST, |inputs, dispenser| {
        inputs.del_manager = Some(dispenser)
    })
}

/// Names a validator owner without a user record.
pub fn val_owner_does_not_exist<H: NoticeboardHarness>(
    nb: &mut H,
    asset: u64,
) -> Result<ScenarioOutcome, ScenarioError> {
    if let Some(skipped) = skip_unless_algo(asset) {
        return Ok(skipped);
    }
    rejected_without_changes(nb, asset, ERROR_USER_DOES_NOT_EXIST, |inputs, dispenser| {
        inputs.val_owner = Some(dispenser)
    })
}

/// Points the delegator slot, then the validator slot, at an index that does not hold the app.
pub fn wrong_indices<H: NoticeboardHarness>(
    nb: &mut H,
    asset: u64,
) -> Result<ScenarioOutcome, ScenarioError> {
    if let Some(skipped) = skip_unless_algo(asset) {
        return Ok(skipped);
    }

    let mut action_inputs = ActionInputs::new(asset);
    let deployment = setup(nb, &action_inputs)?;
    let start = Snapshot::capture(nb, deployment.val_app_id, deployment.del_app_id, asset)?;

    action_inputs.del_app_idx = Some(99);
    expect_logic_error(
        ACTION_KEYS_SUBMIT,
        ERROR_APP_NOT_WITH_USER,
        submit(nb, deployment, &action_inputs),
    )?;
    action_inputs.del_app_idx = None;

    action_inputs.val_app_idx = Some(77);
    expect_logic_error(
        ACTION_KEYS_SUBMIT,
        ERROR_APP_NOT_WITH_USER,
        submit(nb, deployment, &action_inputs),
    )?;

    let end = Snapshot::capture(nb, deployment.val_app_id, deployment.del_app_id, asset)?;
    check_eq("state after rejection", &start, &end)?;
    Ok(ScenarioOutcome::Passed)
}

/// Submits keys for a delegation made through a partner.
pub fn action_w_partner<H: NoticeboardHarness>(
    nb: &mut H,
    asset: u64,
) -> Result<ScenarioOutcome, ScenarioError> {
    let partner_address = first_account(nb.partners(), "partner")?;
    let action_inputs = ActionInputs::new(asset).with_partner(partner_address);
    let deployment = setup(nb, &action_inputs)?;

    let gs_start = nb.get_global_state()?;
    let del_start = nb.get_delegator_global_state(deployment.del_app_id)?;
    let bal_partner_start = nb.available_balance(&partner_address, asset)?;

    let res = submit(nb, deployment, &action_inputs)?;
    check_confirmed(&res)?;

    check_eq(
        "Noticeboard global state",
        &gs_start,
        &nb.get_global_state()?,
    )?;

    let paid_partner = del_start.delegation_terms_general.fee_setup_partner;
    check_eq(
        "partner balance",
        &(bal_partner_start + paid_partner),
        &nb.available_balance(&partner_address, asset)?,
    )?;
    Ok(ScenarioOutcome::Passed)
}

/// Closes the delegator manager's account before the action, so no notification can be
/// delivered.
pub fn notification_message_not_sent<H: NoticeboardHarness>(
    nb: &mut H,
    asset: u64,
) -> Result<ScenarioOutcome, ScenarioError> {
    if let Some(skipped) = skip_unless_algo(asset) {
        return Ok(skipped);
    }

    let (algo_amount, asa_amount) = (
        nb.config().acc_dispenser_amt,
        nb.config().acc_dispenser_asa_amt,
    );
    let del_manager = nb.create_and_fund_account(algo_amount, asa_amount)?;
    nb.set_del_manager(0, del_manager)?;

    let action_inputs = ActionInputs::new(asset);
    let deployment = setup(nb, &action_inputs)?;

    nb.close_out_account(&del_manager)?;

    let res = submit(nb, deployment, &action_inputs)?;
    check_confirmed(&res)?;
    check_eq("inner transaction count", &1, &res.inner_txns.len())?;
    Ok(ScenarioOutcome::Passed)
}
