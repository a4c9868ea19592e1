//! In-memory stand-in for a network running the Valar contracts.
//!
//! Models what keys_submit touches: the global state of the Noticeboard, validator ads
//! and delegator contracts, the Noticeboard's user and asset boxes, and account balances.
//! Registration and creation fees are not charged.

use std::collections::{HashMap, HashSet};

use base64::{Engine, engine::general_purpose::STANDARD as Base64};
use log::{debug, info, warn};
use valar_abi::Address;

use crate::app_state::GlobalStateMap;
use crate::config::ScenarioConfig;
use crate::constants::{
    ACTION_KEYS_SUBMIT, ALGO_ASA_ID, DLL_DEL, DLL_VAL, ERROR_APP_NOT_WITH_USER,
    ERROR_CALLED_BY_NOT_VAL_MANAGER, ERROR_INSUFFICIENT_BALANCE, ERROR_NOT_STATE_READY,
    ERROR_USER_DOES_NOT_EXIST, MSG_CORE_KEYS_SUBMIT, ROLE_DEL, ROLE_VAL,
};
use crate::delegator_contract::{DelegatorContractGlobalState, DelegatorContractState};
use crate::earnings::{calc_earnings, vote_key_dilution};
use crate::global_state::{NoticeboardGlobalState, NoticeboardState};
use crate::harness::{ActionInputs, ActionResult, HarnessError, InnerTxn, NoticeboardHarness};
use crate::records::{
    AbiRecord, DelegationTermsBalance, DelegationTermsGeneral, NoticeboardAssetInfo,
    NoticeboardTermsNodeLimits, NoticeboardTermsTiming, UserInfo,
};
use crate::validator_ad::{ValidatorAdGlobalState, ValidatorAdState};

/// Apps and assets share one ID counter, as on chain.
const FIRST_ID: u64 = 1_000;
const DISPENSER_FUNDS: u64 = u64::MAX / 2;
const ACCOUNTS_PER_ROLE: usize = 2;
const CNT_DEL_MAX: u64 = 4;
const CNT_BREACH_DEL_MAX: u64 = 3;
const ROUNDS_BREACH: u64 = 1;

pub struct SimulatedNoticeboard {
    config: ScenarioConfig,
    noticeboard_app_id: u64,
    payment_asset_id: u64,
    next_id: u64,
    next_account: u64,
    round: u64,
    dispenser: Address,
    pla_manager: Address,
    val_owners: Vec<Address>,
    val_managers: Vec<Address>,
    del_managers: Vec<Address>,
    partners: Vec<Address>,
    open_accounts: HashSet<Address>,
    global_states: HashMap<u64, GlobalStateMap>,
    boxes: HashMap<u64, HashMap<Vec<u8>, Vec<u8>>>,
    balances: HashMap<(Address, u64), u64>,
}

/// A simulated network configured from the environment.
pub fn simulated_noticeboard() -> Result<SimulatedNoticeboard, HarnessError> {
    SimulatedNoticeboard::new(ScenarioConfig::from_environment())
}

fn reject(code: &str) -> HarnessError {
    warn!("Call rejected: {}", code);
    HarnessError::LogicError {
        code: code.to_string(),
    }
}

fn first_of(accounts: &[Address], role: &str) -> Result<Address, HarnessError> {
    accounts
        .first()
        .copied()
        .ok_or_else(|| HarnessError::Unsupported {
            message: format!("No {} account", role),
        })
}

/// Checks that slot `idx` of the user's table, or the slot found by lookup when no index is
/// given, holds `app_id`.
fn check_app_slot(user: &UserInfo, idx: Option<usize>, app_id: u64) -> Result<(), HarnessError> {
    let idx = idx.or_else(|| user.get_app_idx(app_id));
    match idx.and_then(|i| user.app_ids.get(i)) {
        Some(id) if *id == app_id => Ok(()),
        _ => Err(reject(ERROR_APP_NOT_WITH_USER)),
    }
}

impl SimulatedNoticeboard {
    /// Deploys the Noticeboard, creates the payment asset and funds the test accounts.
    pub fn new(config: ScenarioConfig) -> Result<Self, HarnessError> {
        let mut sim = Self {
            config,
            noticeboard_app_id: 0,
            payment_asset_id: 0,
            next_id: FIRST_ID,
            next_account: 1,
            round: 1,
            dispenser: Address::ZERO,
            pla_manager: Address::ZERO,
            val_owners: Vec::new(),
            val_managers: Vec::new(),
            del_managers: Vec::new(),
            partners: Vec::new(),
            open_accounts: HashSet::new(),
            global_states: HashMap::new(),
            boxes: HashMap::new(),
            balances: HashMap::new(),
        };

        sim.dispenser = sim.new_account();
        sim.balances
            .insert((sim.dispenser, ALGO_ASA_ID), DISPENSER_FUNDS);

        sim.noticeboard_app_id = sim.next_id();
        sim.global_states.insert(
            sim.noticeboard_app_id,
            NoticeboardGlobalState::with_defaults().to_global_state()?,
        );
        sim.boxes.insert(sim.noticeboard_app_id, HashMap::new());

        sim.payment_asset_id = sim.next_id();
        sim.balances
            .insert((sim.dispenser, sim.payment_asset_id), DISPENSER_FUNDS);

        let (algo_amount, asa_amount) = (
            sim.config.acc_dispenser_amt,
            sim.config.acc_dispenser_asa_amt,
        );
        sim.pla_manager = sim.create_and_fund_account(algo_amount, asa_amount)?;
        for _ in 0..ACCOUNTS_PER_ROLE {
            let account = sim.create_and_fund_account(algo_amount, asa_amount)?;
            sim.val_owners.push(account);
            let account = sim.create_and_fund_account(algo_amount, asa_amount)?;
            sim.val_managers.push(account);
            let account = sim.create_and_fund_account(algo_amount, asa_amount)?;
            sim.del_managers.push(account);
            let account = sim.create_and_fund_account(algo_amount, asa_amount)?;
            sim.partners.push(account);
        }

        info!(
            "Simulated Noticeboard {} with payment asset {}",
            sim.noticeboard_app_id, sim.payment_asset_id
        );
        Ok(sim)
    }

    /// ID of the asset, other than ALGO, accepted for payments.
    pub fn payment_asset_id(&self) -> u64 {
        self.payment_asset_id
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn new_account(&mut self) -> Address {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&self.next_account.to_be_bytes());
        self.next_account += 1;

        let address = Address(bytes);
        self.open_accounts.insert(address);
        address
    }

    fn balance(&self, address: &Address, asset_id: u64) -> u64 {
        self.balances
            .get(&(*address, asset_id))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(
        &mut self,
        sender: &Address,
        receiver: &Address,
        asset_id: u64,
        amount: u64,
    ) -> Result<(), HarnessError> {
        let remaining = self
            .balance(sender, asset_id)
            .checked_sub(amount)
            .ok_or_else(|| reject(ERROR_INSUFFICIENT_BALANCE))?;
        self.balances.insert((*sender, asset_id), remaining);
        *self.balances.entry((*receiver, asset_id)).or_insert(0) += amount;
        Ok(())
    }

    fn store_global_state(&mut self, app_id: u64, gs: GlobalStateMap) {
        self.global_states.insert(app_id, gs);
    }

    fn load_user(&self, user: &Address) -> Result<Option<UserInfo>, HarnessError> {
        self.boxes
            .get(&self.noticeboard_app_id)
            .and_then(|boxes| boxes.get(user.as_bytes().as_slice()))
            .map(|data| UserInfo::from_bytes(data))
            .transpose()
            .map_err(HarnessError::from)
    }

    fn store_user(&mut self, user: &Address, info: &UserInfo) -> Result<(), HarnessError> {
        let data = info.encode()?;
        self.boxes
            .entry(self.noticeboard_app_id)
            .or_default()
            .insert(user.as_bytes().to_vec(), data);
        Ok(())
    }

    /// Creates the user box and appends the user to the list for its role.
    fn register_user(&mut self, user: Address, role: [u8; 4]) -> Result<UserInfo, HarnessError> {
        let mut gs = self.get_global_state()?;
        let (dll_name, dll) = if role == ROLE_VAL {
            (DLL_VAL, &mut gs.dll_val)
        } else {
            (DLL_DEL, &mut gs.dll_del)
        };

        let info = UserInfo {
            role,
            dll_name,
            prev_user: dll.user_last,
            ..Default::default()
        };
        if dll.cnt_users == 0 {
            dll.user_first = user;
        } else {
            let last = dll.user_last;
            if let Some(mut prev) = self.load_user(&last)? {
                prev.next_user = user;
                self.store_user(&last, &prev)?;
            }
        }
        dll.user_last = user;
        dll.cnt_users += 1;

        let noticeboard_app_id = self.noticeboard_app_id;
        self.store_global_state(noticeboard_app_id, gs.to_global_state()?);
        self.store_user(&user, &info)?;
        debug!("Registered user {}", user);
        Ok(info)
    }

    /// Records `app_id` in the first free slot of the user's table.
    fn add_user_app(
        &mut self,
        user: Address,
        role: [u8; 4],
        app_id: u64,
    ) -> Result<(), HarnessError> {
        let mut info = match self.load_user(&user)? {
            Some(info) => info,
            None => self.register_user(user, role)?,
        };
        let idx = info
            .get_free_app_idx()
            .ok_or_else(|| HarnessError::Unsupported {
                message: format!("User {} has no free app slot", user),
            })?;
        info.app_ids[idx] = app_id;
        info.cnt_app_ids += 1;
        self.store_user(&user, &info)
    }

    fn keys_submit(
        &mut self,
        app_id: u64,
        action_inputs: &ActionInputs,
        val_app: u64,
        action_account: &Address,
    ) -> Result<ActionResult, HarnessError> {
        let mut dc = self.get_delegator_global_state(app_id)?;
        let mut va = self.get_validator_ad_global_state(val_app)?;

        if *action_account != va.val_manager {
            return Err(reject(ERROR_CALLED_BY_NOT_VAL_MANAGER));
        }

        let del_manager = action_inputs.del_manager.unwrap_or(dc.del_manager);
        let val_owner = action_inputs.val_owner.unwrap_or(va.val_owner);
        let del_user = self
            .load_user(&del_manager)?
            .ok_or_else(|| reject(ERROR_USER_DOES_NOT_EXIST))?;
        let val_user = self
            .load_user(&val_owner)?
            .ok_or_else(|| reject(ERROR_USER_DOES_NOT_EXIST))?;
        check_app_slot(&del_user, action_inputs.del_app_idx, app_id)?;
        check_app_slot(&val_user, action_inputs.val_app_idx, val_app)?;

        if dc.state != DelegatorContractState::Ready {
            return Err(reject(ERROR_NOT_STATE_READY));
        }

        let terms = dc.delegation_terms_general;
        let earnings = calc_earnings(terms.fee_setup, terms.commission)?;
        let dilution = vote_key_dilution(dc.round_start, dc.round_end)?;
        let partner_fee = if terms.partner_address.is_zero() {
            0
        } else {
            terms.fee_setup_partner
        };

        let dc_address = Address::from_app_id(app_id);
        let va_address = Address::from_app_id(val_app);
        let nb_address = Address::from_app_id(self.noticeboard_app_id);
        let required = earnings.total().checked_add(partner_fee);
        let available = self.balance(&dc_address, terms.fee_asset_id);
        if required.is_none_or(|required| available < required) {
            return Err(reject(ERROR_INSUFFICIENT_BALANCE));
        }

        self.transfer(
            &dc_address,
            &va_address,
            terms.fee_asset_id,
            earnings.validator,
        )?;
        self.transfer(
            &dc_address,
            &nb_address,
            terms.fee_asset_id,
            earnings.platform,
        )?;
        if partner_fee > 0 {
            self.transfer(
                &dc_address,
                &terms.partner_address,
                terms.fee_asset_id,
                partner_fee,
            )?;
        }

        let key_reg = &action_inputs.key_reg;
        dc.state = DelegatorContractState::Submitted;
        dc.sel_key = key_reg.selection_pk;
        dc.vote_key = key_reg.vote_pk;
        dc.state_proof_key = key_reg.state_proof_pk;
        dc.vote_key_dilution = dilution;
        self.store_global_state(app_id, dc.to_global_state()?);

        if terms.fee_asset_id == ALGO_ASA_ID {
            va.total_algo_earned += earnings.validator;
            va.total_algo_fees_generated += earnings.platform;
        }
        self.store_global_state(val_app, va.to_global_state());

        let mut inner_txns = vec![InnerTxn {
            sender: nb_address,
            receiver: va_address,
            amount: 0,
            note: Vec::new(),
        }];
        if self.open_accounts.contains(&dc.del_manager) {
            inner_txns.push(InnerTxn {
                sender: nb_address,
                receiver: dc.del_manager,
                amount: 0,
                note: MSG_CORE_KEYS_SUBMIT.to_vec(),
            });
        } else {
            debug!(
                "Delegator manager {} is closed, notification not sent",
                dc.del_manager
            );
        }

        self.round += 1;
        info!(
            "Keys submitted to delegator contract {} in round {}",
            app_id, self.round
        );
        Ok(ActionResult {
            confirmed_round: self.round,
            inner_txns,
        })
    }
}

impl NoticeboardHarness for SimulatedNoticeboard {
    fn noticeboard_app_id(&self) -> u64 {
        self.noticeboard_app_id
    }

    fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    fn dispenser(&self) -> Address {
        self.dispenser
    }

    fn val_owners(&self) -> &[Address] {
        &self.val_owners
    }

    fn val_managers(&self) -> &[Address] {
        &self.val_managers
    }

    fn del_managers(&self) -> &[Address] {
        &self.del_managers
    }

    fn partners(&self) -> &[Address] {
        &self.partners
    }

    fn set_del_manager(&mut self, index: usize, account: Address) -> Result<(), HarnessError> {
        let slot = self
            .del_managers
            .get_mut(index)
            .ok_or_else(|| HarnessError::Unsupported {
                message: format!("No delegator manager at index {}", index),
            })?;
        *slot = account;
        Ok(())
    }

    fn create_and_fund_account(
        &mut self,
        algo_amount: u64,
        asa_amount: u64,
    ) -> Result<Address, HarnessError> {
        let account = self.new_account();
        let dispenser = self.dispenser;
        self.transfer(&dispenser, &account, ALGO_ASA_ID, algo_amount)?;
        self.transfer(&dispenser, &account, self.payment_asset_id, asa_amount)?;
        debug!("Created account {}", account);
        Ok(account)
    }

    fn close_out_account(&mut self, account: &Address) -> Result<(), HarnessError> {
        if !self.open_accounts.remove(account) {
            return Err(HarnessError::UnknownAccount { address: *account });
        }

        let dispenser = self.dispenser;
        let holdings: Vec<(u64, u64)> = self
            .balances
            .iter()
            .filter(|((address, _), _)| address == account)
            .map(|((_, asset_id), amount)| (*asset_id, *amount))
            .collect();
        for (asset_id, amount) in holdings {
            self.transfer(account, &dispenser, asset_id, amount)?;
        }
        info!("Closed account {}", account);
        Ok(())
    }

    fn initialize_state(
        &mut self,
        target_state: NoticeboardState,
        action_inputs: &ActionInputs,
    ) -> Result<(), HarnessError> {
        let mut gs = self.get_global_state()?;
        gs.pla_manager = self.pla_manager;
        gs.noticeboard_terms_timing = NoticeboardTermsTiming {
            rounds_duration_min_min: 1,
            rounds_duration_max_max: self.config.rounds_duration,
            before_expiry: 1,
            report_period: 1,
        };
        gs.noticeboard_terms_node = NoticeboardTermsNodeLimits {
            stake_max_max: self.config.stake_max,
            stake_max_min: 1,
            cnt_del_max_max: CNT_DEL_MAX,
        };
        gs.state = target_state;
        let noticeboard_app_id = self.noticeboard_app_id;
        self.store_global_state(noticeboard_app_id, gs.to_global_state()?);

        let asset_info = NoticeboardAssetInfo {
            accepted: true,
            ..Default::default()
        };
        let box_name = action_inputs.asset.to_be_bytes().to_vec();
        let box_value = asset_info.encode()?;
        self.boxes
            .entry(noticeboard_app_id)
            .or_default()
            .insert(box_name, box_value);

        debug!(
            "Noticeboard {} set to {:?} accepting asset {}",
            noticeboard_app_id, target_state, action_inputs.asset
        );
        Ok(())
    }

    fn initialize_validator_ad_state(
        &mut self,
        action_inputs: &ActionInputs,
        target_state: ValidatorAdState,
    ) -> Result<u64, HarnessError> {
        self.app_get_asset_info(action_inputs.asset)?;
        let val_owner = first_of(&self.val_owners, "validator owner")?;
        let val_manager = first_of(&self.val_managers, "validator manager")?;

        let app_id = self.next_id();
        let va = ValidatorAdGlobalState {
            state: target_state,
            val_owner,
            val_manager,
            noticeboard_app_id: self.noticeboard_app_id,
            ..Default::default()
        };
        self.store_global_state(app_id, va.to_global_state());
        self.add_user_app(val_owner, ROLE_VAL, app_id)?;

        debug!("Validator ad {} created in {:?}", app_id, target_state);
        Ok(app_id)
    }

    fn initialize_delegator_contract_state(
        &mut self,
        action_inputs: &ActionInputs,
        val_app_id: u64,
        target_state: DelegatorContractState,
    ) -> Result<u64, HarnessError> {
        self.app_get_asset_info(action_inputs.asset)?;
        let mut va = self.get_validator_ad_global_state(val_app_id)?;
        let del_manager = first_of(&self.del_managers, "delegator manager")?;

        let (fee_setup_partner, fee_round_partner) = if action_inputs.has_partner() {
            (self.config.fee_setup_partner, self.config.fee_round_partner)
        } else {
            (0, 0)
        };
        let terms = DelegationTermsGeneral {
            commission: self.config.commission,
            fee_round: self.config.fee_round,
            fee_setup: self.config.fee_setup,
            fee_asset_id: action_inputs.asset,
            partner_address: action_inputs.partner_address,
            fee_round_partner,
            fee_setup_partner,
            rounds_breach: ROUNDS_BREACH,
        };
        calc_earnings(terms.fee_setup, terms.commission)?;

        let app_id = self.next_id();
        let prepaid = terms
            .fee_setup
            .checked_add(terms.fee_setup_partner)
            .ok_or_else(|| reject(ERROR_INSUFFICIENT_BALANCE))?;
        self.transfer(
            &del_manager,
            &Address::from_app_id(app_id),
            action_inputs.asset,
            prepaid,
        )?;

        let dc = DelegatorContractGlobalState {
            state: target_state,
            del_manager,
            validator_ad_app_id: val_app_id,
            noticeboard_app_id: self.noticeboard_app_id,
            delegation_terms_general: terms,
            delegation_terms_balance: DelegationTermsBalance {
                stake_max: self.config.stake_max,
                cnt_breach_del_max: CNT_BREACH_DEL_MAX,
                rounds_breach: ROUNDS_BREACH,
                gratis_bonus: 0,
            },
            round_start: self.config.round_start,
            round_end: self.config.round_end(),
            ..Default::default()
        };
        self.store_global_state(app_id, dc.to_global_state()?);

        va.cnt_del += 1;
        self.store_global_state(val_app_id, va.to_global_state());
        self.add_user_app(del_manager, ROLE_DEL, app_id)?;

        debug!(
            "Delegator contract {} created under validator ad {} in {:?}",
            app_id, val_app_id, target_state
        );
        Ok(app_id)
    }

    fn delegator_action(
        &mut self,
        app_id: u64,
        action_name: &str,
        action_inputs: &ActionInputs,
        val_app: u64,
        action_account: &Address,
    ) -> Result<ActionResult, HarnessError> {
        match action_name {
            ACTION_KEYS_SUBMIT => self.keys_submit(app_id, action_inputs, val_app, action_account),
            _ => Err(HarnessError::UnknownAction {
                action: action_name.to_string(),
            }),
        }
    }

    fn read_global_state(&self, app_id: u64) -> Result<GlobalStateMap, HarnessError> {
        let gs = self
            .global_states
            .get(&app_id)
            .ok_or(HarnessError::UnknownApp { app_id })?;
        // Served the way algod lists it.
        Ok(GlobalStateMap::from_teal_key_values(
            &gs.to_teal_key_values(),
        )?)
    }

    fn read_box(&self, app_id: u64, name: &[u8]) -> Result<Vec<u8>, HarnessError> {
        self.boxes
            .get(&app_id)
            .ok_or(HarnessError::UnknownApp { app_id })?
            .get(name)
            .cloned()
            .ok_or_else(|| HarnessError::BoxNotFound {
                name: Base64.encode(name),
            })
    }

    fn available_balance(&self, address: &Address, asset_id: u64) -> Result<u64, HarnessError> {
        Ok(self.balance(address, asset_id))
    }
}
