use valar_noticeboard::testing::SimulatedNoticeboard;
use valar_noticeboard::{
    AbiRecord, ActionInputs, ActionResult, Address, DelegatorContractState, GlobalStateMap,
    HarnessError, NoticeboardHarness, NoticeboardState, ScenarioConfig, UserInfo,
    ValidatorAdState,
};

use super::new_noticeboard;

/// A misbehavior injected on top of the simulated contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    None,
    /// Clears the note of the last inner transaction.
    DropNotification,
    /// Reports one unit less in the Noticeboard balance after a confirmed action.
    SkimPlatformShare,
    /// Ignores the delegator manager and validator owner overrides.
    AcceptUnknownUsers,
    /// Reports an extra delegation in the validator ad after a rejected action.
    AlterValidatorAdOnRejection,
    /// Reports a different `next_user` in the delegator manager's box after a rejected action.
    AlterUserBoxOnRejection,
    /// Lists no validator managers.
    NoValidatorManager,
}

/// Delegates to [`SimulatedNoticeboard`] and misbehaves as `fault` says.
pub struct FaultyNoticeboard {
    inner: SimulatedNoticeboard,
    fault: Fault,
    skimmed_asset: Option<u64>,
    rejected_val_app: Option<u64>,
}

impl FaultyNoticeboard {
    pub fn new(fault: Fault) -> Self {
        Self {
            inner: new_noticeboard(),
            fault,
            skimmed_asset: None,
            rejected_val_app: None,
        }
    }

    pub fn inner(&self) -> &SimulatedNoticeboard {
        &self.inner
    }
}

impl NoticeboardHarness for FaultyNoticeboard {
    fn noticeboard_app_id(&self) -> u64 {
        self.inner.noticeboard_app_id()
    }

    fn config(&self) -> &ScenarioConfig {
        self.inner.config()
    }

    fn dispenser(&self) -> Address {
        self.inner.dispenser()
    }

    fn val_owners(&self) -> &[Address] {
        self.inner.val_owners()
    }

    fn val_managers(&self) -> &[Address] {
        if self.fault == Fault::NoValidatorManager {
            return &[];
        }
        self.inner.val_managers()
    }

    fn del_managers(&self) -> &[Address] {
        self.inner.del_managers()
    }

    fn partners(&self) -> &[Address] {
        self.inner.partners()
    }

    fn set_del_manager(&mut self, index: usize, account: Address) -> Result<(), HarnessError> {
        self.inner.set_del_manager(index, account)
    }

    fn create_and_fund_account(
        &mut self,
        algo_amount: u64,
        asa_amount: u64,
    ) -> Result<Address, HarnessError> {
        self.inner.create_and_fund_account(algo_amount, asa_amount)
    }

    fn close_out_account(&mut self, account: &Address) -> Result<(), HarnessError> {
        self.inner.close_out_account(account)
    }

    fn initialize_state(
        &mut self,
        target_state: NoticeboardState,
        action_inputs: &ActionInputs,
    ) -> Result<(), HarnessError> {
        self.inner.initialize_state(target_state, action_inputs)
    }

    fn initialize_validator_ad_state(
        &mut self,
        action_inputs: &ActionInputs,
        target_state: ValidatorAdState,
    ) -> Result<u64, HarnessError> {
        self.inner
            .initialize_validator_ad_state(action_inputs, target_state)
    }

    fn initialize_delegator_contract_state(
        &mut self,
        action_inputs: &ActionInputs,
        val_app_id: u64,
        target_state: DelegatorContractState,
    ) -> Result<u64, HarnessError> {
        self.inner
            .initialize_delegator_contract_state(action_inputs, val_app_id, target_state)
    }

    fn delegator_action(
        &mut self,
        app_id: u64,
        action_name: &str,
        action_inputs: &ActionInputs,
        val_app: u64,
        action_account: &Address,
    ) -> Result<ActionResult, HarnessError> {
        let mut inputs = action_inputs.clone();
        if self.fault == Fault::AcceptUnknownUsers {
            inputs.del_manager = None;
            inputs.val_owner = None;
        }

        let result = self
            .inner
            .delegator_action(app_id, action_name, &inputs, val_app, action_account);
        match result {
            Ok(mut res) => {
                if self.fault == Fault::DropNotification {
                    if let Some(txn) = res.inner_txns.last_mut() {
                        txn.note.clear();
                    }
                }
                if self.fault == Fault::SkimPlatformShare {
                    self.skimmed_asset = Some(inputs.asset);
                }
                Ok(res)
            }
            Err(e) => {
                self.rejected_val_app = Some(val_app);
                Err(e)
            }
        }
    }

    fn read_global_state(&self, app_id: u64) -> Result<GlobalStateMap, HarnessError> {
        let mut gs = self.inner.read_global_state(app_id)?;
        let rejected = self.rejected_val_app == Some(app_id);
        if self.fault == Fault::AlterValidatorAdOnRejection && rejected {
            let cnt_del = gs.uint("cnt_del")?;
            gs.insert_uint("cnt_del", cnt_del + 1);
        }
        Ok(gs)
    }

    fn read_box(&self, app_id: u64, name: &[u8]) -> Result<Vec<u8>, HarnessError> {
        let data = self.inner.read_box(app_id, name)?;
        let is_del_manager_box = self
            .inner
            .del_managers()
            .first()
            .is_some_and(|del_manager| del_manager.as_bytes() == name);
        if self.fault == Fault::AlterUserBoxOnRejection
            && self.rejected_val_app.is_some()
            && is_del_manager_box
        {
            let mut info = UserInfo::from_bytes(&data)?;
            info.next_user = Address([0xee; 32]);
            return Ok(info.encode()?);
        }
        Ok(data)
    }

    fn available_balance(&self, address: &Address, asset_id: u64) -> Result<u64, HarnessError> {
        let balance = self.inner.available_balance(address, asset_id)?;
        let noticeboard = Address::from_app_id(self.inner.noticeboard_app_id());
        if self.skimmed_asset == Some(asset_id) && *address == noticeboard {
            return Ok(balance.saturating_sub(1));
        }
        Ok(balance)
    }
}
