#![allow(dead_code)]
pub mod faulty;

use std::sync::Once;

use rstest::fixture;
use valar_noticeboard::ScenarioConfig;
use valar_noticeboard::constants::ALGO_ASA_ID;
use valar_noticeboard::testing::SimulatedNoticeboard;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .format_target(true)
            .format_module_path(false)
            .try_init();
    });
}

pub type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Asset a delegation pays its fees in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentAsset {
    Algo,
    Asa,
}

impl PaymentAsset {
    pub fn id(self, noticeboard: &SimulatedNoticeboard) -> u64 {
        match self {
            PaymentAsset::Algo => ALGO_ASA_ID,
            PaymentAsset::Asa => noticeboard.payment_asset_id(),
        }
    }
}

pub fn new_noticeboard() -> SimulatedNoticeboard {
    init_test_logging();
    SimulatedNoticeboard::new(ScenarioConfig::default())
        .expect("Failed to set up the simulated Noticeboard")
}

#[fixture]
pub fn noticeboard() -> SimulatedNoticeboard {
    new_noticeboard()
}
