pub mod simulated;

pub use simulated::{SimulatedNoticeboard, simulated_noticeboard};
