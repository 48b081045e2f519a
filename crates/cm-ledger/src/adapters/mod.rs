pub mod memory_ledger;
pub mod simulator;

pub use memory_ledger::*;
pub use simulator::*;
