//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod clean;
mod read_snapshot;
mod simulate;

pub use clean::Clean;
pub use read_snapshot::ReadSnapshot;
pub use simulate::Simulate;
