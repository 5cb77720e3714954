//! Configuration types
//!
//! Board-agnostic timing and policy settings. Firmware builds resolve
//! these at compile time from `board.toml`; nothing is persisted.

pub mod types;

pub use types::*;
