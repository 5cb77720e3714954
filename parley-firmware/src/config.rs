//! Compile-time board configuration
//!
//! `build.rs` validates board.toml and renders it into `BOARD_CONFIG`.

use parley_core::config::{BatteryConfig, BoardConfig, ButtonTiming, PowerSaveConfig, UiConfig};

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
