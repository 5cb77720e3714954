//! Board-agnostic runtime coordination for Parley voice-assistant boards
//!
//! This crate contains all runtime logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (display, audio codec, backlight, application)
//! - Button gesture recognition with debounce
//! - Power-save (idle) timer state machine
//! - Charge and battery monitoring with edge detection
//! - The board coordinator that wires them into one policy
//! - Configuration type definitions and validation

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod config;
pub mod input;
pub mod power;
pub mod traits;

pub use board::{BatteryStatus, Board};
pub use config::BoardConfig;
