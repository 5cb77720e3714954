//! Hardware driver implementations
//!
//! This crate provides embedded-hal backed implementations of the
//! capabilities the Parley board runtime needs:
//!
//! - Push buttons with configurable polarity
//! - Charge-detect line and battery voltage sensing
//! - PWM display backlight with a saved user level

#![no_std]
#![deny(unsafe_code)]

pub mod backlight;
pub mod button;
pub mod sensor;
