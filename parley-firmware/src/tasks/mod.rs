//! Embassy async tasks
//!
//! Sampling tasks lock the shared board for one short operation each;
//! the UI task handles what the board queued.

pub mod buttons;
pub mod power;
pub mod tick;
pub mod ui;

pub use buttons::button_task;
pub use power::{power_task, BatteryAdc};
pub use tick::tick_task;
pub use ui::ui_task;
