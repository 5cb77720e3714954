//! Build script for parley-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml and compiles it into a `BoardConfig` const

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use parley_core::config::{BoardConfig, ConfigError};

fn main() {
    setup_linker();
    generate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Parse, validate and emit board.toml as Rust source
fn generate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");
    if !config_path.exists() {
        fail("board.toml not found", &["The firmware requires a board.toml file."]);
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read board.toml", &[&e.to_string()]),
    };

    let config: BoardConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            let msg = e.to_string();
            let lines: Vec<&str> = msg.lines().collect();
            fail("Invalid board.toml", &lines)
        }
    };

    if let Err(e) = config.validate() {
        fail("Invalid values in board.toml", &[describe(e)]);
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("board_config.rs"), render(&config)).unwrap();

    println!("cargo:warning=board.toml validated successfully");
}

fn describe(error: ConfigError) -> &'static str {
    match error {
        ConfigError::LongPressWithinDebounce => {
            "[buttons] long_press_ms must be greater than debounce_ms"
        }
        ConfigError::ZeroIdleThreshold => "[power_save] idle_secs must be at least 1",
        ConfigError::ShutdownBeforeIdle => {
            "[power_save] shutdown_secs must be -1 or greater than idle_secs"
        }
        ConfigError::BrightnessOutOfRange => "[power_save] dim_brightness must be 0-100",
        ConfigError::BatteryWindowOutOfRange => "[battery] sample_window must be 1-16",
        ConfigError::ZeroConfirmSamples => "[battery] confirm_samples must be at least 1",
        ConfigError::LowThresholdOutOfRange => "[battery] low_threshold must be 0-100",
        ConfigError::VolumeStepOutOfRange => "[ui] volume_step must be 1-100",
    }
}

/// Render the config as a const item
fn render(config: &BoardConfig) -> String {
    let shutdown = match config.power_save.shutdown_secs {
        Some(secs) => format!("Some({})", secs),
        None => "None".to_string(),
    };

    format!(
        "/// Board configuration resolved from board.toml\n\
         pub const BOARD_CONFIG: BoardConfig = BoardConfig {{\n    \
             buttons: ButtonTiming {{ debounce_ms: {}, long_press_ms: {} }},\n    \
             power_save: PowerSaveConfig {{ idle_secs: {}, shutdown_secs: {}, dim_brightness: {} }},\n    \
             battery: BatteryConfig {{ confirm_samples: {}, sample_window: {}, low_threshold: {} }},\n    \
             ui: UiConfig {{ volume_step: {} }},\n\
         }};\n",
        config.buttons.debounce_ms,
        config.buttons.long_press_ms,
        config.power_save.idle_secs,
        shutdown,
        config.power_save.dim_brightness,
        config.battery.confirm_samples,
        config.battery.sample_window,
        config.battery.low_threshold,
        config.ui.volume_step,
    )
}

/// Abort the build with a boxed error message
fn fail(title: &str, details: &[&str]) -> ! {
    let body = details
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<58} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
