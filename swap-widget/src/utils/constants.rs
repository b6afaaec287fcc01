//! Widget constants

pub use shared::dto::WIDGET_MESSAGE_ID;

// Sizing
pub const DEFAULT_WIDGET_WIDTH: u32 = 360;
pub const MIN_WIDGET_WIDTH: u32 = 300;

// Chain polling
pub const POLLING_INTERVAL_MS: u32 = 12_000;
pub const MULTICALL_CHUNK_SIZE: usize = 100;

// Settings presets (percent)
pub const SLIPPAGE_OPTIONS: &[(f64, &str)] = &[(0.1, "0.1%"), (0.5, "0.5%"), (1.0, "1.0%"), (3.0, "3.0%")];
pub const DEFAULT_DEADLINE_MINUTES: u32 = 30;
