//! Demo configuration read from the environment.

use anyhow::{Context, Result};
use holdpress_foundation::parse_hold_delay;

pub const SHORT_DELAY_ENV: &str = "HOLD_DEMO_SHORT_DELAY_MS";
pub const LONG_DELAY_ENV: &str = "HOLD_DEMO_LONG_DELAY_MS";

/// Long button delay when the environment does not override it.
pub const DEFAULT_LONG_DELAY_MS: f64 = 2_000.0;

#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    /// `None` leaves the short button on the gesture's default delay.
    pub short_delay_ms: Option<f64>,
    pub long_delay_ms: Option<f64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            short_delay_ms: None,
            long_delay_ms: Some(DEFAULT_LONG_DELAY_MS),
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source. Unset keys keep
    /// their defaults; set but malformed keys are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(SHORT_DELAY_ENV) {
            let delay =
                parse_hold_delay(&raw).with_context(|| format!("invalid {SHORT_DELAY_ENV}"))?;
            config.short_delay_ms = Some(delay);
        }
        if let Some(raw) = lookup(LONG_DELAY_ENV) {
            let delay =
                parse_hold_delay(&raw).with_context(|| format!("invalid {LONG_DELAY_ENV}"))?;
            config.long_delay_ms = Some(delay);
        }
        Ok(config)
    }

    /// Effective delays as the buttons will resolve them.
    pub fn effective_delays(&self) -> (f64, f64) {
        (
            holdpress_foundation::resolve_hold_delay(self.short_delay_ms),
            holdpress_foundation::resolve_hold_delay(self.long_delay_ms),
        )
    }
}
