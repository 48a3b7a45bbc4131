//! CLI configuration.

use anyhow::{Context, Result};
use artshop_pricing::prelude::{Currency, TaxRegime, DEFAULT_SLAB_SIZE};
use serde::{Deserialize, Serialize};

/// Config file names searched from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["artshop.toml", ".artshop.toml", "artshop.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Store-wide defaults.
    #[serde(default)]
    pub store: StoreConfig,

    /// Shipping used when a product file has none.
    #[serde(default)]
    pub shipping: ShippingConfig,

    /// Output preferences.
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Store currency, falling back to INR for unknown codes.
    pub fn currency(&self) -> Currency {
        Currency::from_code(&self.store.currency).unwrap_or_default()
    }

    /// Default tax regime.
    pub fn regime(&self) -> TaxRegime {
        TaxRegime::parse(&self.store.default_regime)
    }
}

/// Store defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Regime applied when neither the product nor `--regime` says.
    #[serde(default = "default_regime")]
    pub default_regime: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_regime() -> String {
    "intra_state".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            default_regime: default_regime(),
        }
    }
}

/// Fallback shipping policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingConfig {
    /// Charge per slab in major units.
    #[serde(default)]
    pub charge: f64,

    /// Units per slab.
    #[serde(default = "default_slab_size")]
    pub slab_size: i64,
}

fn default_slab_size() -> i64 {
    DEFAULT_SLAB_SIZE
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            charge: 0.0,
            slab_size: default_slab_size(),
        }
    }
}

/// Output preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print the per-component tax lines in quotes.
    #[serde(default = "default_true")]
    pub show_breakdown: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_breakdown: true,
        }
    }
}

/// Generate a default artshop.toml.
pub fn generate_default_config() -> String {
    format!(
        r#"# Artshop pricing configuration

[store]
currency = "INR"
# intra_state | inter_state | union_territory
default_regime = "intra_state"

[shipping]
# Used when a product file has no [shipping] table
charge = 0.0
slab_size = {slab}

[output]
show_breakdown = true
"#,
        slab = DEFAULT_SLAB_SIZE
    )
}
