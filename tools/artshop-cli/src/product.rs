//! Product files.
//!
//! A product file is the TOML form of one artwork record: identity,
//! admin-panel prices, GST rates, and optionally its own shipping and
//! extra option groups.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use artshop_pricing::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::CliConfig;

/// A product as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFile {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,

    /// Overrides the store default.
    #[serde(default)]
    pub tax_regime: Option<String>,

    pub pricing: ArtworkPricing,

    #[serde(default)]
    pub tax: TaxRates,

    #[serde(default)]
    pub shipping: Option<ProductShipping>,

    /// Extra groups beyond size/frame/glass: group -> label -> surcharge.
    #[serde(default)]
    pub options: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Per-product shipping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductShipping {
    pub charge: f64,
    #[serde(default = "default_slab_size")]
    pub slab_size: i64,
}

fn default_slab_size() -> i64 {
    DEFAULT_SLAB_SIZE
}

impl ProductFile {
    /// Load a product file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read product file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse product file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn product_ref(&self) -> ProductRef {
        ProductRef {
            sku: self.sku.clone(),
            name: self.name.clone(),
            image_url: self.image_url.clone(),
        }
    }

    /// Artwork groups merged with the extra groups.
    pub fn catalog(&self, currency: Currency) -> OptionCatalog {
        let mut catalog = self.pricing.catalog(currency);
        let extra = OptionCatalog::from_decimal_groups(currency, &self.options);
        for (group, labels) in extra.groups {
            for (label, surcharge) in labels {
                catalog.insert(group.clone(), label, surcharge);
            }
        }
        catalog
    }

    /// Regime from `--regime`, else the product, else the config.
    pub fn regime(&self, cli: Option<&str>, config: &CliConfig) -> TaxRegime {
        cli.or(self.tax_regime.as_deref())
            .map(TaxRegime::parse)
            .unwrap_or_else(|| config.regime())
    }

    /// Shipping from the product, else the config fallback.
    pub fn shipping(&self, currency: Currency, config: &CliConfig) -> ShippingPolicy {
        let (charge, slab_size) = match &self.shipping {
            Some(s) => (s.charge, s.slab_size),
            None => (config.shipping.charge, config.shipping.slab_size),
        };
        ShippingPolicy::new(Money::from_decimal(charge, currency), slab_size)
    }

    /// Form input for this product, every option on the sentinel.
    pub fn price_input(&self, regime: TaxRegime, config: &CliConfig) -> PriceInput {
        let currency = config.currency();
        let mut input = PriceInput::new(self.pricing.base_price(currency))
            .with_tax(self.tax, regime)
            .with_shipping(self.shipping(currency, config));
        input.selected_options = self.catalog(currency).unselected();
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
sku = "ART-042"
name = "Monsoon Ghats"
image_url = "uploads/ghats.jpg"

[pricing]
original_price = 1500.0
frame_wooden = 400.0
glass_price = 200.0
size_a4 = 100.0

[tax]
cgst = 6.0
sgst = 6.0
igst = 12.0

[shipping]
charge = 150.0

[options.Mat]
White = 50.0
"#;

    #[test]
    fn test_parse_sample() {
        let product = ProductFile::parse(SAMPLE).unwrap();
        assert_eq!(product.sku, "ART-042");
        assert_eq!(product.tax.cess, 0.0);
        assert_eq!(product.shipping.as_ref().map(|s| s.slab_size), Some(DEFAULT_SLAB_SIZE));
    }

    #[test]
    fn test_catalog_merges_extra_groups() {
        let product = ProductFile::parse(SAMPLE).unwrap();
        let catalog = product.catalog(Currency::INR);
        assert_eq!(catalog.groups.len(), 4);
        assert_eq!(
            catalog.surcharge("Mat", "White"),
            Some(Money::new(5000, Currency::INR))
        );
    }

    #[test]
    fn test_regime_precedence() {
        let mut product = ProductFile::parse(SAMPLE).unwrap();
        let config = CliConfig::default();

        assert_eq!(product.regime(None, &config), TaxRegime::IntraState);
        product.tax_regime = Some("inter_state".to_string());
        assert_eq!(product.regime(None, &config), TaxRegime::InterState);
        assert_eq!(
            product.regime(Some("union_territory"), &config),
            TaxRegime::UnionTerritory
        );
    }

    #[test]
    fn test_price_input_starts_unselected() {
        let product = ProductFile::parse(SAMPLE).unwrap();
        let input = product.price_input(TaxRegime::IntraState, &CliConfig::default());
        let result = compute_price(&input);

        // 1500 + 12% GST + one slab of 150
        assert_eq!(result.display_total(), "1830.00");
        assert!(result.selected_options.is_empty());
    }
}
