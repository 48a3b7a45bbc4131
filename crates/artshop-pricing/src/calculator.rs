//! The price calculator.
//!
//! [`compute_price`] turns the current state of a product form into the
//! amount shown to the shopper. It never fails: bad numbers degrade to
//! zero, bad quantities to one, unknown regimes to no GST. The backend
//! recomputes everything before charging, so this result is advisory.

use crate::money::{Currency, Money};
use crate::options::{self, OptionSelection, SelectedOptions};
use crate::quantity::Quantity;
use crate::shipping::ShippingPolicy;
use crate::tax::{TaxComponent, TaxRates, TaxRegime};
use serde::{Deserialize, Serialize};

/// Everything the calculator reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceInput {
    /// Base price excluding options and tax.
    pub base_unit_price: Money,
    /// One entry per option group shown for the product.
    #[serde(default)]
    pub selected_options: OptionSelection,
    #[serde(default)]
    pub quantity: Quantity,
    #[serde(default)]
    pub tax_rates: TaxRates,
    #[serde(default)]
    pub tax_regime: TaxRegime,
    /// `None` means free shipping.
    #[serde(default)]
    pub shipping: Option<ShippingPolicy>,
}

impl PriceInput {
    /// Input for a single unit with no options, tax or shipping.
    pub fn new(base_unit_price: Money) -> Self {
        Self {
            base_unit_price,
            selected_options: OptionSelection::new(),
            quantity: Quantity::ONE,
            tax_rates: TaxRates::default(),
            tax_regime: TaxRegime::Unknown,
            shipping: None,
        }
    }

    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_option(mut self, group: impl Into<String>, choice: options::OptionChoice) -> Self {
        self.selected_options.insert(group.into(), choice);
        self
    }

    pub fn with_tax(mut self, rates: TaxRates, regime: TaxRegime) -> Self {
        self.tax_rates = rates;
        self.tax_regime = regime;
        self
    }

    pub fn with_shipping(mut self, shipping: ShippingPolicy) -> Self {
        self.shipping = Some(shipping);
        self
    }

    /// Currency every amount is computed in.
    pub fn currency(&self) -> Currency {
        self.base_unit_price.currency
    }
}

/// Full breakdown of a computed price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    /// Base price plus every selected surcharge.
    pub unit_price_with_options: Money,
    /// Quantity actually priced, after coercion.
    pub quantity: Quantity,
    /// `unit_price_with_options * quantity`.
    pub subtotal: Money,
    /// Regime rate plus CESS, in percent.
    pub effective_tax_rate: f64,
    pub tax_amount: Money,
    /// Per-component view of the tax, for invoices.
    pub tax_components: Vec<TaxComponent>,
    pub slab_count: i64,
    pub shipping_total: Money,
    pub final_total: Money,
    /// Group -> label for selected groups only.
    pub selected_options: SelectedOptions,
}

impl PriceResult {
    /// The final total as shown in the price field, e.g. `"295.60"`.
    pub fn display_total(&self) -> String {
        self.final_total.display_amount()
    }

    /// Tax plus shipping on top of the subtotal.
    pub fn extras(&self) -> Money {
        Money::new(
            self.final_total.minor_units.saturating_sub(self.subtotal.minor_units),
            self.final_total.currency,
        )
    }
}

/// Compute the payable amount for the current form state.
///
/// Pure: the same input always yields the same result.
pub fn compute_price(input: &PriceInput) -> PriceResult {
    let currency = input.currency();
    let quantity = input.quantity;

    let base = input.base_unit_price.non_negative();
    let surcharges = options::total_surcharge(&input.selected_options, currency);
    let unit_price_with_options = base.try_add(&surcharges).unwrap_or(saturated(currency));

    let subtotal = unit_price_with_options
        .try_multiply(quantity.get())
        .unwrap_or(saturated(currency));

    let rates = input.tax_rates.sanitized();
    let effective_tax_rate = rates.effective_rate(input.tax_regime);
    let tax_amount = subtotal.percentage(effective_tax_rate);
    let tax_components = rates.breakdown(input.tax_regime, subtotal);

    let shipping = input
        .shipping
        .filter(|s| s.charge_per_slab.currency == currency)
        .unwrap_or_else(|| {
            if input.shipping.is_some() {
                tracing::warn!(expected = %currency, "shipping charge in foreign currency ignored");
            }
            ShippingPolicy::free(currency)
        });
    let slab_count = shipping.slab_count(quantity);
    let shipping_total = shipping.total(quantity);

    let final_total = subtotal
        .try_add(&tax_amount)
        .and_then(|m| m.try_add(&shipping_total))
        .unwrap_or(saturated(currency));

    tracing::debug!(
        quantity = quantity.get(),
        regime = %input.tax_regime,
        unit = unit_price_with_options.minor_units,
        subtotal = subtotal.minor_units,
        tax_rate = effective_tax_rate,
        tax = tax_amount.minor_units,
        shipping = shipping_total.minor_units,
        total = final_total.minor_units,
        "computed price"
    );

    PriceResult {
        unit_price_with_options,
        quantity,
        subtotal,
        effective_tax_rate,
        tax_amount,
        tax_components,
        slab_count,
        shipping_total,
        final_total,
        selected_options: options::normalize(&input.selected_options),
    }
}

fn saturated(currency: Currency) -> Money {
    Money::new(i64::MAX, currency)
}
