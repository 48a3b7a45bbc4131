//! Binding between form events and the price display.
//!
//! A [`PriceBinding`] owns the current [`PriceInput`]. Every input event
//! updates it, recomputes, and hands the result to a [`Render`]. The
//! renderer never computes and the calculator never renders.

use crate::calculator::{compute_price, PriceInput, PriceResult};
use crate::money::Money;
use crate::options::{OptionCatalog, OptionChoice};
use crate::quantity::Quantity;

/// Something that shows a computed price.
pub trait Render {
    fn render(&mut self, result: &PriceResult);
}

impl<F> Render for F
where
    F: FnMut(&PriceResult),
{
    fn render(&mut self, result: &PriceResult) {
        self(result)
    }
}

/// Plain text for the price widgets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PriceView {
    /// The payable total, e.g. `"295.60"`.
    pub total: String,
    /// Total with currency symbol.
    pub total_with_symbol: String,
    /// Unit price including options, before GST.
    pub unit_price: String,
    /// One `"CGST 9% = 21.60"` style line per tax component.
    pub tax_lines: Vec<String>,
    pub shipping: String,
}

impl PriceView {
    pub fn from_result(result: &PriceResult) -> Self {
        Self {
            total: result.final_total.display_amount(),
            total_with_symbol: result.final_total.display(),
            unit_price: result.unit_price_with_options.display_amount(),
            tax_lines: result
                .tax_components
                .iter()
                .filter(|c| c.rate > 0.0)
                .map(|c| format!("{} {}% = {}", c.kind.label(), c.rate, c.amount.display_amount()))
                .collect(),
            shipping: result.shipping_total.display_amount(),
        }
    }
}

impl Render for PriceView {
    fn render(&mut self, result: &PriceResult) {
        *self = PriceView::from_result(result);
    }
}

/// Form state plus the renderer it drives.
pub struct PriceBinding<R: Render> {
    input: PriceInput,
    catalog: OptionCatalog,
    renderer: R,
    last: PriceResult,
}

impl<R: Render> PriceBinding<R> {
    /// Bind a product form. Every catalog group starts on the sentinel
    /// and the initial price is rendered immediately.
    pub fn new(mut input: PriceInput, catalog: OptionCatalog, mut renderer: R) -> Self {
        for group in catalog.groups.keys() {
            input.selected_options.entry(group.clone()).or_default();
        }
        let last = compute_price(&input);
        renderer.render(&last);
        Self {
            input,
            catalog,
            renderer,
            last,
        }
    }

    /// The quantity field changed.
    pub fn on_quantity_input(&mut self, raw: &str) -> &PriceResult {
        self.input.quantity = Quantity::parse(raw);
        self.refresh()
    }

    /// An option select changed to an encoded `"<label>|<surcharge>"` value.
    pub fn on_select_change(&mut self, group: &str, value: &str) -> &PriceResult {
        let choice = OptionChoice::parse(value, self.input.currency());
        self.input.selected_options.insert(group.to_string(), choice);
        self.refresh()
    }

    /// An option was chosen by label; the surcharge comes from the catalog.
    pub fn on_option_change(&mut self, group: &str, label: &str) -> &PriceResult {
        let choice = self.catalog.choose(group, label);
        self.input.selected_options.insert(group.to_string(), choice);
        self.refresh()
    }

    /// Replace the base price, e.g. after a catalog refresh.
    pub fn set_base_price(&mut self, base: Money) -> &PriceResult {
        self.input.base_unit_price = base;
        self.refresh()
    }

    fn refresh(&mut self) -> &PriceResult {
        self.last = compute_price(&self.input);
        self.renderer.render(&self.last);
        &self.last
    }

    pub fn input(&self) -> &PriceInput {
        &self.input
    }

    pub fn result(&self) -> &PriceResult {
        &self.last
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use crate::shipping::ShippingPolicy;
    use crate::tax::{TaxRates, TaxRegime};

    fn inr(minor: i64) -> Money {
        Money::new(minor, Currency::INR)
    }

    fn setup() -> (PriceInput, OptionCatalog) {
        let mut catalog = OptionCatalog::new(Currency::INR);
        catalog.insert("Frame", "Wooden", inr(2000));
        catalog.insert("Size", "A4", inr(1000));
        let rates = TaxRates {
            cgst: 9.0,
            sgst: 9.0,
            cess: 1.0,
            ..Default::default()
        };
        let input = PriceInput::new(inr(10000))
            .with_tax(rates, TaxRegime::IntraState)
            .with_shipping(ShippingPolicy::new(inr(1000), 3));
        (input, catalog)
    }

    #[test]
    fn test_renders_on_bind_and_every_change() {
        let (input, catalog) = setup();
        let mut totals = Vec::new();
        {
            let mut binding = PriceBinding::new(input, catalog, |r: &PriceResult| {
                totals.push(r.display_total())
            });
            binding.on_option_change("Frame", "Wooden");
            binding.on_quantity_input("2");
            binding.on_quantity_input("abc");
        }
        assert_eq!(totals, vec!["129.00", "152.80", "295.60", "152.80"]);
    }

    #[test]
    fn test_price_view() {
        let (input, catalog) = setup();
        let mut binding = PriceBinding::new(input, catalog, PriceView::default());
        binding.on_select_change("Frame", "Wooden|20");
        binding.on_quantity_input("2");

        let view = binding.renderer();
        assert_eq!(view.total, "295.60");
        assert_eq!(view.total_with_symbol, "\u{20b9}295.60");
        assert_eq!(view.unit_price, "120.00");
        assert_eq!(view.tax_lines[0], "CGST 9% = 21.60");
        assert_eq!(view.tax_lines.len(), 3);
        assert_eq!(view.shipping, "10.00");
    }

    #[test]
    fn test_groups_start_unselected() {
        let (input, catalog) = setup();
        let binding = PriceBinding::new(input, catalog, PriceView::default());

        assert_eq!(binding.input().selected_options.len(), 2);
        assert!(binding.result().selected_options.is_empty());
        assert_eq!(binding.result().unit_price_with_options, inr(10000));
    }

    #[test]
    fn test_deselect_returns_to_base() {
        let (input, catalog) = setup();
        let mut binding = PriceBinding::new(input, catalog, PriceView::default());
        binding.on_option_change("Size", "A4");
        assert_eq!(binding.result().unit_price_with_options, inr(11000));

        binding.on_select_change("Size", "default");
        assert_eq!(binding.result().unit_price_with_options, inr(10000));
    }

    #[test]
    fn test_base_price_change_rerenders() {
        let (input, catalog) = setup();
        let mut binding = PriceBinding::new(input, catalog, PriceView::default());
        binding.on_option_change("Frame", "Wooden");

        let result = binding.set_base_price(inr(20000));
        assert_eq!(result.unit_price_with_options, inr(22000));

        let view = binding.into_renderer();
        assert_eq!(view.total, "271.80");
    }
}
