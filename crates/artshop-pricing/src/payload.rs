//! Request bodies for the storefront backend.
//!
//! The backend does not trust a client total. It wants the inputs that
//! produced it (unit price before GST, options, quantity, every rate) so
//! it can recompute. [`verify_cart_request`] is that recomputation for
//! servers that link this crate.

use crate::calculator::{compute_price, PriceInput, PriceResult};
use crate::error::PricingError;
use crate::money::Money;
use crate::options::{OptionCatalog, SelectedOptions};
use crate::tax::{TaxRates, TaxRegime};
use serde::{Deserialize, Serialize};

/// Body of `POST /add-to-cart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartRequest {
    pub sku: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub selected_options: SelectedOptions,
    /// Unit price including option surcharges, before GST, in major units.
    pub unit_price_before_gst: f64,
    pub cgst_percentage: f64,
    pub sgst_percentage: f64,
    pub igst_percentage: f64,
    pub ugst_percentage: f64,
    pub cess_percentage: f64,
}

/// Body of `POST /buy-now`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyNowRequest {
    #[serde(flatten)]
    pub item: CartRequest,
    /// Per-slab shipping charge in major units.
    pub shipping_charge: f64,
}

/// Product identity carried alongside a price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProductRef {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CartRequest {
    /// Build from the form input and its computed result.
    pub fn new(product: &ProductRef, input: &PriceInput, result: &PriceResult) -> Self {
        let rates = input.tax_rates.sanitized();
        Self {
            sku: product.sku.clone(),
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            quantity: result.quantity.get(),
            selected_options: result.selected_options.clone(),
            unit_price_before_gst: result.unit_price_with_options.to_decimal(),
            cgst_percentage: rates.cgst,
            sgst_percentage: rates.sgst,
            igst_percentage: rates.igst,
            ugst_percentage: rates.ugst,
            cess_percentage: rates.cess,
        }
    }

    /// Decode a request body as received by the backend.
    pub fn from_json(body: &str) -> Result<Self, PricingError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Rates as sent.
    pub fn tax_rates(&self) -> TaxRates {
        TaxRates {
            cgst: self.cgst_percentage,
            sgst: self.sgst_percentage,
            igst: self.igst_percentage,
            ugst: self.ugst_percentage,
            cess: self.cess_percentage,
        }
    }
}

impl BuyNowRequest {
    pub fn new(product: &ProductRef, input: &PriceInput, result: &PriceResult) -> Self {
        let shipping_charge = input
            .shipping
            .map(|s| s.charge_per_slab.non_negative().to_decimal())
            .unwrap_or(0.0);
        Self {
            item: CartRequest::new(product, input, result),
            shipping_charge,
        }
    }
}

/// Recompute a cart request against the server's own catalog.
///
/// Rejects options the catalog does not offer, rates outside 0-100, a
/// non-positive quantity, and a unit price that differs from
/// `base + surcharges` by more than half a minor unit. On success returns
/// the server-side price for `regime`.
pub fn verify_cart_request(
    request: &CartRequest,
    base_unit_price: Money,
    catalog: &OptionCatalog,
    regime: TaxRegime,
) -> Result<PriceResult, PricingError> {
    if request.quantity < 1 {
        return Err(PricingError::InvalidQuantity(request.quantity));
    }

    let rates = request.tax_rates();
    for (field, value) in [
        ("cgst", rates.cgst),
        ("sgst", rates.sgst),
        ("igst", rates.igst),
        ("ugst", rates.ugst),
        ("cess", rates.cess),
    ] {
        if !(0.0..=100.0).contains(&value) {
            return Err(PricingError::InvalidRate { field, value });
        }
    }

    for (group, label) in &request.selected_options {
        if catalog.surcharge(group, label).is_none() {
            return Err(PricingError::UnknownOption {
                group: group.clone(),
                label: label.clone(),
            });
        }
    }

    let mut input = PriceInput::new(base_unit_price)
        .with_quantity(request.quantity.into())
        .with_tax(rates, regime);
    input.selected_options = catalog.resolve(&request.selected_options);
    let result = compute_price(&input);

    let claimed = Money::from_decimal(request.unit_price_before_gst, base_unit_price.currency);
    if claimed != result.unit_price_with_options {
        tracing::warn!(
            sku = %request.sku,
            claimed = claimed.minor_units,
            expected = result.unit_price_with_options.minor_units,
            "client unit price rejected"
        );
        return Err(PricingError::UnitPriceMismatch {
            sku: request.sku.clone(),
            claimed: claimed.display(),
            expected: result.unit_price_with_options.display(),
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use crate::options::OptionChoice;
    use crate::quantity::Quantity;
    use crate::shipping::ShippingPolicy;

    fn inr(minor: i64) -> Money {
        Money::new(minor, Currency::INR)
    }

    fn catalog() -> OptionCatalog {
        let mut c = OptionCatalog::new(Currency::INR);
        c.insert("Frame", "Wooden", inr(2000));
        c.insert("Size", "A4", inr(500));
        c
    }

    fn product() -> ProductRef {
        ProductRef {
            sku: "ART-042".to_string(),
            name: "Monsoon Ghats".to_string(),
            image_url: Some("uploads/ghats.jpg".to_string()),
        }
    }

    fn input() -> PriceInput {
        let rates = TaxRates {
            cgst: 9.0,
            sgst: 9.0,
            igst: 18.0,
            ugst: 9.0,
            cess: 1.0,
        };
        PriceInput::new(inr(10000))
            .with_option("Frame", catalog().choose("Frame", "Wooden"))
            .with_option("Size", OptionChoice::Unselected)
            .with_quantity(Quantity::new(2))
            .with_tax(rates, TaxRegime::IntraState)
            .with_shipping(ShippingPolicy::new(inr(1000), 3))
    }

    #[test]
    fn test_cart_request_fields() {
        let input = input();
        let request = CartRequest::new(&product(), &input, &compute_price(&input));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["unit_price_before_gst"], 120.0);
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["cgst_percentage"], 9.0);
        assert_eq!(json["cess_percentage"], 1.0);
        assert_eq!(json["selected_options"]["Frame"], "Wooden");
        assert!(json["selected_options"].get("Size").is_none());
    }

    #[test]
    fn test_buy_now_flattens_item() {
        let input = input();
        let request = BuyNowRequest::new(&product(), &input, &compute_price(&input));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["shipping_charge"], 10.0);
        assert_eq!(json["sku"], "ART-042");
        assert_eq!(json["image_url"], "uploads/ghats.jpg");
    }

    #[test]
    fn test_verify_accepts_honest_request() {
        let input = input();
        let request = CartRequest::new(&product(), &input, &compute_price(&input));
        let result =
            verify_cart_request(&request, inr(10000), &catalog(), TaxRegime::IntraState).unwrap();

        assert_eq!(result.unit_price_with_options, inr(12000));
        assert_eq!(result.tax_amount, inr(4560));
    }

    #[test]
    fn test_from_json_reports_malformed_body() {
        let err = CartRequest::from_json(r#"{"sku": "ART-042"}"#).unwrap_err();
        assert!(matches!(err, PricingError::SerializationError(_)));

        let input = input();
        let request = CartRequest::new(&product(), &input, &compute_price(&input));
        let body = serde_json::to_string(&request).unwrap();
        assert_eq!(CartRequest::from_json(&body).unwrap().quantity, 2);
    }

    #[test]
    fn test_verify_rejects_tampered_price() {
        let input = input();
        let mut request = CartRequest::new(&product(), &input, &compute_price(&input));
        request.unit_price_before_gst = 1.0;

        let err = verify_cart_request(&request, inr(10000), &catalog(), TaxRegime::IntraState)
            .unwrap_err();
        assert!(matches!(err, PricingError::UnitPriceMismatch { .. }));
    }

    #[test]
    fn test_verify_rejects_unknown_option() {
        let input = input();
        let mut request = CartRequest::new(&product(), &input, &compute_price(&input));
        request
            .selected_options
            .insert("Frame".to_string(), "Gold".to_string());

        let err = verify_cart_request(&request, inr(10000), &catalog(), TaxRegime::IntraState)
            .unwrap_err();
        assert!(matches!(err, PricingError::UnknownOption { .. }));
    }

    #[test]
    fn test_verify_rejects_bad_rate_and_quantity() {
        let input = input();
        let mut request = CartRequest::new(&product(), &input, &compute_price(&input));
        request.cess_percentage = 140.0;
        assert!(matches!(
            verify_cart_request(&request, inr(10000), &catalog(), TaxRegime::IntraState),
            Err(PricingError::InvalidRate { field: "cess", .. })
        ));

        request.cess_percentage = 1.0;
        request.quantity = 0;
        assert!(matches!(
            verify_cart_request(&request, inr(10000), &catalog(), TaxRegime::IntraState),
            Err(PricingError::InvalidQuantity(0))
        ));
    }
}
