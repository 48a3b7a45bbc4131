//! End-to-end checks across the public API.

use artshop_pricing::prelude::*;

fn inr(amount: f64) -> Money {
    Money::from_decimal(amount, Currency::INR)
}

fn gst() -> TaxRates {
    TaxRates {
        cgst: 9.0,
        sgst: 9.0,
        igst: 18.0,
        ugst: 9.0,
        cess: 1.0,
    }
}

fn artwork() -> ArtworkPricing {
    ArtworkPricing {
        original_price: 1200.0,
        frame_wooden: 350.0,
        frame_metal: 500.0,
        glass_price: 150.0,
        size_a4: 0.0,
        size_a5: 80.0,
        ..Default::default()
    }
}

#[test]
fn worked_example_from_storefront() {
    let input = PriceInput::new(inr(100.0))
        .with_option("Frame", OptionChoice::chosen("Wooden", inr(20.0)))
        .with_quantity(Quantity::new(2))
        .with_tax(gst(), TaxRegime::IntraState)
        .with_shipping(ShippingPolicy::new(inr(10.0), 3));

    let result = compute_price(&input);
    assert_eq!(result.unit_price_with_options, inr(120.0));
    assert_eq!(result.subtotal, inr(240.0));
    assert_eq!(result.effective_tax_rate, 19.0);
    assert_eq!(result.tax_amount, inr(45.60));
    assert_eq!(result.shipping_total, inr(10.0));
    assert_eq!(result.display_total(), "295.60");
}

#[test]
fn final_total_never_below_subtotal() {
    let catalog = artwork().catalog(Currency::INR);
    let regimes = [
        TaxRegime::IntraState,
        TaxRegime::InterState,
        TaxRegime::UnionTerritory,
        TaxRegime::Unknown,
    ];

    for regime in regimes {
        for quantity in [0, 1, 2, 3, 7, 50] {
            for frame in ["default", "Wooden", "Metal", "Gold"] {
                let input = PriceInput::new(artwork().base_price(Currency::INR))
                    .with_option("Frame", catalog.choose("Frame", frame))
                    .with_quantity(Quantity::new(quantity))
                    .with_tax(gst(), regime)
                    .with_shipping(ShippingPolicy::new(inr(60.0), 3));
                let result = compute_price(&input);

                assert!(result.final_total.minor_units >= result.subtotal.minor_units);
                assert!(result.quantity.get() >= 1);
                assert_eq!(result, compute_price(&input));
            }
        }
    }
}

#[test]
fn all_sentinels_keep_base_price() {
    let catalog = artwork().catalog(Currency::INR);
    let mut input = PriceInput::new(artwork().base_price(Currency::INR));
    input.selected_options = catalog.unselected();

    let result = compute_price(&input);
    assert_eq!(result.unit_price_with_options, inr(1200.0));
    assert!(result.selected_options.is_empty());
}

#[test]
fn quantity_text_is_coerced() {
    for raw in ["0", "abc", "", "-5"] {
        let input = PriceInput::new(inr(10.0)).with_quantity(Quantity::parse(raw));
        assert_eq!(compute_price(&input).quantity.get(), 1, "raw = {:?}", raw);
    }
}

#[test]
fn seven_units_ship_in_three_slabs() {
    let input = PriceInput::new(inr(10.0))
        .with_quantity(Quantity::new(7))
        .with_shipping(ShippingPolicy::new(inr(40.0), 3));
    let result = compute_price(&input);
    assert_eq!(result.slab_count, 3);
    assert_eq!(result.shipping_total, inr(120.0));
}

#[test]
fn inter_state_charges_igst_only() {
    let rates = TaxRates {
        cgst: 30.0,
        sgst: 30.0,
        ugst: 30.0,
        igst: 12.0,
        cess: 0.0,
    };
    let input = PriceInput::new(inr(1000.0)).with_tax(rates, TaxRegime::InterState);
    let result = compute_price(&input);
    assert_eq!(result.tax_amount, inr(120.0));
    assert_eq!(result.tax_components.len(), 2);
    assert_eq!(result.tax_components[0].kind, TaxKind::Igst);
}

#[test]
fn client_payload_survives_server_verification() {
    let pricing = artwork();
    let catalog = pricing.catalog(Currency::INR);
    let product = ProductRef {
        sku: "ART-7".to_string(),
        name: "Backwaters at Dusk".to_string(),
        image_url: None,
    };

    let mut binding = PriceBinding::new(
        PriceInput::new(pricing.base_price(Currency::INR)).with_tax(gst(), TaxRegime::IntraState),
        catalog.clone(),
        PriceView::default(),
    );
    binding.on_option_change("Frame", "Metal");
    binding.on_option_change("Glass", "Glass");
    binding.on_quantity_input("3");

    let request = CartRequest::new(&product, binding.input(), binding.result());
    let wire = serde_json::to_string(&request).unwrap();
    let received: CartRequest = serde_json::from_str(&wire).unwrap();

    let verified = verify_cart_request(
        &received,
        pricing.base_price(Currency::INR),
        &catalog,
        TaxRegime::IntraState,
    )
    .unwrap();
    assert_eq!(verified.final_total, binding.result().final_total);
    assert_eq!(binding.renderer().total, verified.display_total());
}

#[test]
fn session_cart_feeds_badge() {
    let pricing = artwork();
    let catalog = pricing.catalog(Currency::INR);
    let product = ProductRef {
        sku: "ART-8".to_string(),
        name: "Nilgiri Mist".to_string(),
        image_url: None,
    };

    let mut cart = SessionCart::new(Currency::INR);
    let mut counter = CartCounter::new();

    let framed = PriceInput::new(pricing.base_price(Currency::INR))
        .with_option("Frame", catalog.choose("Frame", "Wooden"))
        .with_quantity(Quantity::new(2));
    cart.add(&product, &compute_price(&framed));
    counter.apply(cart.item_count());
    assert_eq!(counter.count(), 2);

    let plain = PriceInput::new(pricing.base_price(Currency::INR));
    cart.add(&product, &compute_price(&plain));
    counter.apply(cart.item_count());

    assert_eq!(counter.count(), 3);
    assert!(counter.badge_visible());
    assert_eq!(cart.total(), inr(2.0 * 1550.0 + 1200.0));
}
