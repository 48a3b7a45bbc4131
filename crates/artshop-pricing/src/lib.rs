//! Pricing for the art-print storefront.
//!
//! This crate turns a product form (base price, size/frame/glass options,
//! quantity, GST rates, shipping slabs) into the amount shown to the
//! shopper and the request body the backend re-verifies:
//!
//! - **Calculator**: [`compute_price`], a pure function over [`PriceInput`]
//! - **Options**: option catalogs and select-value decoding
//! - **Tax**: GST regimes (CGST/SGST, IGST, CGST/UGST) plus CESS
//! - **Shipping**: per-slab charges rounded up
//! - **Payload**: add-to-cart and buy-now bodies, server-side verification
//! - **Cart**: badge count state and the session cart
//! - **Binding**: input-change handling separated from rendering
//!
//! # Example
//!
//! ```rust
//! use artshop_pricing::prelude::*;
//!
//! let rates = TaxRates { cgst: 9.0, sgst: 9.0, cess: 1.0, ..Default::default() };
//! let input = PriceInput::new(Money::from_decimal(100.0, Currency::INR))
//!     .with_option("Frame", OptionChoice::parse("Wooden|20", Currency::INR))
//!     .with_quantity(Quantity::new(2))
//!     .with_tax(rates, TaxRegime::IntraState)
//!     .with_shipping(ShippingPolicy::new(Money::from_decimal(10.0, Currency::INR), 3));
//!
//! let result = compute_price(&input);
//! assert_eq!(result.display_total(), "295.60");
//! ```

pub mod binding;
pub mod calculator;
pub mod cart;
pub mod error;
pub mod money;
pub mod options;
pub mod payload;
pub mod quantity;
pub mod shipping;
pub mod tax;

pub use calculator::{compute_price, PriceInput, PriceResult};
pub use error::PricingError;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::PricingError;
    pub use crate::money::{Currency, Money};

    pub use crate::calculator::{compute_price, PriceInput, PriceResult};
    pub use crate::options::{
        is_unselected, ArtworkPricing, OptionCatalog, OptionChoice, OptionSelection,
        SelectedOptions, DEFAULT_SENTINEL,
    };
    pub use crate::quantity::Quantity;
    pub use crate::shipping::{ShippingPolicy, DEFAULT_SLAB_SIZE};
    pub use crate::tax::{TaxComponent, TaxKind, TaxRates, TaxRegime};

    pub use crate::payload::{verify_cart_request, BuyNowRequest, CartRequest, ProductRef};
    pub use crate::cart::{CartCounter, CartLine, SessionCart};
    pub use crate::binding::{PriceBinding, PriceView, Render};
}
