//! Cart state: the header badge count and the session cart.

use crate::calculator::PriceResult;
use crate::money::{Currency, Money};
use crate::options::SelectedOptions;
use crate::payload::{CartRequest, ProductRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum quantity allowed per line.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// Number shown on the cart badge.
///
/// The backend is the source of truth; it returns a fresh count after
/// every cart mutation and the counter only mirrors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CartCounter {
    count: u32,
}

impl CartCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from a stored value. Anything unparsable is zero.
    pub fn parse_stored(stored: Option<&str>) -> Self {
        let count = stored
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map(|n| n.clamp(0, u32::MAX as i64) as u32)
            .unwrap_or(0);
        Self { count }
    }

    /// Adopt the count the server reported and return it.
    pub fn apply(&mut self, server_count: i64) -> u32 {
        self.count = server_count.clamp(0, u32::MAX as i64) as u32;
        self.count
    }

    /// Reset on logout.
    pub fn clear(&mut self) -> u32 {
        self.count = 0;
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// The badge is hidden for an empty cart.
    pub fn badge_visible(&self) -> bool {
        self.count > 0
    }
}

/// One priced line in the session cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// `sku` plus the normalized options, so the same print with a
    /// different frame is a separate line.
    pub id: String,
    pub product: ProductRef,
    pub selected_options: SelectedOptions,
    pub quantity: i64,
    /// Unit price with options, before GST.
    pub unit_price: Money,
}

impl CartLine {
    /// Line total (unit price x quantity), saturating on overflow.
    pub fn total(&self) -> Money {
        self.unit_price
            .try_multiply(self.quantity)
            .unwrap_or(Money::new(i64::MAX, self.unit_price.currency))
    }
}

/// Derive the line id for a product and option set.
pub fn line_id(sku: &str, options: &SelectedOptions) -> String {
    let mut id = sku.to_string();
    for (group, label) in options {
        id.push('|');
        id.push_str(group);
        id.push('=');
        id.push_str(label);
    }
    id
}

/// Cart kept in the session until checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCart {
    pub currency: Currency,
    pub lines: BTreeMap<String, CartLine>,
    pub updated_at: DateTime<Utc>,
}

impl SessionCart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            lines: BTreeMap::new(),
            updated_at: Utc::now(),
        }
    }

    /// Add a computed price to the cart, merging with an identical line.
    ///
    /// Quantities are capped at [`MAX_QUANTITY_PER_LINE`]. Returns the id
    /// of the line that changed.
    pub fn add(&mut self, product: &ProductRef, result: &PriceResult) -> String {
        let id = line_id(&product.sku, &result.selected_options);
        let quantity = result.quantity.get();

        match self.lines.get_mut(&id) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .saturating_add(quantity)
                    .min(MAX_QUANTITY_PER_LINE);
                line.unit_price = result.unit_price_with_options;
            }
            None => {
                self.lines.insert(
                    id.clone(),
                    CartLine {
                        id: id.clone(),
                        product: product.clone(),
                        selected_options: result.selected_options.clone(),
                        quantity: quantity.min(MAX_QUANTITY_PER_LINE),
                        unit_price: result.unit_price_with_options,
                    },
                );
            }
        }

        self.touch();
        id
    }

    /// Add a line from an add-to-cart request body.
    pub fn add_request(&mut self, request: &CartRequest) -> String {
        let id = line_id(&request.sku, &request.selected_options);
        let unit_price = Money::from_decimal(request.unit_price_before_gst, self.currency);
        let quantity = request.quantity.clamp(1, MAX_QUANTITY_PER_LINE);

        let line = self.lines.entry(id.clone()).or_insert_with(|| CartLine {
            id: id.clone(),
            product: ProductRef {
                sku: request.sku.clone(),
                name: request.name.clone(),
                image_url: request.image_url.clone(),
            },
            selected_options: request.selected_options.clone(),
            quantity: 0,
            unit_price,
        });
        line.quantity = line
            .quantity
            .saturating_add(quantity)
            .min(MAX_QUANTITY_PER_LINE);
        line.unit_price = unit_price;

        self.touch();
        id
    }

    /// Set a line's quantity. Zero or less removes the line.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(id);
        }
        match self.lines.get_mut(id) {
            Some(line) => {
                line.quantity = quantity.min(MAX_QUANTITY_PER_LINE);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Remove a line.
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.lines.remove(id).is_some();
        if removed {
            self.touch();
        }
        removed
    }

    /// Clear all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.touch();
    }

    /// Total item count (sum of quantities), as shown on the badge.
    pub fn item_count(&self) -> i64 {
        self.lines.values().map(|l| l.quantity).sum()
    }

    /// Sum of line totals, before GST and shipping.
    pub fn total(&self) -> Money {
        let totals: Vec<Money> = self.lines.values().map(CartLine::total).collect();
        Money::sum(totals.iter(), self.currency)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
