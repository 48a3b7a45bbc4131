//! Slab-based shipping.

use crate::money::{Currency, Money};
use crate::quantity::Quantity;
use serde::{Deserialize, Serialize};

/// Units per shipping slab when a product does not say otherwise.
pub const DEFAULT_SLAB_SIZE: i64 = 3;

/// A per-product shipping policy: one flat charge for every started
/// batch of `slab_size` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    /// Charge for each slab.
    pub charge_per_slab: Money,
    /// Units per slab.
    #[serde(default = "default_slab_size")]
    pub slab_size: i64,
}

fn default_slab_size() -> i64 {
    DEFAULT_SLAB_SIZE
}

impl ShippingPolicy {
    /// Create a new shipping policy.
    pub fn new(charge_per_slab: Money, slab_size: i64) -> Self {
        Self {
            charge_per_slab,
            slab_size,
        }
    }

    /// Free shipping with the default slab size.
    pub fn free(currency: Currency) -> Self {
        Self::new(Money::zero(currency), DEFAULT_SLAB_SIZE)
    }

    /// Slab size actually used; non-positive sizes fall back to the default.
    pub fn effective_slab_size(&self) -> i64 {
        if self.slab_size >= 1 {
            self.slab_size
        } else {
            DEFAULT_SLAB_SIZE
        }
    }

    /// Number of slabs needed for `quantity` units, rounded up.
    pub fn slab_count(&self, quantity: Quantity) -> i64 {
        let size = self.effective_slab_size();
        let q = quantity.get();
        q / size + i64::from(q % size != 0)
    }

    /// Total shipping for `quantity` units.
    pub fn total(&self, quantity: Quantity) -> Money {
        let charge = self.charge_per_slab.non_negative();
        charge
            .try_multiply(self.slab_count(quantity))
            .unwrap_or(Money::new(i64::MAX, charge.currency))
    }

    /// Check if this is free shipping.
    pub fn is_free(&self) -> bool {
        self.charge_per_slab.minor_units <= 0
    }
}
