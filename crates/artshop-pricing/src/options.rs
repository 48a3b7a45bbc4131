//! Product options (size, frame, glass) and their surcharges.
//!
//! A product page offers one select per option group. Each select either
//! holds the `"default"` sentinel or a `"<label>|<surcharge>"` value.
//! [`OptionChoice`] is the decoded form of one select; [`OptionCatalog`]
//! is the server-side list of what each group offers.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Select value meaning "nothing chosen for this group".
pub const DEFAULT_SENTINEL: &str = "default";

/// Separator between label and surcharge in an encoded select value.
const VALUE_SEPARATOR: char = '|';

/// Group name -> chosen label, as submitted to the backend.
pub type SelectedOptions = BTreeMap<String, String>;

/// The state of a single option group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OptionChoice {
    /// Nothing chosen, or the sentinel.
    #[default]
    Unselected,
    /// A label with its additive surcharge.
    Chosen { label: String, surcharge: Money },
}

impl OptionChoice {
    /// A chosen label. Empty labels and the sentinel become `Unselected`.
    pub fn chosen(label: impl Into<String>, surcharge: Money) -> Self {
        let label = label.into();
        if is_unselected(&label) {
            return OptionChoice::Unselected;
        }
        OptionChoice::Chosen { label, surcharge }
    }

    /// Decode a `"<label>|<surcharge>"` select value.
    ///
    /// A missing or unparsable surcharge counts as zero; the sentinel and
    /// blank values decode to `Unselected`.
    ///
    /// ```
    /// use artshop_pricing::money::Currency;
    /// use artshop_pricing::options::OptionChoice;
    ///
    /// let choice = OptionChoice::parse("Wooden|250", Currency::INR);
    /// assert_eq!(choice.label(), Some("Wooden"));
    /// assert_eq!(choice.surcharge(Currency::INR).minor_units, 25000);
    /// ```
    pub fn parse(value: &str, currency: Currency) -> Self {
        let (label, price) = match value.split_once(VALUE_SEPARATOR) {
            Some((label, price)) => (label.trim(), price.trim()),
            None => (value.trim(), ""),
        };
        if is_unselected(label) {
            return OptionChoice::Unselected;
        }
        let surcharge = price
            .parse::<f64>()
            .map(|p| Money::from_decimal(p, currency))
            .unwrap_or_else(|_| Money::zero(currency));
        OptionChoice::chosen(label, surcharge)
    }

    /// Encode back into the select-value form.
    pub fn encode(&self) -> String {
        match self {
            OptionChoice::Unselected => DEFAULT_SENTINEL.to_string(),
            OptionChoice::Chosen { label, surcharge } => {
                format!("{}{}{}", label, VALUE_SEPARATOR, surcharge.display_amount())
            }
        }
    }

    /// The chosen label, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            OptionChoice::Unselected => None,
            OptionChoice::Chosen { label, .. } => Some(label),
        }
    }

    /// Surcharge this choice adds in `currency`.
    ///
    /// Unselected, negative, or foreign-currency surcharges contribute zero.
    pub fn surcharge(&self, currency: Currency) -> Money {
        match self {
            OptionChoice::Chosen { surcharge, .. } if surcharge.currency == currency => {
                surcharge.non_negative()
            }
            OptionChoice::Chosen { label, surcharge } => {
                tracing::warn!(
                    option = %label,
                    expected = %currency,
                    got = %surcharge.currency,
                    "option surcharge in foreign currency ignored"
                );
                Money::zero(currency)
            }
            OptionChoice::Unselected => Money::zero(currency),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, OptionChoice::Chosen { .. })
    }
}

/// Whether a select label means "no choice": blank or the sentinel, any case.
pub fn is_unselected(label: &str) -> bool {
    label.is_empty() || label.eq_ignore_ascii_case(DEFAULT_SENTINEL)
}

/// Choices for every group of one product.
pub type OptionSelection = BTreeMap<String, OptionChoice>;

/// Labels of the selected groups only, sentinel groups omitted.
pub fn normalize(selection: &OptionSelection) -> SelectedOptions {
    selection
        .iter()
        .filter_map(|(group, choice)| choice.label().map(|l| (group.clone(), l.to_string())))
        .collect()
}

/// Sum of surcharges across a selection.
pub fn total_surcharge(selection: &OptionSelection, currency: Currency) -> Money {
    let surcharges: Vec<Money> = selection.values().map(|c| c.surcharge(currency)).collect();
    Money::sum(surcharges.iter(), currency)
}

/// What a product offers: group -> label -> surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OptionCatalog {
    pub currency: Currency,
    pub groups: BTreeMap<String, BTreeMap<String, Money>>,
}

impl OptionCatalog {
    /// Create an empty catalog.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            groups: BTreeMap::new(),
        }
    }

    /// Build from decimal surcharges, as product files store them.
    pub fn from_decimal_groups(
        currency: Currency,
        groups: &BTreeMap<String, BTreeMap<String, f64>>,
    ) -> Self {
        let mut catalog = Self::new(currency);
        for (group, labels) in groups {
            for (label, price) in labels {
                catalog.insert(group, label, Money::from_decimal(*price, currency));
            }
        }
        catalog
    }

    /// Add or replace one choice.
    pub fn insert(&mut self, group: impl Into<String>, label: impl Into<String>, surcharge: Money) {
        self.groups
            .entry(group.into())
            .or_default()
            .insert(label.into(), surcharge);
    }

    /// Look up a surcharge.
    pub fn surcharge(&self, group: &str, label: &str) -> Option<Money> {
        self.groups.get(group)?.get(label).copied()
    }

    /// Resolve a label chosen in `group`.
    ///
    /// The sentinel, blank labels, and anything the catalog does not offer
    /// resolve to `Unselected`.
    pub fn choose(&self, group: &str, label: &str) -> OptionChoice {
        let label = label.trim();
        if is_unselected(label) {
            return OptionChoice::Unselected;
        }
        match self.surcharge(group, label) {
            Some(surcharge) => OptionChoice::chosen(label, surcharge),
            None => {
                tracing::warn!(group, label, "option not offered, treating as unselected");
                OptionChoice::Unselected
            }
        }
    }

    /// Resolve a normalized map, e.g. one received from a client.
    pub fn resolve(&self, selected: &SelectedOptions) -> OptionSelection {
        selected
            .iter()
            .map(|(group, label)| (group.clone(), self.choose(group, label)))
            .collect()
    }

    /// A selection with every group left on the sentinel.
    pub fn unselected(&self) -> OptionSelection {
        self.groups
            .keys()
            .map(|g| (g.clone(), OptionChoice::Unselected))
            .collect()
    }

    /// Every choice of a group encoded as select values, sentinel first.
    pub fn select_values(&self, group: &str) -> Vec<String> {
        let mut values = vec![DEFAULT_SENTINEL.to_string()];
        if let Some(labels) = self.groups.get(group) {
            values.extend(labels.iter().map(|(label, surcharge)| {
                OptionChoice::Chosen {
                    label: label.clone(),
                    surcharge: *surcharge,
                }
                .encode()
            }));
        }
        values
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Artwork record as the admin panel stores it.
///
/// A surcharge of zero means the choice is not offered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ArtworkPricing {
    #[serde(default)]
    pub original_price: f64,
    #[serde(default)]
    pub frame_wooden: f64,
    #[serde(default)]
    pub frame_metal: f64,
    #[serde(default)]
    pub frame_pvc: f64,
    #[serde(default)]
    pub glass_price: f64,
    #[serde(default)]
    pub size_a4: f64,
    #[serde(default)]
    pub size_a5: f64,
    #[serde(default)]
    pub size_letter: f64,
    #[serde(default)]
    pub size_legal: f64,
}

impl ArtworkPricing {
    /// Base price before options and tax.
    pub fn base_price(&self, currency: Currency) -> Money {
        Money::from_decimal(self.original_price, currency)
    }

    /// Build the `Size`, `Frame` and `Glass` groups.
    pub fn catalog(&self, currency: Currency) -> OptionCatalog {
        let entries = [
            ("Size", "A4", self.size_a4),
            ("Size", "A5", self.size_a5),
            ("Size", "Letter", self.size_letter),
            ("Size", "Legal", self.size_legal),
            ("Frame", "Wooden", self.frame_wooden),
            ("Frame", "Metal", self.frame_metal),
            ("Frame", "PVC", self.frame_pvc),
            ("Glass", "Glass", self.glass_price),
        ];

        let mut catalog = OptionCatalog::new(currency);
        for (group, label, price) in entries {
            let surcharge = Money::from_decimal(price, currency);
            if surcharge.minor_units > 0 {
                catalog.insert(group, label, surcharge);
            }
        }
        catalog
    }
}
