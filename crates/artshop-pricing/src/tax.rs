//! GST regimes and rates.

use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which GST components apply to a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum TaxRegime {
    /// Seller and buyer in the same state: CGST + SGST.
    IntraState,
    /// Across states: IGST.
    InterState,
    /// Supply into a union territory: CGST + UGST.
    UnionTerritory,
    /// Anything else. No GST component applies, only CESS.
    #[default]
    Unknown,
}

impl TaxRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRegime::IntraState => "intra_state",
            TaxRegime::InterState => "inter_state",
            TaxRegime::UnionTerritory => "union_territory",
            TaxRegime::Unknown => "unknown",
        }
    }

    /// Parse the storefront's regime string. Unrecognised values map to
    /// [`TaxRegime::Unknown`] rather than failing.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "intra_state" => TaxRegime::IntraState,
            "inter_state" => TaxRegime::InterState,
            "union_territory" => TaxRegime::UnionTerritory,
            _ => TaxRegime::Unknown,
        }
    }
}

impl From<String> for TaxRegime {
    fn from(s: String) -> Self {
        TaxRegime::parse(&s)
    }
}

impl From<TaxRegime> for String {
    fn from(regime: TaxRegime) -> Self {
        regime.as_str().to_string()
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-product tax percentages (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TaxRates {
    #[serde(default)]
    pub cgst: f64,
    #[serde(default)]
    pub sgst: f64,
    #[serde(default)]
    pub igst: f64,
    #[serde(default)]
    pub ugst: f64,
    #[serde(default)]
    pub cess: f64,
}

/// Kind of a tax component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxKind {
    Cgst,
    Sgst,
    Igst,
    Ugst,
    Cess,
}

impl TaxKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaxKind::Cgst => "CGST",
            TaxKind::Sgst => "SGST",
            TaxKind::Igst => "IGST",
            TaxKind::Ugst => "UGST",
            TaxKind::Cess => "CESS",
        }
    }
}

/// One line of a tax breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxComponent {
    pub kind: TaxKind,
    /// Rate in percent.
    pub rate: f64,
    /// Tax due for this component alone.
    pub amount: Money,
}

impl TaxRates {
    /// Copy with every rate made finite and clamped into 0..=100.
    pub fn sanitized(&self) -> Self {
        Self {
            cgst: clamp_rate(self.cgst),
            sgst: clamp_rate(self.sgst),
            igst: clamp_rate(self.igst),
            ugst: clamp_rate(self.ugst),
            cess: clamp_rate(self.cess),
        }
    }

    /// The components charged under `regime`, CESS always last.
    pub fn applicable(&self, regime: TaxRegime) -> Vec<(TaxKind, f64)> {
        let mut parts = match regime {
            TaxRegime::IntraState => vec![(TaxKind::Cgst, self.cgst), (TaxKind::Sgst, self.sgst)],
            TaxRegime::InterState => vec![(TaxKind::Igst, self.igst)],
            TaxRegime::UnionTerritory => {
                vec![(TaxKind::Cgst, self.cgst), (TaxKind::Ugst, self.ugst)]
            }
            TaxRegime::Unknown => Vec::new(),
        };
        parts.push((TaxKind::Cess, self.cess));
        parts
    }

    /// GST rate for the regime, excluding CESS.
    pub fn regime_rate(&self, regime: TaxRegime) -> f64 {
        match regime {
            TaxRegime::IntraState => self.cgst + self.sgst,
            TaxRegime::InterState => self.igst,
            TaxRegime::UnionTerritory => self.cgst + self.ugst,
            TaxRegime::Unknown => 0.0,
        }
    }

    /// Regime rate plus CESS.
    pub fn effective_rate(&self, regime: TaxRegime) -> f64 {
        self.regime_rate(regime) + self.cess
    }

    /// Per-component amounts on `taxable`, for invoice-style display.
    ///
    /// Each component is rounded on its own, so the sum may differ from the
    /// single-rate tax by a paisa.
    pub fn breakdown(&self, regime: TaxRegime, taxable: Money) -> Vec<TaxComponent> {
        self.applicable(regime)
            .into_iter()
            .map(|(kind, rate)| TaxComponent {
                kind,
                rate,
                amount: taxable.percentage(rate),
            })
            .collect()
    }
}

fn clamp_rate(rate: f64) -> f64 {
    if rate.is_finite() {
        rate.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
