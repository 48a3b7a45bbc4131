//! Quote command.

use anyhow::Result;
use artshop_pricing::prelude::*;
use serde::Serialize;

use super::{load_form, QuoteArgs};
use crate::context::Context;

#[derive(Serialize)]
struct QuoteOutput<'a> {
    sku: &'a str,
    name: &'a str,
    regime: TaxRegime,
    #[serde(flatten)]
    price: &'a PriceResult,
}

/// Run the quote command.
pub fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let form = load_form(&args.form, ctx)?;
    let result = form.binding.result();
    let regime = form.binding.input().tax_regime;

    if ctx.output.is_json() {
        ctx.output.json(&QuoteOutput {
            sku: &form.product.sku,
            name: &form.product.name,
            regime,
            price: result,
        });
        return Ok(());
    }

    ctx.output.header(&format!("{} ({})", form.product.name, form.product.sku));

    if result.selected_options.is_empty() {
        ctx.output.kv("options", "none");
    }
    for (group, label) in &result.selected_options {
        ctx.output.kv(group, label);
    }
    ctx.output.kv("quantity", &result.quantity.to_string());
    ctx.output.kv("regime", regime.as_str());
    println!();

    ctx.output.amount("Unit price (before GST)", &result.unit_price_with_options.display());
    ctx.output.amount("Subtotal", &result.subtotal.display());

    if ctx.config.output.show_breakdown {
        for line in &form.binding.renderer().tax_lines {
            ctx.output.list_item(line);
        }
    }
    ctx.output.amount(
        &format!("Tax ({}%)", result.effective_tax_rate),
        &result.tax_amount.display(),
    );
    ctx.output.amount(
        &format!("Shipping ({} slab(s))", result.slab_count),
        &result.shipping_total.display(),
    );
    ctx.output.total("Total", &form.binding.renderer().total_with_symbol);

    Ok(())
}
