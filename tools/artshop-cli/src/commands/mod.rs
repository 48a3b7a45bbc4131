//! CLI command implementations.

pub mod config;
pub mod payload;
pub mod quote;

use anyhow::{bail, Result};
use artshop_pricing::prelude::*;
use clap::{Args, Subcommand};
use dialoguer::{Input, Select};

use crate::context::Context;
use crate::product::ProductFile;

/// Product form inputs shared by `quote` and `payload`.
#[derive(Args)]
pub struct FormArgs {
    /// Product file (TOML).
    #[arg(short, long)]
    pub product: String,

    /// Option choice as Group=Label (repeatable).
    #[arg(short, long = "option", value_name = "GROUP=LABEL")]
    pub options: Vec<String>,

    /// Quantity as typed into the form.
    #[arg(short, long, default_value = "1")]
    pub quantity: String,

    /// Tax regime: intra_state, inter_state or union_territory.
    #[arg(short, long)]
    pub regime: Option<String>,

    /// Pick options and quantity interactively.
    #[arg(short, long)]
    pub interactive: bool,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub form: FormArgs,
}

/// Arguments for the payload command.
#[derive(Args)]
pub struct PayloadArgs {
    #[command(subcommand)]
    pub command: PayloadCommand,
}

#[derive(Subcommand)]
pub enum PayloadCommand {
    /// Body for the add-to-cart endpoint.
    Cart {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Body for the buy-now endpoint.
    BuyNow {
        #[command(flatten)]
        form: FormArgs,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// A loaded product with its form bound to a price view.
pub struct Form {
    pub product: ProductFile,
    pub binding: PriceBinding<PriceView>,
}

/// Load the product and replay the requested inputs through the binding,
/// the same way the storefront form would see them.
pub fn load_form(args: &FormArgs, ctx: &Context) -> Result<Form> {
    let path = ctx.resolve_path(&args.product);
    let product = ProductFile::load(&path)?;
    ctx.output.debug(&format!("Loaded {} from {}", product.sku, path.display()));

    let currency = ctx.config.currency();
    let regime = product.regime(args.regime.as_deref(), &ctx.config);
    if regime == TaxRegime::Unknown {
        ctx.output.warn("Unknown tax regime: only CESS will be charged");
    }

    let catalog = product.catalog(currency);
    let input = product.price_input(regime, &ctx.config);
    let mut binding = PriceBinding::new(input, catalog.clone(), PriceView::default());

    for raw in &args.options {
        let Some((group, label)) = raw.split_once('=') else {
            bail!("Invalid option '{}': expected GROUP=LABEL", raw);
        };
        let (group, label) = (group.trim(), label.trim());
        if !is_offered(&catalog, group, label) {
            ctx.output.warn(&format!("{} does not offer {} = {}", product.sku, group, label));
        }
        binding.on_option_change(group, label);
    }

    if args.interactive {
        prompt_options(&catalog, &mut binding)?;
        let raw: String = Input::new()
            .with_prompt("Quantity")
            .default(args.quantity.clone())
            .interact_text()?;
        binding.on_quantity_input(&raw);
    } else {
        binding.on_quantity_input(&args.quantity);
    }

    Ok(Form { product, binding })
}

/// Whether `label` is the sentinel or a choice the catalog has for `group`.
fn is_offered(catalog: &OptionCatalog, group: &str, label: &str) -> bool {
    is_unselected(label) || catalog.surcharge(group, label).is_some()
}

fn prompt_options(catalog: &OptionCatalog, binding: &mut PriceBinding<PriceView>) -> Result<()> {
    for group in catalog.groups.keys() {
        let values = catalog.select_values(group);
        let selection = Select::new()
            .with_prompt(group.as_str())
            .items(&values)
            .default(0)
            .interact()?;
        let total = binding.on_select_change(group, &values[selection]).display_total();
        println!("  = {}", total);
    }
    Ok(())
}
