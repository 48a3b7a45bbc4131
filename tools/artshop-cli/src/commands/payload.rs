//! Payload command.

use anyhow::Result;
use artshop_pricing::prelude::*;

use super::{load_form, PayloadArgs, PayloadCommand};
use crate::context::Context;

/// Run the payload command. Always prints JSON.
pub fn run(args: PayloadArgs, ctx: &Context) -> Result<()> {
    match args.command {
        PayloadCommand::Cart { form } => {
            let form = load_form(&form, ctx)?;
            let request = CartRequest::new(
                &form.product.product_ref(),
                form.binding.input(),
                form.binding.result(),
            );
            ctx.output.json(&request);
        }
        PayloadCommand::BuyNow { form } => {
            let form = load_form(&form, ctx)?;
            let request = BuyNowRequest::new(
                &form.product.product_ref(),
                form.binding.input(),
                form.binding.result(),
            );
            ctx.output.json(&request);
        }
    }
    Ok(())
}
