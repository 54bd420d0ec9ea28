use clap::Subcommand;
use serde_json::{json, Value};

use loan_calc_core::catalog::{Catalog, LoanConfig};

use super::Context;
use crate::input;

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List every loan product
    List,
    /// Show one loan product
    Get {
        /// Product key, e.g. mortgage
        loan_type: String,
    },
    /// Add or replace a product from a JSON document
    Upsert {
        /// JSON file holding one product (falls back to stdin)
        #[arg(long)]
        input: Option<String>,
    },
    /// Delete a product
    Remove {
        loan_type: String,
    },
    /// Overwrite the stored catalog with the built-in products
    Reset,
}

pub fn run_catalog(ctx: &Context, action: CatalogCommand) -> Result<Value, Box<dyn std::error::Error>> {
    match action {
        CatalogCommand::List => Ok(serde_json::to_value(ctx.load_catalog().as_slice())?),
        CatalogCommand::Get { loan_type } => {
            let catalog = ctx.load_catalog();
            Ok(serde_json::to_value(catalog.require(&loan_type)?)?)
        }
        CatalogCommand::Upsert { input: path } => {
            let config: LoanConfig = input::resolve(path.as_deref())?
                .ok_or("--input <file.json> or stdin required for catalog upsert")?;
            let updated = ctx.stored_catalog()?.upsert(config.clone())?;
            updated.save(&mut ctx.catalog_store())?;
            tracing::info!(loan_type = %config.loan_type, "catalog entry saved");
            Ok(serde_json::to_value(config)?)
        }
        CatalogCommand::Remove { loan_type } => {
            let catalog = ctx.stored_catalog()?;
            let existed = catalog.get(&loan_type).is_some();
            let updated = catalog.remove(&loan_type);
            updated.save(&mut ctx.catalog_store())?;
            Ok(json!({
                "removed": existed,
                "loanType": loan_type,
                "remaining": updated.loan_types(),
            }))
        }
        CatalogCommand::Reset => {
            let defaults = Catalog::defaults();
            defaults.save(&mut ctx.catalog_store())?;
            Ok(serde_json::to_value(defaults.as_slice())?)
        }
    }
}
