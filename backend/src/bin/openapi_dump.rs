//! Print the OpenAPI document as JSON.

use color_eyre::eyre::{Result, WrapErr};
use utoipa::OpenApi;
use vote_backend::doc::ApiDoc;

fn main() -> Result<()> {
    color_eyre::install()?;
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("serialise OpenAPI document")?;
    println!("{document}");
    Ok(())
}
