//! Print the OpenAPI document of the rotation server to stdout.

use anyhow::Context;
use player_rotation::services::documentation::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let doc = ApiDoc::openapi()
        .to_pretty_json()
        .context("serializing OpenAPI document")?;
    println!("{doc}");
    Ok(())
}
