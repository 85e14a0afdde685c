//! Prints the JSON schema of `config.toml` for editors and validators.

use anyhow::Result;

fn main() -> Result<()> {
    let schema = snapink::Config::json_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
