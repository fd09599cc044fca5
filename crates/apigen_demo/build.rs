//! Generate handlers for `src/api.rs` into `$OUT_DIR/api_handlers.rs`.

use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = PathBuf::from("src/api.rs");
    let output = PathBuf::from(env::var("OUT_DIR")?).join("api_handlers.rs");

    println!("cargo:rerun-if-changed={}", input.display());
    apigen::generate_file(&input, &output, &apigen::GenerateConfig::default())?;
    Ok(())
}
