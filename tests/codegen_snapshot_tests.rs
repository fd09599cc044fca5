//! Golden snapshot tests for codegen
//!
//! These tests generate handler modules from annotated Rust sources and compare the output against stored
//! snapshots, so every change to the emitted code is reviewed.
//!
//! Run with: `cargo test --test codegen_snapshot_tests`
//! Review changes: `cargo insta review`

use std::fs;
use std::path::Path;

use apigen::{GenerateConfig, generate_source};

const DEMO_API: &str = include_str!("../crates/apigen_demo/src/api.rs");

fn generate_rust(source: &str) -> String {
    generate_source(source, &GenerateConfig::default()).unwrap_or_else(|err| panic!("generation failed: {err}"))
}

/// Load an input from the codegen_snapshots directory
fn load_test_file(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/codegen_snapshots")
        .join(format!("{name}.rs"));
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read test file: {}", path.display()))
}

#[test]
fn test_demo_api_codegen() {
    let rust_code = generate_rust(DEMO_API);
    insta::assert_snapshot!("demo_api", rust_code);
}

#[test]
fn test_get_only_codegen() {
    let source = load_test_file("get_only");
    let rust_code = generate_rust(&source);
    insta::assert_snapshot!("get_only", rust_code);
}

#[test]
fn test_duplicate_default_codegen() {
    let source = load_test_file("duplicate_default");
    let rust_code = generate_rust(&source);
    insta::assert_snapshot!("duplicate_default", rust_code);
}
