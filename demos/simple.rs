//! Parse a DCF document, read typed values, and write it back.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_dcf::{from_str, parse, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Server {
    host: String,
    port: u16,
    workers: Vec<String>,
}

const DOCUMENT: &str = r#"
{
    host: "127.0.0.1",
    port: 0x1F90,
    workers: ["alpha", "beta"]
}
"#;

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::init_with_level(log::Level::Debug)?;

    // Untyped access
    let section = parse(DOCUMENT)?;
    println!("port = {}", section.get("port")?.as_int()?);
    println!("keys = {:?}\n", section.keys());

    // Typed access through serde
    let server: Server = from_str(DOCUMENT)?;
    println!("{:?}\n", server);

    let text = to_string(&server)?;
    println!("DCF output:\n{}\n", text);

    let server_back: Server = from_str(&text)?;
    assert_eq!(server, server_back);
    println!("✓ Round-trip successful");

    Ok(())
}
