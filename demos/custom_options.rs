//! Customizing DCF output with DcfOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use serde_dcf::{to_string, to_string_with_options, DcfOptions};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    name: String,
    version: String,
    debug: bool,
    paths: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::init_with_level(log::Level::Info)?;

    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        debug: true,
        paths: vec!["/etc/myapp".to_string(), "/var/lib/myapp".to_string()],
    };

    // Default format (4 spaces)
    println!("Default:\n{}\n", to_string(&config)?);

    // Two spaces per level
    let options = DcfOptions::new().with_indent(2);
    println!("Indent 2:\n{}\n", to_string_with_options(&config, options)?);

    // No indentation, line breaks only
    let options = DcfOptions::new().with_indent(0);
    println!("Indent 0:\n{}\n", to_string_with_options(&config, options)?);

    // Widths from untrusted input go through the checked constructor
    match DcfOptions::new().try_with_indent(-3) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Rejected: {}", e),
    }

    Ok(())
}
