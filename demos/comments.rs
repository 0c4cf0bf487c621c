//! Comments before a key become its header and are written back out.
//!
//! Run with: cargo run --example comments

use serde_dcf::parse;
use std::error::Error;

const DOCUMENT: &str = r#"
// Comments outside a section are dropped.
{
    // Address to bind.
    // Use 0.0.0.0 for all interfaces.
    host: "0.0.0.0",
    port: 8080, // trailing comments attach to the next key
    /* Cache settings,
       sizes in megabytes */
    cache: {
        size: 64,
        enabled: /* inline comments vanish */ true
    },
    secret: @env("SECRET")
}
"#;

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::init_with_level(log::Level::Debug)?;

    let mut section = parse(DOCUMENT)?;
    for (key, entry) in section.entries() {
        println!("{:>7} header: {:?}", key, entry.header());
    }

    section.set_header("port", "Listening port.")?;
    section.set_with_header("timeout", "Seconds before giving up.", 30);
    section.remove("secret");

    println!("\nRewritten:\n{}", section);

    let again = parse(&section.to_string())?;
    assert_eq!(again, section);
    println!("\n✓ Headers survived the round trip");

    Ok(())
}
