//! Build and edit `Value` trees without a Rust type behind them.
//!
//! Run with: cargo run --example dynamic_values

use serde_dcf::{dcf, Section, Value};
use std::error::Error;

fn describe(value: &Value, depth: usize) {
    let pad = "  ".repeat(depth);
    match value {
        Value::Array(values) => {
            println!("{}array of {}", pad, values.len());
            for value in values {
                describe(value, depth + 1);
            }
        }
        Value::Section(section) => {
            println!("{}section of {}", pad, section.len());
            for (key, value) in section.iter() {
                println!("{}  {}:", pad, key);
                describe(value, depth + 2);
            }
        }
        other => println!("{}{} {}", pad, other.kind(), other),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::init_with_level(log::Level::Info)?;

    let mut root = dcf!({
        "name": "pipeline",
        "stages": ["fetch", "build", "test"],
        "limits": { "cpu": 2, "memory": 1.5 }
    });

    describe(&root, 0);

    // Copies share nested sections until one side is modified.
    let snapshot = root.clone();
    assert!(snapshot.shares_section_with(&root));

    let limits = root.as_section_mut()?.get_mut("limits")?.as_section_mut()?;
    limits.set("cpu", 4);
    limits.set("gpu", false);

    root.as_section_mut()?
        .get_mut("stages")?
        .as_array_mut()?
        .push(Value::from("deploy"));

    assert!(!snapshot.shares_section_with(&root));
    println!("\nBefore:\n{}\n\nAfter:\n{}", snapshot, root);

    let section: Section = root.into_section()?;
    match section.get("owner") {
        Ok(_) => println!("owner present"),
        Err(e) => println!("\nLookup failed as expected: {}", e),
    }
    println!("memory as int: {:?}", section.get("limits")?.as_section()?.get("memory")?.as_int());

    Ok(())
}
