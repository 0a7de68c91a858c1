use anyhow::{Context, Result};
use std::path::PathBuf;

use aerovis::binary::{read_array, ElementType, NumericArray};

/// Display information about a binary array file
pub fn run(file: PathBuf, element_type: ElementType, components: usize, head: usize) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }
    if components == 0 {
        anyhow::bail!("--components must be at least 1");
    }

    let array = read_array(&file, element_type, None)
        .with_context(|| format!("Failed to read {} as {}", file.display(), element_type))?;

    println!("Binary Array");
    println!("============");
    println!("File: {}", file.display());
    println!("Type: {}", element_type);
    println!("Contents: {}", array.stats());

    if array.len() % components != 0 {
        println!(
            "Warning: {} elements is not a multiple of {} components",
            array.len(),
            components
        );
    }
    println!("Tuples: {}", array.len() / components);
    println!();

    let values: Vec<String> = match &array {
        NumericArray::Float(v) => v.iter().map(|x| x.to_string()).collect(),
        NumericArray::Int(v) => v.iter().map(|x| x.to_string()).collect(),
    };
    for (i, tuple) in values.chunks(components).take(head).enumerate() {
        println!("  {:5}: {}", i, tuple.join(", "));
    }

    Ok(())
}
