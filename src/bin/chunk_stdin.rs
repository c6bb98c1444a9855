//! Simple CLI that reads HTML from stdin and outputs chunk JSON to stdout.

use serde::Serialize;
use sitechunk::{chunk, Chunk, Summary};
use std::io::{self, Read};

#[derive(Serialize)]
struct Output {
    chunks: Vec<Chunk>,
    warnings: Vec<String>,
    summary: Summary,
}

fn main() {
    // Read HTML from stdin
    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    // Chunk with default options
    let result = chunk(&html);

    let output = Output {
        summary: result.summary(),
        chunks: result.chunks,
        warnings: result.warnings,
    };

    println!("{}", serde_json::to_string(&output).unwrap_or_default());
}
