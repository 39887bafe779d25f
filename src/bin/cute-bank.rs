use std::fs::File;

use anyhow::{Context, Result};
use cute_bank::bin_utils::{Service, ServiceError, response::Response};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected a file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line: u64, err: ServiceError| {
            let response = Response::from(&err);
            eprintln!("Error at line {line}: {} {}", response.status, response.message)
        }),
    };
    service.run()
}
