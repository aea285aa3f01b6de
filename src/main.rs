//! Kestrel installer builder - self-extracting Linux installer assembly.
//!
//! This binary packages a prebuilt Kestrel binary distribution together with
//! a generated interactive setup script into makeself `.run` installers,
//! one per target architecture.

mod builder;
mod cli;
mod error;
mod setup;

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
