#![forbid(unsafe_code)]
//! Walk through sealing, listing, tampering and verifying a small ledger.

use clap::Parser;
use colored::*;
use sealchain::blockchain::Blockchain;
use sealchain::cli::{render_block, render_chain, render_status};
use sealchain::config::{load_config, load_config_from};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Leading zero hex digits required of each block hash (overrides the config file)
    #[arg(long)]
    difficulty: Option<u32>,
    /// Path to a TOML config file (defaults to ./sealchain.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print only the block at this index instead of the whole chain
    #[arg(long)]
    show: Option<usize>,
    /// Overwrite this block's transactions and re-verify the chain
    #[arg(long)]
    tamper: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    let difficulty = cli.difficulty.unwrap_or(config.ledger.difficulty);

    let mut chain = Blockchain::from_config(&config)?;

    println!("{}", "⛏️  Sealchain demo".bright_cyan().bold());
    println!("Difficulty: {}\n", difficulty);

    chain.add_transaction("Alice", "Bob", 10.5);
    chain.add_transaction("Bob", "Charlie", 20.0);
    seal(&mut chain, difficulty)?;

    chain.add_transaction("Charlie", "John", 10.5);
    chain.add_transaction("John", "Alice", 20.0);
    seal(&mut chain, difficulty)?;

    match cli.show {
        Some(index) => match chain.get_block(index) {
            Ok(block) => println!("{}", render_block(index, block)),
            Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
        },
        None => println!("{}", render_chain(chain.blocks())),
    }

    println!("{}", render_status(&chain.verify()));

    if let Some(index) = cli.tamper {
        match chain.tamper_block(index, r#"[{"note":"rewritten"}]"#) {
            Ok(()) => {
                println!("Block {} transactions rewritten", index);
                println!("{}", render_status(&chain.verify()));
            }
            Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
        }
    }

    Ok(())
}

fn seal(chain: &mut Blockchain, difficulty: u32) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let block = chain.append_block(difficulty)?;
    println!(
        "✅ Sealed block {} in {:.3}s (nonce {}, hash {})",
        chain.len() - 1,
        start.elapsed().as_secs_f64(),
        block.nonce,
        block.current_hash.green()
    );
    Ok(())
}
