//! Terminal rendering shared by the binaries

use crate::blockchain::{Block, ChainStatus};
use colored::*;

const RULE_WIDTH: usize = 89;

/// Multi-line view of one block: timestamp, nonce, both hashes and the raw payload.
pub fn render_block(index: usize, block: &Block) -> String {
    let banner = "=".repeat(40);
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} {}\n",
        banner,
        format!("Block {}", index).bright_cyan().bold(),
        banner
    ));
    out.push_str(&format!("Timestamp: {}\n", block.timestamp));
    out.push_str(&format!("Nonce: {}\n", block.nonce));
    out.push_str(&format!("Difficulty: {}\n", block.difficulty));
    out.push_str(&format!("Previous Block Hash: {}\n", block.previous_hash.yellow()));
    out.push_str(&format!("Current Block Hash: {}\n", block.current_hash.green()));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!("Transactions:\n{}\n", block.transactions));
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out
}

pub fn render_chain(blocks: &[Block]) -> String {
    blocks
        .iter()
        .enumerate()
        .map(|(i, b)| render_block(i, b))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_status(status: &ChainStatus) -> String {
    match status {
        ChainStatus::Valid => format!("✅ {}", status).bright_green().to_string(),
        ChainStatus::Invalid { .. } => format!("❌ {}", status).red().bold().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::Blockchain;

    #[test]
    fn test_render_block_shows_all_fields() {
        colored::control::set_override(false);
        let mut chain = Blockchain::new();
        chain.add_transaction("Alice", "Bob", 10.5);
        let block = chain.append_block(0).unwrap();

        let text = render_block(0, &block);
        assert!(text.contains("Block 0"));
        assert!(text.contains(&format!("Timestamp: {}", block.timestamp)));
        assert!(text.contains(&format!("Nonce: {}", block.nonce)));
        assert!(text.contains(&format!("Previous Block Hash: {}", block.previous_hash)));
        assert!(text.contains(&format!("Current Block Hash: {}", block.current_hash)));
        assert!(text.contains("sender_blockchain_address"));
    }

    #[test]
    fn test_render_chain_lists_every_block() {
        colored::control::set_override(false);
        let mut chain = Blockchain::new();
        chain.append_block(0).unwrap();
        chain.append_block(0).unwrap();
        let text = render_chain(chain.blocks());
        assert!(text.contains("Block 0"));
        assert!(text.contains("Block 1"));
        assert!(render_status(&chain.verify()).contains("valid"));
    }
}
