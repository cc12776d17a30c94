use std::path::PathBuf;

use alloy::primitives::Address;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "synthpool", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// RPC endpoint to connect to [default: Alchemy mainnet, built from
    /// $ALCHEMY_KEY]
    #[arg(long, global = true)]
    pub rpc: Option<String>,

    /// JSON config with API keys and price-feed mappings
    #[arg(long, global = true, default_value = "synthpool.json")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Value a liquidity-pool exit against the sponsor's synthetic position
    ExitPool {
        /// Weighted pool holding the synthetic token
        pool: Address,

        /// Sponsor/LP wallet address
        address: Address,

        /// Expected settlement price at expiry [default: spot-price oracle]
        #[arg(short, long)]
        settlement_price: Option<f64>,

        /// Relative pool size at exit (1 = 100%), user position excluded
        #[arg(short, long, default_value_t = 1.0)]
        relative: f64,

        /// Synth price in the pool at exit; rebalances the pool before the
        /// computation
        #[arg(short, long)]
        pool_price: Option<f64>,
    },
    /// Time-weighted average price of a price-accumulating pair
    Twap {
        /// Pair contract to calculate the TWAP for
        contract: Address,

        /// TWAP window ends at this timestamp [default: now]
        #[arg(short, long)]
        timestamp: Option<u64>,

        /// TWAP period in minutes
        #[arg(short, long, default_value_t = 2)]
        period: u64,

        /// TWAP window ends at this block
        #[arg(short, long)]
        block: Option<u64>,

        /// TWAP window starts at this block (only with --block)
        #[arg(short, long)]
        first_block: Option<u64>,
    },
    /// Convert between block number and timestamp
    Block {
        /// Latest block at this timestamp
        #[arg(short, long)]
        timestamp: Option<u64>,

        /// Timestamp of this block
        #[arg(short, long)]
        block: Option<u64>,
    },
    /// Project a money-market borrow balance to a future block
    Repay {
        /// Money-market contract the debt is owed to
        contract: Address,

        /// Borrower address
        address: Address,

        /// Balance to keep after repaying, whole underlying tokens
        #[arg(short, long, default_value_t = 0.0)]
        keep: f64,

        /// Minutes until the repay transaction lands
        #[arg(short, long, default_value_t = 2)]
        time: u64,
    },
}
