//! CLI argument definitions for reelquote.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `catalog` | Merged movie catalog across all configured providers |
//! | `quote` | Per-provider offers for one title, cheapest flagged |
//! | `sources` | List configured providers and their display assets |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--json` | `false` | Emit JSON instead of a table |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--log-level` | `warn` | Log filter when `RUST_LOG` is unset |
//!
//! # Examples
//!
//! ```bash
//! # Merged catalog
//! reelquote catalog
//!
//! # Compare offers for one title (references come from the catalog output)
//! reelquote quote cinemaworld=cw0080684 filmworld=fw0080684
//!
//! # Machine-readable output
//! reelquote catalog --json --pretty
//! ```

use clap::{Args, Parser, Subcommand};

/// Multi-provider movie price comparison.
///
/// Queries every configured catalog backend, merges listings by title, and
/// finds the cheapest offer for a title across providers.
#[derive(Debug, Parser)]
#[command(
    name = "reelquote",
    author,
    version,
    about = "Multi-provider movie price comparison"
)]
pub struct Cli {
    /// Emit JSON instead of a table.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the merged catalog across all configured providers.
    Catalog,

    /// Compare per-provider offers for one title.
    Quote(QuoteArgs),

    /// List configured providers and their display assets.
    Sources,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Provider references as `provider=id` pairs, one per provider.
    #[arg(required = true, value_name = "PROVIDER=ID")]
    pub references: Vec<String>,
}
