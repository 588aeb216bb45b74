mod catalog;
mod quote;
mod sources;

use reelquote_core::OfferAggregator;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::OutputOptions;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    // The provider set is assembled once per invocation from the
    // environment; providers that fail construction are logged and skipped.
    let aggregator = OfferAggregator::builder().build();
    let options = OutputOptions {
        json: cli.json,
        pretty: cli.pretty,
    };

    match &cli.command {
        Command::Catalog => catalog::run(&aggregator, options).await,
        Command::Quote(args) => quote::run(args, &aggregator, options).await,
        Command::Sources => sources::run(&aggregator, options),
    }
}
