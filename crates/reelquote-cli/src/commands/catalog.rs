use reelquote_core::OfferAggregator;

use crate::error::CliError;
use crate::output::{self, OutputOptions};

pub async fn run(aggregator: &OfferAggregator, options: OutputOptions) -> Result<(), CliError> {
    let catalog = aggregator.build_catalog().await;
    output::render_catalog(&catalog, options)
}
