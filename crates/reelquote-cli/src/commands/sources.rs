use reelquote_core::OfferAggregator;

use crate::error::CliError;
use crate::output::{self, OutputOptions};

pub fn run(aggregator: &OfferAggregator, options: OutputOptions) -> Result<(), CliError> {
    let snapshots = aggregator.snapshots();
    output::render_sources(&snapshots, options)
}
