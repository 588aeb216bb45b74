use std::collections::HashMap;

use reelquote_core::{MovieId, OfferAggregator, ProviderId, ProviderRef};

use crate::cli::QuoteArgs;
use crate::error::CliError;
use crate::output::{self, OutputOptions};

pub async fn run(
    args: &QuoteArgs,
    aggregator: &OfferAggregator,
    options: OutputOptions,
) -> Result<(), CliError> {
    let references = parse_references(&args.references)?;
    let quote = aggregator.resolve_quote(&references).await;
    output::render_quote(&quote, options)
}

fn parse_references(raw: &[String]) -> Result<HashMap<ProviderId, MovieId>, CliError> {
    let mut references = HashMap::with_capacity(raw.len());
    for value in raw {
        let reference: ProviderRef = value.parse()?;
        if references
            .insert(reference.provider, reference.movie_id)
            .is_some()
        {
            return Err(CliError::Usage(format!(
                "duplicate reference for provider '{}'",
                reference.provider
            )));
        }
    }
    Ok(references)
}
