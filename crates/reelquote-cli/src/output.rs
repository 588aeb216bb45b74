//! Rendering for catalog, quote, and source listings.
//!
//! Table output is for humans; `--json` emits the core data structures
//! verbatim for scripting.

use serde::Serialize;

use reelquote_core::{CatalogEntry, Quote, SourceSnapshot};

use crate::error::CliError;

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub pretty: bool,
}

pub fn render_catalog(entries: &[CatalogEntry], options: OutputOptions) -> Result<(), CliError> {
    if options.json {
        return print_json(&entries, options);
    }

    if entries.is_empty() {
        println!("no titles available");
        return Ok(());
    }

    let rows = entries
        .iter()
        .map(|entry| {
            vec![
                entry.title.clone(),
                entry.poster.clone(),
                entry
                    .references
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            ]
        })
        .collect::<Vec<_>>();

    print_table(&["TITLE", "POSTER", "REFERENCES"], &rows);
    Ok(())
}

pub fn render_quote(quote: &Quote, options: OutputOptions) -> Result<(), CliError> {
    if options.json {
        return print_json(quote, options);
    }

    if quote.is_empty() {
        println!("no offers available");
        return Ok(());
    }

    let rows = quote
        .offers
        .iter()
        .map(|offer| {
            vec![
                offer.provider.to_string(),
                format!("{:.2}", offer.price),
                if offer.cheapest { "yes" } else { "" }.to_owned(),
                offer.movie_id.to_string(),
                offer.poster.clone(),
            ]
        })
        .collect::<Vec<_>>();

    print_table(&["PROVIDER", "PRICE", "CHEAPEST", "ID", "POSTER"], &rows);
    Ok(())
}

pub fn render_sources(snapshots: &[SourceSnapshot], options: OutputOptions) -> Result<(), CliError> {
    if options.json {
        return print_json(&snapshots, options);
    }

    if snapshots.is_empty() {
        println!("no providers configured");
        return Ok(());
    }

    let rows = snapshots
        .iter()
        .map(|snapshot| vec![snapshot.id.to_string(), snapshot.logo.clone()])
        .collect::<Vec<_>>();

    print_table(&["PROVIDER", "LOGO"], &rows);
    Ok(())
}

fn print_json<T: Serialize>(value: &T, options: OutputOptions) -> Result<(), CliError> {
    let rendered = if options.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths = headers
        .iter()
        .map(|header| header.chars().count())
        .collect::<Vec<_>>();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    let header_line = headers
        .iter()
        .enumerate()
        .map(|(index, header)| format!("{header:<width$}", width = widths[index]))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header_line.trim_end());

    for row in rows {
        let line = row
            .iter()
            .enumerate()
            .map(|(index, cell)| format!("{cell:<width$}", width = widths[index]))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line.trim_end());
    }
}
