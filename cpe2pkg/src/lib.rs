use anyhow::{Context, Result};
use clap::Parser;
use cpe2pkg_core::catalog::{load_catalog, DEFAULT_DELIMITER};
use cpe2pkg_core::{result_line, search_outcome, InvertedIndex, PackageCoordinate};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "cpe2pkg")]
#[command(about = "Find package coordinates matching CPE vendor/product text", long_about = None)]
pub struct Cli {
    /// Query, e.g. "vendor:( apache poi ) AND product:( poi )"
    pub query: String,
    /// File containing the package catalog, one `vendor,product` pair per line
    #[arg(long, short = 'p', default_value = "packages")]
    pub pkgfile: PathBuf,
    /// Number of top results to print
    #[arg(long, short = 't', default_value_t = 10)]
    pub top: usize,
    /// Field delimiter used in the catalog file
    #[arg(long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,
    /// Print a JSON response instead of `<score> <vendor>:<product>` lines
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: u32,
    pub score: f32,
    #[serde(flatten)]
    pub coordinate: PackageCoordinate,
}

/// Build the index from the catalog, run the query and write ranked results to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let catalog = load_catalog(&cli.pkgfile, cli.delimiter)?;
    let index = InvertedIndex::build(catalog).with_context(|| format!("cannot index {}", cli.pkgfile.display()))?;

    let start = Instant::now();
    let outcome = search_outcome(&index, &cli.query, cli.top).context("Unable to parse given query")?;
    let total_hits = outcome.total_hits;
    let ranked = outcome.hits;
    let elapsed = start.elapsed();
    tracing::info!(total_hits, returned = ranked.len(), took_s = elapsed.as_secs_f64(), "search complete");

    if cli.json {
        let results = ranked
            .into_iter()
            .map(|m| SearchHit { doc_id: m.doc_id, score: m.score, coordinate: m.coordinate })
            .collect();
        let response = SearchResponse { query: cli.query.clone(), took_s: elapsed.as_secs_f64(), total_hits, results };
        serde_json::to_writer_pretty(&mut *out, &response)?;
        writeln!(out)?;
    } else {
        for m in &ranked {
            writeln!(out, "{}", result_line(m))?;
        }
    }
    Ok(())
}
