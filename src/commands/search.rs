use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use crate::client::SearchStats;
use crate::corpus::{CorpusSource, JsonCorpus, Record};
use crate::search::rank;
use crate::Config;

/// Run the search command
///
/// Ranks the local catalog without a server and prints the results with
/// their summary line.
///
/// # Arguments
///
/// * `config` - Resolved configuration
/// * `root` - Project root that relative paths resolve against
/// * `query` - The search query
/// * `corpus` - Catalog file override
/// * `limit` - Maximum number of results to print
pub async fn run(
    config: &Config,
    root: &Path,
    query: &str,
    corpus: Option<PathBuf>,
    limit: Option<usize>,
) -> Result<()> {
    let corpus_path = corpus.unwrap_or_else(|| config.corpus_path(root));
    let records = match JsonCorpus::load(&corpus_path)?.records() {
        Ok(records) => records,
        Err(e) => bail!("Course catalog {} is unusable: {}", corpus_path.display(), e),
    };

    if query.trim().is_empty() {
        println!("Start typing to search");
        return Ok(());
    }

    let limit = limit
        .unwrap_or(config.search.max_results)
        .min(config.search.max_results);
    let results = rank(&records, query, limit);

    if results.is_empty() {
        println!("No results for '{}'", query.trim());
        return Ok(());
    }

    println!("{}\n", SearchStats::from_results(&results));

    for (i, record) in results.iter().enumerate() {
        println!("{}", format_card(i + 1, record));
    }

    Ok(())
}

/// One result as a short multi-line card
pub fn format_card(position: usize, record: &Record) -> String {
    let mut card = format!("{}. {} (${:.2})", position, record.title, record.price);

    let byline: Vec<&str> = [record.category.as_str(), record.instructor.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !byline.is_empty() {
        card.push_str(&format!("\n   {}", byline.join(" · ")));
    }
    if !record.description.is_empty() {
        card.push_str(&format!("\n   {}", record.description));
    }

    card
}
