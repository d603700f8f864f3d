//! The ranking engine: query in, ordered and capped records out.

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::scoring::{score_record, ScoredRecord};
use crate::corpus::{CorpusError, CorpusSource, Record};

/// Default cap on the number of returned records.
pub const DEFAULT_MAX_RESULTS: usize = 50;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Course data is unavailable: {0}")]
    Corpus(#[from] CorpusError),
}

/// Scores an injected, read-only corpus against free-text queries.
///
/// Holds no mutable state, so one engine can serve concurrent requests.
#[derive(Clone)]
pub struct RankingEngine {
    corpus: Arc<dyn CorpusSource>,
    max_results: usize,
}

impl RankingEngine {
    /// Create an engine returning at most [`DEFAULT_MAX_RESULTS`] records.
    pub fn new(corpus: Arc<dyn CorpusSource>) -> Self {
        Self {
            corpus,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Set a custom result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Number of records in the corpus, if it is usable.
    pub fn corpus_size(&self) -> Result<usize, SearchError> {
        Ok(self.corpus.records()?.len())
    }

    /// Rank the corpus for `query`.
    ///
    /// A blank query returns an empty list without consulting the corpus.
    pub fn search(&self, query: &str) -> Result<Vec<Record>, SearchError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let records = self.corpus.records()?;
        let results = rank_normalized(&records, &needle, self.max_results);

        debug!(
            query = %needle,
            corpus = records.len(),
            results = results.len(),
            "Ranked corpus"
        );

        Ok(results)
    }
}

/// Rank `records` for a raw query and keep the best `limit`.
pub fn rank(records: &[Record], query: &str, limit: usize) -> Vec<Record> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    rank_normalized(records, &needle, limit)
}

fn rank_normalized(records: &[Record], needle: &str, limit: usize) -> Vec<Record> {
    let mut scored: Vec<ScoredRecord<'_>> = records
        .iter()
        .filter_map(|record| {
            let score = score_record(record, needle);
            (score > 0).then_some(ScoredRecord { record, score })
        })
        .collect();

    // sort_by is stable: equal scores keep corpus order
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    scored
        .into_iter()
        .take(limit)
        .map(|scored| scored.record.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{InMemoryCorpus, JsonCorpus};

    fn course(id: i64, title: &str, category: &str, description: &str) -> Record {
        Record {
            id,
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            price: 10.0,
            instructor: String::new(),
        }
    }

    fn engine(records: Vec<Record>) -> RankingEngine {
        RankingEngine::new(Arc::new(InMemoryCorpus::new(records)))
    }

    #[test]
    fn test_intro_example() {
        let engine = engine(vec![
            course(2, "Advanced Go", "", "A great intro"),
            course(1, "Intro to Go", "Systems", ""),
        ]);

        let results = engine.search("Intro").unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_blank_query_returns_empty() {
        let engine = engine(vec![course(1, "Anything", "", "")]);
        assert!(engine.search("").unwrap().is_empty());
        assert!(engine.search("   \t ").unwrap().is_empty());
    }

    #[test]
    fn test_blank_query_skips_malformed_corpus() {
        let corpus = JsonCorpus::from_value(serde_json::json!({"not": "a list"}));
        let engine = RankingEngine::new(Arc::new(corpus));

        assert!(engine.search(" ").unwrap().is_empty());
        assert!(matches!(engine.search("go"), Err(SearchError::Corpus(_))));
    }

    #[test]
    fn test_query_is_trimmed() {
        let engine = engine(vec![course(1, "Rust", "", "")]);
        assert_eq!(engine.search("  rust  ").unwrap().len(), 1);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let engine = engine(vec![
            course(5, "Cooking", "Art", "art of cooking"),
            course(3, "Painting", "Art", ""),
            course(9, "Art History", "", ""),
            course(4, "Sculpture", "Art", ""),
        ]);

        let ids: Vec<_> = engine.search("art").unwrap().iter().map(|r| r.id).collect();
        // 10, then the 4 (3+1), then the two 3s in corpus order
        assert_eq!(ids, vec![9, 5, 3, 4]);
    }

    #[test]
    fn test_non_matches_are_excluded() {
        let engine = engine(vec![course(1, "Rust", "", ""), course(2, "Go", "", "")]);
        let results = engine.search("rust").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn test_cap_keeps_highest_scores() {
        let mut records: Vec<Record> = (0..60)
            .map(|i| course(i, "Other", "", "python notes"))
            .collect();
        records.push(course(100, "Python Basics", "", ""));
        records.push(course(101, "Fluent Python", "", ""));

        let results = engine(records).search("python").unwrap();
        assert_eq!(results.len(), DEFAULT_MAX_RESULTS);
        assert_eq!(results[0].id, 100);
        assert_eq!(results[1].id, 101);
        let tail: Vec<_> = results[2..].iter().map(|r| r.id).collect();
        assert_eq!(tail, (0..48).collect::<Vec<_>>());
    }

    #[test]
    fn test_custom_max_results() {
        let records = (0..10).map(|i| course(i, "Go", "", "")).collect();
        let engine = engine(records).with_max_results(3);
        assert_eq!(engine.search("go").unwrap().len(), 3);
    }

    #[test]
    fn test_rank_free_function() {
        let records = vec![course(1, "Databases", "", ""), course(2, "SQL for Databases", "", "")];
        let ranked = rank(&records, "DATABASES", 10);
        assert_eq!(ranked.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(rank(&records, "", 10).is_empty());
    }
}
