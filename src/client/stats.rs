//! Summary figures derived from the displayed result set.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::corpus::Record;

/// Count, average price and distinct categories of a result set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchStats {
    pub total: usize,
    /// Rounded to two decimals; 0 for an empty result set
    pub avg_price: f64,
    pub categories: usize,
}

impl SearchStats {
    pub fn from_results(results: &[Record]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let sum: f64 = results.iter().map(|r| r.price).sum();
        let avg = sum / results.len() as f64;

        let categories = results
            .iter()
            .map(|r| r.category.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total: results.len(),
            avg_price: (avg * 100.0).round() / 100.0,
            categories,
        }
    }

    /// Average price with exactly two decimals, e.g. `"200.00"`.
    pub fn avg_price_display(&self) -> String {
        format!("{:.2}", self.avg_price)
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} results | avg price ${} | {} categories",
            self.total,
            self.avg_price_display(),
            self.categories
        )
    }
}

/// Caches [`SearchStats`] for the last result set it saw.
///
/// Recomputes only when handed a different `Arc` than last time.
#[derive(Debug, Default)]
pub struct StatsMemo {
    source: Option<Arc<[Record]>>,
    stats: SearchStats,
    computations: usize,
}

impl StatsMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, results: &Arc<[Record]>) -> &SearchStats {
        let fresh = match &self.source {
            Some(source) => !Arc::ptr_eq(source, results),
            None => true,
        };

        if fresh {
            self.stats = SearchStats::from_results(results);
            self.source = Some(Arc::clone(results));
            self.computations += 1;
        }

        &self.stats
    }

    /// How many times the stats were actually computed.
    pub fn computations(&self) -> usize {
        self.computations
    }
}
