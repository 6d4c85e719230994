use std::collections::VecDeque;
use std::sync::Arc;

use protocol::AnalysisResult;

pub const HISTORY_CAPACITY: usize = 100;

/// Bounded, recency-ordered store of past analysis results, newest first.
/// Results are shared by `Arc`, so eviction never invalidates the
/// currently-displayed analysis.
#[derive(Debug, Clone)]
pub struct HistoryCache {
    entries: VecDeque<Arc<AnalysisResult>>,
    capacity: usize,
}

impl HistoryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepends `result`, evicting from the tail while over capacity.
    /// Repeated analyses of the same term stay as distinct entries.
    pub fn insert(&mut self, result: Arc<AnalysisResult>) {
        self.entries.push_front(result);
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Newest-first snapshot. Copies under the caller's lock, so concurrent
    /// mutation is never observable mid-read.
    pub fn list(&self) -> Vec<Arc<AnalysisResult>> {
        self.entries.iter().cloned().collect()
    }

    pub fn head(&self) -> Option<&Arc<AnalysisResult>> {
        self.entries.front()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<AnalysisResult>> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryCache {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(term: &str) -> Arc<AnalysisResult> {
        Arc::new(AnalysisResult::new(term, "ctx", "summary", "detail"))
    }

    #[test]
    fn insert_is_newest_first() {
        let mut cache = HistoryCache::default();
        cache.insert(result("first"));
        cache.insert(result("second"));

        let listed = cache.list();
        assert_eq!(listed[0].term, "second");
        assert_eq!(listed[1].term, "first");
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut cache = HistoryCache::new(3);
        for i in 0..5 {
            cache.insert(result(&format!("term {}", i)));
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.head().unwrap().term, "term 4");
        assert_eq!(cache.list().last().unwrap().term, "term 2");
    }

    #[test]
    fn duplicate_terms_are_kept() {
        let mut cache = HistoryCache::default();
        cache.insert(result("same"));
        cache.insert(result("same"));
        assert_eq!(cache.len(), 2);
    }
}
