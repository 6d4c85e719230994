use std::sync::Arc;

use protocol::AnalysisResult;
use smartlex_core::{HistoryCache, HISTORY_CAPACITY};

fn result(term: &str) -> Arc<AnalysisResult> {
    Arc::new(AnalysisResult::new(term, "ctx", "summary", "detail"))
}

#[test]
fn never_exceeds_capacity() {
    let mut cache = HistoryCache::default();
    for i in 0..(HISTORY_CAPACITY + 50) {
        cache.insert(result(&format!("term {}", i)));
        assert!(cache.list().len() <= HISTORY_CAPACITY);
    }
    assert_eq!(cache.len(), HISTORY_CAPACITY);

    // Newest survives, oldest fifty were evicted from the tail.
    assert_eq!(cache.head().unwrap().term, format!("term {}", HISTORY_CAPACITY + 49));
    assert_eq!(cache.list().last().unwrap().term, "term 50");
}

#[test]
fn list_is_reverse_insertion_order() {
    let mut cache = HistoryCache::default();
    let inserted: Vec<_> = (0..10).map(|i| result(&format!("term {}", i))).collect();
    for r in &inserted {
        cache.insert(r.clone());
    }

    let listed = cache.list();
    assert_eq!(listed.len(), inserted.len());
    for (i, r) in listed.iter().enumerate() {
        assert!(Arc::ptr_eq(r, &inserted[inserted.len() - 1 - i]));
    }
}

#[test]
fn eviction_does_not_invalidate_live_references() {
    let mut cache = HistoryCache::new(2);
    let first = result("first");
    let current = first.clone();

    cache.insert(first);
    cache.insert(result("second"));
    cache.insert(result("third"));

    // "first" was evicted but the outstanding reference still reads fine.
    assert_eq!(cache.len(), 2);
    assert_eq!(current.term, "first");
}

#[test]
fn list_is_a_snapshot() {
    let mut cache = HistoryCache::default();
    cache.insert(result("one"));
    let snapshot = cache.list();
    cache.insert(result("two"));

    assert_eq!(snapshot.len(), 1);
    assert_eq!(cache.len(), 2);
}
