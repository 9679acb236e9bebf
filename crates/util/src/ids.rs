//! Unique element id generation.
//!
//! Components use ids to link a control to its label, help text and
//! collapsible regions. Factories are passed in explicitly so tests can pin
//! the generated values.

use std::collections::HashMap;
use std::sync::Mutex;

/// Produces ids that are distinct per category for the life of the factory.
pub trait IdFactory: Send + Sync {
    /// Returns the next id for `category`. Repeated calls never return the
    /// same value for the same category.
    fn next_id(&self, category: &str) -> String;
}

/// Thread-safe factory with one counter per category.
///
/// Ids take the form `"{category}{n}"` with `n` starting at 1, e.g.
/// `TextField1`, `TextField2`, `AdditionalItems1`.
#[derive(Debug, Default)]
pub struct SequentialIdFactory {
    counters: Mutex<HashMap<String, u64>>,
}

impl SequentialIdFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdFactory for SequentialIdFactory {
    fn next_id(&self, category: &str) -> String {
        let mut counters = self.counters.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let counter = counters.entry(category.to_string()).or_insert(0);
        *counter += 1;
        format!("{category}{counter}")
    }
}

/// Factory that namespaces every id with a fixed prefix, e.g. to keep ids of
/// two independently mounted component trees apart.
#[derive(Debug)]
pub struct ScopedIdFactory<F> {
    scope: String,
    inner: F,
}

impl<F: IdFactory> ScopedIdFactory<F> {
    pub fn new(scope: impl Into<String>, inner: F) -> Self {
        Self {
            scope: scope.into(),
            inner,
        }
    }
}

impl<F: IdFactory> IdFactory for ScopedIdFactory<F> {
    fn next_id(&self, category: &str) -> String {
        format!("{}-{}", self.scope, self.inner.next_id(category))
    }
}

impl<F: IdFactory + ?Sized> IdFactory for &F {
    fn next_id(&self, category: &str) -> String {
        (**self).next_id(category)
    }
}

impl<F: IdFactory + ?Sized> IdFactory for std::sync::Arc<F> {
    fn next_id(&self, category: &str) -> String {
        (**self).next_id(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn counters_are_per_category() {
        let ids = SequentialIdFactory::new();
        assert_eq!(ids.next_id("TextField"), "TextField1");
        assert_eq!(ids.next_id("TextField"), "TextField2");
        assert_eq!(ids.next_id("HelpText"), "HelpText1");
    }

    #[test]
    fn scoped_ids_carry_the_scope() {
        let ids = ScopedIdFactory::new("sidebar", SequentialIdFactory::new());
        assert_eq!(ids.next_id("AdditionalItems"), "sidebar-AdditionalItems1");
    }

    #[test]
    fn ids_stay_unique_across_threads() {
        let ids = Arc::new(SequentialIdFactory::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..50).map(|_| ids.next_id("Field")).collect::<Vec<_>>())
            })
            .collect();
        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().expect("worker thread") {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 200);
    }
}
