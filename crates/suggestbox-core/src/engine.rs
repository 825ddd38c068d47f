use std::time::Duration;

use async_trait::async_trait;

use crate::candidates::CandidateSet;
use crate::error::Result;

/// Asynchronous source of suggestions for a query.
#[async_trait]
pub trait SuggestionEngine: Send + Sync {
    async fn suggest(&self, query: &str) -> Result<Vec<String>>;
}

/// Filters a fixed candidate set after an artificial delay, standing in for
/// a remote lookup.
#[derive(Debug, Clone)]
pub struct StaticEngine {
    candidates: CandidateSet,
    delay: Duration,
}

impl StaticEngine {
    pub fn new(candidates: CandidateSet, delay: Duration) -> Self {
        Self { candidates, delay }
    }
}

impl Default for StaticEngine {
    fn default() -> Self {
        Self::new(CandidateSet::fruits(), Duration::from_millis(100))
    }
}

#[async_trait]
impl SuggestionEngine for StaticEngine {
    async fn suggest(&self, query: &str) -> Result<Vec<String>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.candidates.filter(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_static_engine_waits_then_filters() {
        let engine = StaticEngine::default();
        let start = tokio::time::Instant::now();
        let result = engine.suggest("an").await.unwrap();
        assert_eq!(result, vec!["banana"]);
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_static_engine_empty_query() {
        let engine = StaticEngine::new(CandidateSet::fruits(), Duration::ZERO);
        assert!(engine.suggest("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_engine_as_trait_object() {
        let engine: std::sync::Arc<dyn SuggestionEngine> =
            std::sync::Arc::new(StaticEngine::new(CandidateSet::new(["Kiwi", "Lime"]), Duration::ZERO));
        assert_eq!(engine.suggest("KI").await.unwrap(), vec!["Kiwi"]);
    }
}
