use std::sync::Arc;

use crate::database::repository::StatsStore;
use crate::models::word_stats::WeakWord;

#[derive(Clone)]
pub struct WeakWordSelector {
    stats: Arc<dyn StatsStore>,
    min_attempts: i32,
}

impl WeakWordSelector {
    pub fn new(stats: Arc<dyn StatsStore>, min_attempts: i32) -> Self {
        Self { stats, min_attempts }
    }

    pub async fn select_weakest(&self, limit: i64) -> Vec<WeakWord> {
        match self.stats.weakest(self.min_attempts, limit).await {
            Ok(words) => words,
            Err(e) => {
                tracing::error!(error = ?e, "Error loading missed words");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::repository::MockStatsStore;
    use crate::error::Error;

    #[tokio::test]
    async fn selector_passes_floor_and_limit() {
        let mut store = MockStatsStore::new();
        store
            .expect_weakest()
            .withf(|min, limit| *min == 2 && *limit == 15)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        let selector = WeakWordSelector::new(Arc::new(store), 2);

        assert!(selector.select_weakest(15).await.is_empty());
    }

    #[tokio::test]
    async fn selector_degrades_to_empty_on_failure() {
        let mut store = MockStatsStore::new();
        store
            .expect_weakest()
            .returning(|_, _| Err(Error::Internal("relation does not exist".to_string())));
        let selector = WeakWordSelector::new(Arc::new(store), 2);

        assert!(selector.select_weakest(10).await.is_empty());
    }
}
