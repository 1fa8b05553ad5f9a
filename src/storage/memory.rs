use tokio::sync::Mutex;
use tracing::debug;

/// A single accepted review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    // Write-only outside of tests
    #[cfg_attr(not(test), allow(dead_code))]
    pub text: String,
}

/// Append-only, process-lifetime review store
///
/// Reviews are kept in arrival order and dropped with the store. Callers
/// can count entries but never read them back.
#[derive(Debug, Default)]
pub struct ReviewStore {
    reviews: Mutex<Vec<Review>>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a review
    /// Returns its position (sequential, starting from 0)
    pub async fn append(&self, text: String) -> usize {
        let mut reviews = self.reviews.lock().await;
        let id = reviews.len();
        reviews.push(Review { text });
        debug!(review_id = id, "Appended review to store");
        id
    }

    pub async fn len(&self) -> usize {
        self.reviews.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reviews.lock().await.is_empty()
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Vec<Review> {
        self.reviews.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn starts_empty() {
        let store = ReviewStore::new();
        assert!(store.is_empty().await);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn append_keeps_arrival_order() {
        let store = ReviewStore::new();
        assert_eq!(store.append("first".to_string()).await, 0);
        assert_eq!(store.append("second".to_string()).await, 1);
        assert_eq!(store.append("first".to_string()).await, 2);

        let texts: Vec<String> = store.snapshot().await.into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["first", "second", "first"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_are_not_lost() {
        let store = Arc::new(ReviewStore::new());

        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.append(format!("review {}", i)).await })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap());
        }
        ids.sort_unstable();

        assert_eq!(store.len().await, 64);
        assert_eq!(ids, (0..64).collect::<Vec<_>>());
    }
}
