//! In-process tutorial repository.
//!
//! Backs `STORAGE_BACKEND=memory` and the router tests. Records live in a
//! `BTreeMap` keyed by id, so listings come out in id order for free.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::repository::{RepositoryError, RepositoryResult, TutorialRepository};
use crate::models::tutorial::{Tutorial, TutorialDraft};

#[derive(Debug, Default)]
struct Store {
    records: BTreeMap<i64, Tutorial>,
    /// Last id handed out; ids are never reused, even after delete_all
    last_id: i64,
}

#[derive(Debug, Default)]
pub struct InMemoryTutorialRepository {
    store: RwLock<Store>,
}

impl InMemoryTutorialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select<P>(&self, predicate: P) -> Vec<Tutorial>
    where
        P: Fn(&Tutorial) -> bool,
    {
        let store = self.store.read().await;
        store
            .records
            .values()
            .filter(|t| predicate(*t))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TutorialRepository for InMemoryTutorialRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Tutorial>> {
        Ok(self.store.read().await.records.get(&id).cloned())
    }

    async fn find_by_published(&self, published: bool) -> RepositoryResult<Vec<Tutorial>> {
        Ok(self.select(|t| t.published == published).await)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Tutorial>> {
        Ok(self.select(|_| true).await)
    }

    async fn find_by_title_containing(&self, fragment: &str) -> RepositoryResult<Vec<Tutorial>> {
        Ok(self.select(|t| t.title.contains(fragment)).await)
    }

    async fn create(&self, draft: TutorialDraft) -> RepositoryResult<Tutorial> {
        let mut store = self.store.write().await;
        store.last_id += 1;
        let tutorial = draft.into_tutorial(store.last_id);
        store.records.insert(tutorial.id, tutorial.clone());
        Ok(tutorial)
    }

    async fn update(&self, id: i64, draft: TutorialDraft) -> RepositoryResult<Tutorial> {
        let mut store = self.store.write().await;
        let slot = store
            .records
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;
        *slot = draft.into_tutorial(id);
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        self.store
            .write()
            .await
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn delete_all(&self) -> RepositoryResult<u64> {
        let mut store = self.store.write().await;
        let removed = store.records.len() as u64;
        store.records.clear();
        Ok(removed)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Ok(self.store.read().await.records.len() as i64)
    }
}
