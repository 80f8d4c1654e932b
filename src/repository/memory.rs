//! In-process store used by the `memory` backend and tests

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ResourceStore;
use crate::{error::AppResult, models::Resource};

struct Table<R> {
    next_id: i64,
    rows: BTreeMap<i64, R>,
}

/// Id-ordered map of records. Ids start at 1 and are never reused.
pub struct MemoryStore<R> {
    table: RwLock<Table<R>>,
}

impl<R: Resource> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl<R: Resource> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Resource> ResourceStore<R> for MemoryStore<R> {
    async fn insert(&self, input: &R::Input) -> AppResult<R> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;
        let record = R::from_input(id, input);
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<R>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_page(&self, offset: i64, limit: i64) -> AppResult<Vec<R>> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(0);
        let table = self.table.read().await;
        Ok(table.rows.values().skip(offset).take(limit).cloned().collect())
    }

    async fn update(&self, id: i64, input: &R::Input) -> AppResult<bool> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = R::from_input(id, input);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
