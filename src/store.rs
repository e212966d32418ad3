//! 历史记录存储
//!
//! 启动时读一次，之后每次修改都把整个列表重新写回同一个键。

use crate::error::Result;
use crate::kv::KvStore;
use chef_mentor_common::{Category, CategoryFilter, HistoryList, HistoryRecord};

pub const HISTORY_KEY: &str = "chef_mentor_history";

pub struct HistoryStore<S: KvStore> {
    backend: S,
    list: HistoryList,
}

impl<S: KvStore> HistoryStore<S> {
    /// 读取历史记录
    ///
    /// 没有数据、读取失败、JSON 损坏时都当作空列表，只记日志
    pub fn load(backend: S) -> Self {
        let list = match backend.get(HISTORY_KEY) {
            Ok(Some(content)) => match serde_json::from_str::<HistoryList>(&content) {
                Ok(list) => {
                    tracing::debug!("loaded {} history records", list.len());
                    list
                }
                Err(e) => {
                    tracing::warn!("failed to parse stored history, starting empty: {}", e);
                    HistoryList::new()
                }
            },
            Ok(None) => HistoryList::new(),
            Err(e) => {
                tracing::warn!("failed to read stored history, starting empty: {}", e);
                HistoryList::new()
            }
        };

        Self { backend, list }
    }

    /// 整个列表写回存储
    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.list)?;
        self.backend.set(HISTORY_KEY, &json)?;
        Ok(())
    }

    /// 插到最前面并保存；保存失败时撤回
    pub fn append(&mut self, record: HistoryRecord) -> Result<()> {
        tracing::info!("saving record {} ({})", record.id, record.feedback.recipe_name);
        let id = record.id.clone();
        self.list.prepend(record);
        if let Err(e) = self.persist() {
            self.list.remove(&id);
            return Err(e);
        }
        Ok(())
    }

    /// 删除记录，不存在时不报错
    pub fn remove(&mut self, id: &str) -> Result<Option<HistoryRecord>> {
        let removed = self.list.remove(id);
        if removed.is_none() {
            tracing::debug!("remove: no record with id {}", id);
        }
        self.persist()?;
        Ok(removed)
    }

    pub fn update_category(&mut self, id: &str, category: Category) -> Result<bool> {
        let updated = self.list.update_category(id, category);
        self.persist()?;
        Ok(updated)
    }

    pub fn filter(&self, filter: CategoryFilter) -> impl Iterator<Item = &HistoryRecord> + '_ {
        self.list.filter(filter)
    }

    pub fn get(&self, id: &str) -> Option<&HistoryRecord> {
        self.list.get(id)
    }

    pub fn next_id(&self, timestamp_ms: i64) -> String {
        self.list.next_id(timestamp_ms)
    }

    pub fn records(&self) -> &[HistoryRecord] {
        self.list.records()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }
}
