//! 历史记录列表
//!
//! 新记录放在最前面。只负责内存中的增删改查，持久化由调用方处理。

use crate::types::{Category, CategoryFilter, HistoryRecord};
use serde::{Deserialize, Serialize};

/// 按时间倒序排列的历史记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryList {
    records: Vec<HistoryRecord>,
}

impl HistoryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }

    /// 插入到最前面
    pub fn prepend(&mut self, record: HistoryRecord) {
        self.records.insert(0, record);
    }

    /// 删除指定ID的记录，不存在时什么都不做
    pub fn remove(&mut self, id: &str) -> Option<HistoryRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// 只改分类，其他字段保持不变
    pub fn update_category(&mut self, id: &str, category: Category) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.category = category;
                true
            }
            None => false,
        }
    }

    /// 按分类筛选，保持原有顺序
    pub fn filter(&self, filter: CategoryFilter) -> impl Iterator<Item = &HistoryRecord> + '_ {
        self.records
            .iter()
            .filter(move |r| filter.matches(r.category))
    }

    pub fn get(&self, id: &str) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> + '_ {
        self.records.iter()
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 由毫秒时间戳生成ID
    ///
    /// 同一毫秒内已有记录时，顺延到下一个未使用的整数
    pub fn next_id(&self, timestamp_ms: i64) -> String {
        let mut candidate = timestamp_ms;
        loop {
            let id = candidate.to_string();
            if !self.contains(&id) {
                return id;
            }
            candidate += 1;
        }
    }
}
