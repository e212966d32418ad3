//! 点评会话
//!
//! 持有历史记录和界面状态（Idle → Loading → Success | Error）。
//! 当前显示的记录只存 ID，每次从 store 里查。

use crate::analyzer::{ImageData, RecipeAnalyzer, RecipeInput};
use crate::error::Result;
use crate::kv::KvStore;
use crate::store::HistoryStore;
use chef_mentor_common::{AnalysisStatus, Category, HistoryRecord};

/// 远程调用失败时给用户看的固定提示
pub const FRIENDLY_ERROR_MESSAGE: &str = "老师忙不过来了，请稍后再试试吧~";

/// 点评成功但写入历史失败时的提示
pub const SAVE_ERROR_MESSAGE: &str = "点评已完成，但保存历史记录失败了";

pub struct Session<S: KvStore> {
    store: HistoryStore<S>,
    status: AnalysisStatus,
    current_id: Option<String>,
    error: Option<&'static str>,
}

impl<S: KvStore> Session<S> {
    pub fn new(store: HistoryStore<S>) -> Self {
        Self {
            store,
            status: AnalysisStatus::Idle,
            current_id: None,
            error: None,
        }
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error
    }

    pub fn store(&self) -> &HistoryStore<S> {
        &self.store
    }

    /// 当前显示的记录
    pub fn current(&self) -> Option<&HistoryRecord> {
        self.current_id.as_deref().and_then(|id| self.store.get(id))
    }

    pub fn can_submit(&self, text: &str, image: Option<&ImageData>) -> bool {
        self.status != AnalysisStatus::Loading && RecipeInput::is_submittable(text, image.is_some())
    }

    /// 提交点评
    ///
    /// 不满足提交条件时直接返回 `Ok(None)`，不发请求也不建记录。
    /// 远程失败不作为 Err 返回：状态转为 Error 并设置固定提示。
    /// 只有保存历史失败才返回 Err，此时状态同样转为 Error，记录不留在列表里。
    pub async fn submit<A: RecipeAnalyzer>(
        &mut self,
        analyzer: &A,
        text: &str,
        image: Option<ImageData>,
        timestamp_ms: i64,
    ) -> Result<Option<&HistoryRecord>> {
        if !self.can_submit(text, image.as_ref()) {
            tracing::debug!("submission skipped: nothing to analyze");
            return Ok(None);
        }
        let input = RecipeInput::new(text, image)?;

        self.status = AnalysisStatus::Loading;
        self.error = None;

        let feedback = match analyzer.analyze(&input).await {
            Ok(feedback) => feedback,
            Err(e) => {
                tracing::error!("analysis failed: {}", e);
                self.status = AnalysisStatus::Error;
                self.error = Some(FRIENDLY_ERROR_MESSAGE);
                return Ok(None);
            }
        };

        let id = self.store.next_id(timestamp_ms);
        let record = HistoryRecord::new(
            id.clone(),
            timestamp_ms,
            input.text,
            input.image.map(|img| img.to_data_url()),
            feedback,
        );
        if let Err(e) = self.store.append(record) {
            tracing::error!("failed to save record {}: {}", id, e);
            self.status = AnalysisStatus::Error;
            self.error = Some(SAVE_ERROR_MESSAGE);
            return Err(e);
        }

        self.current_id = Some(id);
        self.status = AnalysisStatus::Success;
        Ok(self.current())
    }

    /// 显示一条已有记录
    pub fn show(&mut self, id: &str) -> Option<&HistoryRecord> {
        if self.store.get(id).is_none() {
            return None;
        }
        self.current_id = Some(id.to_string());
        self.status = AnalysisStatus::Success;
        self.error = None;
        self.current()
    }

    /// 重新开始（回到 Idle）
    pub fn reset(&mut self) {
        self.status = AnalysisStatus::Idle;
        self.current_id = None;
        self.error = None;
    }

    pub fn update_category(&mut self, id: &str, category: Category) -> Result<bool> {
        self.store.update_category(id, category)
    }

    /// 删除记录；删的是正在显示的那条时回到 Idle
    pub fn remove(&mut self, id: &str) -> Result<Option<HistoryRecord>> {
        let removed = self.store.remove(id)?;
        if removed.is_some() && self.current_id.as_deref() == Some(id) {
            self.reset();
        }
        Ok(removed)
    }

    pub fn into_store(self) -> HistoryStore<S> {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new(HistoryStore::load(MemoryKvStore::new()));
        assert_eq!(session.status(), AnalysisStatus::Idle);
        assert!(session.current().is_none());
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_can_submit() {
        let session = Session::new(HistoryStore::load(MemoryKvStore::new()));
        assert!(!session.can_submit("", None));
        assert!(session.can_submit("   ", None));
        assert!(session.can_submit("红烧肉", None));
        assert!(session.can_submit("", Some(&ImageData::jpeg(&[0]))));
    }

    #[test]
    fn test_show_missing_record() {
        let mut session = Session::new(HistoryStore::load(MemoryKvStore::new()));
        assert!(session.show("404").is_none());
        assert_eq!(session.status(), AnalysisStatus::Idle);
    }
}
