//! 点评会话测试
//!
//! 用假的分析器驱动提交流程，确认状态迁移与历史记录的变化

use chef_mentor::analyzer::{ImageData, RecipeAnalyzer, RecipeInput};
use chef_mentor::error::{ChefMentorError, Result};
use chef_mentor::kv::{FileKvStore, KvStore, MemoryKvStore};
use chef_mentor::session::{Session, FRIENDLY_ERROR_MESSAGE, SAVE_ERROR_MESSAGE};
use chef_mentor::store::HistoryStore;
use chef_mentor_common::{AnalysisStatus, Category, RecipeFeedback};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::tempdir;

/// 返回固定结果的分析器
struct FakeAnalyzer {
    feedback: Option<RecipeFeedback>,
    calls: AtomicUsize,
    last_input: Mutex<Option<RecipeInput>>,
}

impl FakeAnalyzer {
    fn ok(feedback: RecipeFeedback) -> Self {
        Self {
            feedback: Some(feedback),
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    fn failing() -> Self {
        Self {
            feedback: None,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RecipeAnalyzer for FakeAnalyzer {
    async fn analyze(&self, input: &RecipeInput) -> Result<RecipeFeedback> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(input.clone());
        self.feedback
            .clone()
            .ok_or_else(|| ChefMentorError::ApiCall("503 Service Unavailable".to_string()))
    }
}

fn sea_bass() -> RecipeFeedback {
    RecipeFeedback {
        recipe_name: "清蒸鲈鱼".to_string(),
        precautions: vec!["**蒸锅水开后**再放鱼".to_string()],
        texture_secrets: vec!["鱼肉用筷子一戳能轻松穿透即为熟透".to_string()],
        flavor_enhancements: vec!["淋一勺蒸鱼豉油".to_string()],
        plating_techniques: vec!["用白色长盘摆放".to_string()],
        encouragement: "你已经做得很棒了！".to_string(),
    }
}

/// 读得出、写不进的存储
struct ReadOnlyKvStore;

impl KvStore for ReadOnlyKvStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(ChefMentorError::Storage("disk full".to_string()))
    }

    fn remove(&mut self, _key: &str) -> Result<bool> {
        Ok(false)
    }
}

fn memory_session() -> Session<MemoryKvStore> {
    Session::new(HistoryStore::load(MemoryKvStore::new()))
}

/// 文字提交成功：新记录排在最前并成为当前显示
#[tokio::test]
async fn test_submit_text_creates_record() {
    let mut session = memory_session();
    let analyzer = FakeAnalyzer::ok(sea_bass());

    let record = session
        .submit(&analyzer, "清蒸鲈鱼", None, 1_700_000_000_000)
        .await
        .expect("提交失败")
        .expect("应该生成记录")
        .clone();

    assert_eq!(record.id, "1700000000000");
    assert_eq!(record.timestamp, 1_700_000_000_000);
    assert_eq!(record.category, Category::Uncategorized);
    assert_eq!(record.user_input_text, "清蒸鲈鱼");
    assert!(record.user_input_image.is_none());
    assert_eq!(record.feedback, sea_bass());

    assert_eq!(session.status(), AnalysisStatus::Success);
    assert_eq!(session.current().map(|r| r.id.as_str()), Some("1700000000000"));
    assert_eq!(session.store().len(), 1);
    assert_eq!(analyzer.calls(), 1);
}

/// 后提交的记录排在前面
#[tokio::test]
async fn test_submit_prepends() {
    let mut session = memory_session();
    let analyzer = FakeAnalyzer::ok(sea_bass());

    session.submit(&analyzer, "第一道", None, 1000).await.unwrap();
    session.submit(&analyzer, "第二道", None, 2000).await.unwrap();

    let texts: Vec<&str> = session
        .store()
        .records()
        .iter()
        .map(|r| r.user_input_text.as_str())
        .collect();
    assert_eq!(texts, vec!["第二道", "第一道"]);
    assert_eq!(session.current().unwrap().user_input_text, "第二道");
}

/// 同一毫秒内提交两次，ID 不重复
#[tokio::test]
async fn test_submit_same_millisecond_unique_ids() {
    let mut session = memory_session();
    let analyzer = FakeAnalyzer::ok(sea_bass());

    session.submit(&analyzer, "a", None, 5000).await.unwrap();
    session.submit(&analyzer, "b", None, 5000).await.unwrap();

    let ids: Vec<&str> = session.store().records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["5001", "5000"]);
}

/// 图片提交：保存为 data URL
#[tokio::test]
async fn test_submit_image_only() {
    let mut session = memory_session();
    let analyzer = FakeAnalyzer::ok(sea_bass());
    let image = ImageData::jpeg(&[0xff, 0xd8, 0xff, 0xe0]);

    let record = session
        .submit(&analyzer, "", Some(image.clone()), 42)
        .await
        .unwrap()
        .unwrap()
        .clone();

    assert_eq!(record.user_input_text, "");
    assert_eq!(record.user_input_image, Some(image.to_data_url()));

    let sent = analyzer.last_input.lock().unwrap().clone().unwrap();
    assert_eq!(sent.image, Some(image));
}

/// 文字和图片都没有：不调用、不建记录
#[tokio::test]
async fn test_submit_empty_input_makes_no_call() {
    let mut session = memory_session();
    let analyzer = FakeAnalyzer::ok(sea_bass());

    let result = session.submit(&analyzer, "", None, 1).await.unwrap();
    assert!(result.is_none());

    assert_eq!(analyzer.calls(), 0);
    assert!(session.store().is_empty());
    assert_eq!(session.status(), AnalysisStatus::Idle);
}

/// 只有空白的文字也会提交
#[tokio::test]
async fn test_submit_whitespace_text() {
    let mut session = memory_session();
    let analyzer = FakeAnalyzer::ok(sea_bass());

    let record = session.submit(&analyzer, "   ", None, 2).await.unwrap().cloned();

    assert_eq!(analyzer.calls(), 1);
    assert_eq!(record.map(|r| r.user_input_text), Some("   ".to_string()));
    assert_eq!(session.status(), AnalysisStatus::Success);
}

/// 远程失败：状态 Error、固定提示、历史不变
#[tokio::test]
async fn test_submit_service_error() {
    let mut session = memory_session();
    let ok = FakeAnalyzer::ok(sea_bass());
    session.submit(&ok, "先成功一次", None, 1000).await.unwrap();
    let before = session.store().records().to_vec();

    let failing = FakeAnalyzer::failing();
    let result = session.submit(&failing, "清蒸鲈鱼", None, 2000).await.unwrap();

    assert!(result.is_none());
    assert_eq!(failing.calls(), 1);
    assert_eq!(session.status(), AnalysisStatus::Error);
    assert_eq!(session.error_message(), Some(FRIENDLY_ERROR_MESSAGE));
    assert_eq!(session.store().records(), before.as_slice());
}

/// 出错后重新提交成功，错误提示消失
#[tokio::test]
async fn test_retry_after_error_clears_message() {
    let mut session = memory_session();
    session
        .submit(&FakeAnalyzer::failing(), "红烧肉", None, 1)
        .await
        .unwrap();
    assert_eq!(session.status(), AnalysisStatus::Error);

    session
        .submit(&FakeAnalyzer::ok(sea_bass()), "红烧肉", None, 2)
        .await
        .unwrap();
    assert_eq!(session.status(), AnalysisStatus::Success);
    assert!(session.error_message().is_none());
}

/// reset 从任何状态都回到 Idle
#[tokio::test]
async fn test_reset_returns_to_idle() {
    let mut session = memory_session();
    session
        .submit(&FakeAnalyzer::ok(sea_bass()), "清蒸鲈鱼", None, 1)
        .await
        .unwrap();

    session.reset();
    assert_eq!(session.status(), AnalysisStatus::Idle);
    assert!(session.current().is_none());
    assert_eq!(session.store().len(), 1);

    session
        .submit(&FakeAnalyzer::failing(), "清蒸鲈鱼", None, 2)
        .await
        .unwrap();
    session.reset();
    assert_eq!(session.status(), AnalysisStatus::Idle);
    assert!(session.error_message().is_none());
}

/// 删除正在显示的记录后回到 Idle
#[tokio::test]
async fn test_remove_current_record() {
    let mut session = memory_session();
    let analyzer = FakeAnalyzer::ok(sea_bass());
    session.submit(&analyzer, "a", None, 1).await.unwrap();
    session.submit(&analyzer, "b", None, 2).await.unwrap();

    assert!(session.show("1").is_some());
    session.remove("2").unwrap();
    assert_eq!(session.current().map(|r| r.id.as_str()), Some("1"));

    session.remove("1").unwrap();
    assert!(session.current().is_none());
    assert_eq!(session.status(), AnalysisStatus::Idle);
}

/// 修改分类只影响分类字段
#[tokio::test]
async fn test_update_category_through_session() {
    let mut session = memory_session();
    session
        .submit(&FakeAnalyzer::ok(sea_bass()), "清蒸鲈鱼", None, 1)
        .await
        .unwrap();
    let before = session.current().unwrap().clone();

    assert!(session.update_category("1", Category::Showpiece).unwrap());

    let after = session.current().unwrap();
    assert_eq!(after.category, Category::Showpiece);
    assert_eq!(after.feedback, before.feedback);
    assert_eq!(after.user_input_text, before.user_input_text);
    assert_eq!(after.timestamp, before.timestamp);
}

/// 提交结果写入文件，重启后还在
#[tokio::test]
async fn test_submit_persists_to_file() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut session = Session::new(HistoryStore::load(FileKvStore::new(dir.path())));
    session
        .submit(&FakeAnalyzer::ok(sea_bass()), "清蒸鲈鱼", None, 1_700_000_000_000)
        .await
        .unwrap();

    let reloaded = HistoryStore::load(FileKvStore::new(dir.path()));
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.records()[0].feedback.recipe_name, "清蒸鲈鱼");
}

/// 保存失败：状态转为 Error，列表不变，之后还能再提交
#[tokio::test]
async fn test_submit_save_failure_resolves_to_error() {
    let mut session = Session::new(HistoryStore::load(ReadOnlyKvStore));
    let analyzer = FakeAnalyzer::ok(sea_bass());

    let result = session.submit(&analyzer, "清蒸鲈鱼", None, 1).await;
    assert!(matches!(result, Err(ChefMentorError::Storage(_))));

    assert_eq!(analyzer.calls(), 1);
    assert_eq!(session.status(), AnalysisStatus::Error);
    assert_eq!(session.error_message(), Some(SAVE_ERROR_MESSAGE));
    assert!(session.store().is_empty());
    assert!(session.current().is_none());
    assert!(session.can_submit("清蒸鲈鱼", None));
}
