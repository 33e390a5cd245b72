use serde::{Serialize, Serializer};
use std::time::Duration;

/// 結果列表中的一張卡片
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSummary {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub category_icon: &'static str,
    pub level: String,
    pub level_badge: String,
    pub delivery: String,
    pub delivery_icon: &'static str,
    pub duration_label: String,
    pub description: String,
    pub course_type: String,
    pub bookmarked: bool,
}

/// 詳細頁中指向其他課程的連結
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRef {
    pub id: u32,
    pub name: String,
    pub code: Option<String>,
}

/// 單一課程的詳細頁
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDetail {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub category_icon: &'static str,
    pub level_badge: String,
    pub delivery: String,
    pub delivery_icon: &'static str,
    pub duration_label: String,
    pub course_type: String,
    pub description: String,
    /// `None` 時不顯示標籤區塊
    pub tags: Option<Vec<String>>,
    pub course_code: Option<String>,
    pub prerequisites: Vec<String>,
    pub leads_to: Vec<CourseRef>,
    pub related: Vec<CourseRef>,
    pub bookmarked: bool,
    pub bookmark_label: &'static str,
    pub share_label: &'static str,
}

/// 整個結果區：標題計數加上卡片
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    pub results_title: String,
    pub total_courses: usize,
    pub bookmarked_count: usize,
    pub courses: Vec<CourseSummary>,
}

impl CatalogView {
    /// 沒有結果時顯示「查無課程」
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

/// 篩選側欄的勾選清單
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub categories: Vec<FacetOption>,
    pub levels: Vec<FacetOption>,
    pub delivery: Vec<FacetOption>,
    pub durations: Vec<FacetOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// 分享後按鈕要顯示的狀態
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ShareFeedback {
    Shared,
    Copied {
        text: String,
        label: &'static str,
        reset_label: &'static str,
        #[serde(rename = "reset_after_ms", serialize_with = "as_millis")]
        reset_after: Duration,
    },
    Unavailable {
        message: String,
    },
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
