use crate::domain::model::{Course, Facet, QuickFilter, SortKey};
use crate::domain::presentation::{
    CatalogView, CourseDetail, FacetOptions, SharePayload, ShareFeedback,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 課程資料的來源
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Course>>;

    /// 來源描述，用於日誌
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Box<T> {
    async fn fetch(&self) -> Result<Vec<Course>> {
        (**self).fetch().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// 字串鍵值的持久儲存，寫入是同步的
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

pub trait ConfigProvider {
    fn endpoint(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    /// 指定的文件格式，`None` 表示自動偵測
    fn data_format(&self) -> Option<&str>;
    fn bookmark_path(&self) -> &str;
    fn storage_key(&self) -> &str;
}

/// 畫面輸出，格式化由實作負責
pub trait Presenter {
    fn show_loading(&mut self);
    fn render_facets(&mut self, options: &FacetOptions);
    fn render_view(&mut self, view: &CatalogView);
    /// 只更新單一卡片的書籤標記，不重繪列表
    fn update_bookmark(&mut self, id: u32, bookmarked: bool, bookmarked_count: usize);
    fn show_detail(&mut self, detail: &CourseDetail);
    fn close_detail(&mut self);
    fn show_share_feedback(&mut self, feedback: &ShareFeedback);
}

/// 平台分享面板，回傳 `Err` 表示無法使用
pub trait ShareTarget {
    fn share(&mut self, payload: &SharePayload) -> Result<()>;
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// 畫面層傳回的使用者操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    QueryChanged(String),
    FacetChanged {
        facet: Facet,
        value: String,
        checked: bool,
    },
    SortChanged(Option<SortKey>),
    QuickFilterClicked(QuickFilter),
    ClearFiltersClicked,
    BookmarkClicked(u32),
    DetailRequested(u32),
    ShareRequested(String),
    ModalCloseRequested,
}
