use crate::core::filter::FilteredView;
use crate::core::relations::{leads_to, related_courses};
use crate::domain::model::{BookmarkSet, Catalog, Category, Course, DeliveryMode, Level};
use crate::domain::presentation::{CatalogView, CourseDetail, CourseSummary};

pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_DETAILED_DESCRIPTION: &str = "No detailed description available.";
pub const BOOKMARKED_LABEL: &str = "✓ Bookmarked";
pub const BOOKMARK_LABEL: &str = "+ Bookmark This Course";
pub const SHARE_LABEL: &str = "Share Course";

/// 徽章加程度名稱，未知程度顯示原文
pub fn level_badge(level: &str) -> String {
    match Level::from_label(level) {
        Level::Unrated => level.to_string(),
        known => format!("{} {}", known.badge(), known.label()),
    }
}

pub fn duration_label(duration: &str) -> String {
    format!("⏱️ {}", duration)
}

/// 前 150 個字元加上省略號，沒有描述時顯示預設文字
pub fn description_preview(description: Option<&str>) -> String {
    match description {
        Some(text) if !text.is_empty() => {
            let preview: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
            format!("{}...", preview)
        }
        _ => NO_DESCRIPTION.to_string(),
    }
}

/// 把課程與書籤狀態轉成畫面資料
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewRenderer;

impl ViewRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, course: &Course, bookmarks: &BookmarkSet) -> CourseSummary {
        CourseSummary {
            id: course.id,
            name: course.name.clone(),
            category: course.category.clone(),
            category_icon: Category::from_label(&course.category).icon(),
            level: course.level.clone(),
            level_badge: level_badge(&course.level),
            delivery: course.delivery.clone(),
            delivery_icon: DeliveryMode::from_label(&course.delivery).icon(),
            duration_label: duration_label(&course.duration),
            description: description_preview(course.description.as_deref()),
            course_type: course.course_type.clone(),
            bookmarked: bookmarks.contains(course.id),
        }
    }

    pub fn render(
        &self,
        view: &FilteredView<'_>,
        total_courses: usize,
        bookmarks: &BookmarkSet,
    ) -> CatalogView {
        CatalogView {
            results_title: format!("{} Courses Found", view.len()),
            total_courses,
            bookmarked_count: bookmarks.len(),
            courses: view
                .iter()
                .map(|course| self.summarize(course, bookmarks))
                .collect(),
        }
    }

    /// 在完整目錄中查找 id，找不到回傳 `None`
    pub fn detail(&self, catalog: &Catalog, id: u32, bookmarks: &BookmarkSet) -> Option<CourseDetail> {
        let course = catalog.find(id)?;
        let bookmarked = bookmarks.contains(id);

        Some(CourseDetail {
            id: course.id,
            name: course.name.clone(),
            category: course.category.clone(),
            category_icon: Category::from_label(&course.category).icon(),
            level_badge: level_badge(&course.level),
            delivery: course.delivery.clone(),
            delivery_icon: DeliveryMode::from_label(&course.delivery).icon(),
            duration_label: duration_label(&course.duration),
            course_type: course.course_type.clone(),
            description: course
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| NO_DETAILED_DESCRIPTION.to_string()),
            tags: (!course.tags.is_empty()).then(|| course.tags.clone()),
            course_code: course.course_code.clone(),
            prerequisites: course.prerequisites.clone(),
            leads_to: leads_to(catalog, course),
            related: related_courses(catalog, course),
            bookmarked,
            bookmark_label: if bookmarked { BOOKMARKED_LABEL } else { BOOKMARK_LABEL },
            share_label: SHARE_LABEL,
        })
    }
}
