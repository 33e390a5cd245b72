use crate::adapters::document::{parse_courses, DataFormat};
use crate::domain::model::Course;
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 編譯進程式的課程清單，主要來源失敗時使用
pub const EMBEDDED_COURSES: &str = include_str!("../../data/courses.json");

pub fn embedded_courses() -> Vec<Course> {
    match parse_courses(EMBEDDED_COURSES.as_bytes(), DataFormat::Json) {
        Ok(courses) => courses,
        Err(e) => {
            tracing::warn!("Embedded course data is unreadable, using an empty catalog: {}", e);
            Vec::new()
        }
    }
}

/// 固定的記憶體內課程集合
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    courses: Vec<Course>,
}

impl StaticCatalogSource {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> Result<Vec<Course>> {
        Ok(self.courses.clone())
    }

    fn describe(&self) -> String {
        format!("embedded ({} courses)", self.courses.len())
    }
}
