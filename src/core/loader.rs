use crate::domain::model::{Catalog, Course};
use crate::domain::ports::CatalogSource;

/// 從主要來源載入目錄，任何失敗都改用固定的後備資料
pub struct CatalogLoader<S: CatalogSource> {
    primary: S,
    fallback: Vec<Course>,
}

impl<S: CatalogSource> CatalogLoader<S> {
    pub fn new(primary: S) -> Self {
        Self {
            primary,
            fallback: Vec::new(),
        }
    }

    pub fn with_fallback(mut self, fallback: Vec<Course>) -> Self {
        self.fallback = fallback;
        self
    }

    /// 不會失敗，空目錄也是合法結果
    pub async fn load(&self) -> Catalog {
        match self.primary.fetch().await {
            Ok(courses) => {
                tracing::info!(
                    "Loaded {} courses from {}",
                    courses.len(),
                    self.primary.describe()
                );
                Catalog::new(courses)
            }
            Err(e) => {
                tracing::warn!(
                    "Could not load courses from {}: {}. Using embedded data ({} courses)",
                    self.primary.describe(),
                    e,
                    self.fallback.len()
                );
                Catalog::new(self.fallback.clone())
            }
        }
    }
}
