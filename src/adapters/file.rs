use crate::adapters::document::{parse_courses, DataFormat};
use crate::domain::model::Course;
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// 從本機檔案讀取資料文件
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
    format: DataFormat,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = DataFormat::from_path(&path);
        Self { path, format }
    }

    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = format;
        self
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<Vec<Course>> {
        tracing::debug!("Reading course document {}", self.path.display());
        let data = tokio::fs::read(&self.path).await?;
        parse_courses(&data, self.format)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
