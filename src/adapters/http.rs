use crate::adapters::document::{parse_courses, DataFormat};
use crate::domain::model::Course;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// 透過 HTTP(S) 取得資料文件，只發一次請求，不重試
pub struct HttpCatalogSource {
    client: Client,
    endpoint: String,
    format: Option<DataFormat>,
}

impl HttpCatalogSource {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
            format: None,
        })
    }

    /// 強制使用指定格式，不看回應的 Content-Type
    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = Some(format);
        self
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<Course>> {
        tracing::debug!("Making request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;
        tracing::debug!("Response status: {}", response.status());

        if !response.status().is_success() {
            return Err(CatalogError::SourceError {
                message: format!("{} returned {}", self.endpoint, response.status()),
            });
        }

        let format = self.format.unwrap_or_else(|| {
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .and_then(DataFormat::from_content_type)
                .or_else(|| {
                    Url::parse(&self.endpoint)
                        .ok()
                        .map(|url| DataFormat::from_path(Path::new(url.path())))
                })
                .unwrap_or_default()
        });

        let body = response.bytes().await?;
        parse_courses(&body, format)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}
