// 適配器層：資料來源、儲存與終端輸出的具體實作

pub mod document;
pub mod embedded;
pub mod file;
pub mod http;
pub mod json;
pub mod storage;
pub mod terminal;

use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::Result;
use document::DataFormat;

/// 依端點選擇主要資料來源：http(s) 走網路，其餘視為檔案路徑
pub fn build_source<C: ConfigProvider>(config: &C) -> Result<Box<dyn CatalogSource>> {
    let endpoint = config.endpoint();
    let format = config.data_format().map(DataFormat::from_name).transpose()?;

    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        let mut source = http::HttpCatalogSource::new(endpoint, config.request_timeout())?;
        if let Some(format) = format {
            source = source.with_format(format);
        }
        Ok(Box::new(source))
    } else {
        let mut source = file::FileCatalogSource::new(endpoint);
        if let Some(format) = format {
            source = source.with_format(format);
        }
        Ok(Box::new(source))
    }
}
