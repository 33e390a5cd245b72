pub mod bookmarks;
pub mod filter;
pub mod loader;
pub mod relations;
pub mod session;
pub mod share;
pub mod view;

pub use crate::domain::model::{BookmarkSet, Catalog, Course, FilterState};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, KeyValueStore, Presenter};
pub use crate::utils::error::Result;
