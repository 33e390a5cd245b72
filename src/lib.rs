pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::CatalogConfig;

pub use crate::adapters::embedded::embedded_courses;
pub use crate::adapters::storage::{FileKeyValueStore, MemoryStore};
pub use crate::core::{
    bookmarks::BookmarkStore, filter::FilterEngine, loader::CatalogLoader, session::Session,
    share::Sharer, view::ViewRenderer,
};
pub use crate::domain::ports::UiEvent;
pub use crate::utils::error::{CatalogError, Result};
