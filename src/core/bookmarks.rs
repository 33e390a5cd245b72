use crate::domain::model::BookmarkSet;
use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;

pub const DEFAULT_BOOKMARK_KEY: &str = "redcross-bookmarks";

/// 與鍵值儲存同步的書籤 id
pub struct BookmarkStore<S: KeyValueStore> {
    storage: S,
    key: String,
    bookmarks: BookmarkSet,
}

impl<S: KeyValueStore> BookmarkStore<S> {
    /// 還原已儲存的書籤；讀不到或格式錯誤時回傳空集合
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let bookmarks = match storage.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<BookmarkSet>(&raw) {
                Ok(set) => {
                    tracing::debug!("Restored {} bookmarks from '{}'", set.len(), key);
                    set
                }
                Err(e) => {
                    tracing::warn!("Discarding malformed bookmarks under '{}': {}", key, e);
                    BookmarkSet::new()
                }
            },
            Ok(None) => BookmarkSet::new(),
            Err(e) => {
                tracing::warn!("Could not read bookmarks under '{}': {}", key, e);
                BookmarkSet::new()
            }
        };

        Self {
            storage,
            key,
            bookmarks,
        }
    }

    /// 切換 `id` 並在回傳前寫入儲存；寫入失敗時還原，記憶體與儲存保持一致
    pub fn toggle(&mut self, id: u32) -> Result<&BookmarkSet> {
        let now_bookmarked = self.bookmarks.toggle(id);
        if let Err(e) = self.persist() {
            self.bookmarks.toggle(id);
            return Err(e);
        }
        tracing::debug!(
            "Course {} {}",
            id,
            if now_bookmarked { "bookmarked" } else { "unbookmarked" }
        );
        Ok(&self.bookmarks)
    }

    fn persist(&mut self) -> Result<()> {
        let encoded = serde_json::to_string(&self.bookmarks)?;
        self.storage.set(&self.key, &encoded)
    }

    pub fn bookmarks(&self) -> &BookmarkSet {
        &self.bookmarks
    }

    pub fn contains(&self, id: u32) -> bool {
        self.bookmarks.contains(id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
