use crate::core::bookmarks::BookmarkStore;
use crate::core::filter::FilterEngine;
use crate::core::loader::CatalogLoader;
use crate::core::share::Sharer;
use crate::core::view::ViewRenderer;
use crate::domain::model::{BookmarkSet, Catalog, FilterState};
use crate::domain::ports::{CatalogSource, KeyValueStore, Presenter, UiEvent};
use crate::domain::presentation::CatalogView;

/// 一次瀏覽的所有狀態，由畫面事件驅動
pub struct Session<S: KeyValueStore, P: Presenter> {
    catalog: Catalog,
    filters: FilterState,
    bookmarks: BookmarkStore<S>,
    visible: Vec<u32>,
    open_detail: Option<u32>,
    engine: FilterEngine,
    renderer: ViewRenderer,
    sharer: Sharer,
    presenter: P,
}

impl<S: KeyValueStore, P: Presenter> Session<S, P> {
    /// 載入目錄與書籤，只顯示載入中狀態
    pub async fn open<C: CatalogSource>(
        loader: &CatalogLoader<C>,
        bookmarks: BookmarkStore<S>,
        mut presenter: P,
        sharer: Sharer,
    ) -> Self {
        presenter.show_loading();
        let catalog = loader.load().await;
        let visible = catalog.iter().map(|c| c.id).collect();

        Self {
            catalog,
            filters: FilterState::default(),
            bookmarks,
            visible,
            open_detail: None,
            engine: FilterEngine::new(),
            renderer: ViewRenderer::new(),
            sharer,
            presenter,
        }
    }

    /// 載入後顯示篩選選項與完整課程列表
    pub async fn start<C: CatalogSource>(
        loader: &CatalogLoader<C>,
        bookmarks: BookmarkStore<S>,
        presenter: P,
        sharer: Sharer,
    ) -> Self {
        let mut session = Self::open(loader, bookmarks, presenter, sharer).await;
        session.render_facets();
        session.refresh();
        session
    }

    pub fn handle(&mut self, event: UiEvent) {
        tracing::debug!("Handling {:?}", event);
        match event {
            UiEvent::QueryChanged(query) => {
                self.filters.query = query;
                self.refresh();
            }
            UiEvent::FacetChanged {
                facet,
                value,
                checked,
            } => {
                if self.filters.set_facet(facet, &value, checked) {
                    self.refresh();
                } else {
                    tracing::warn!("Ignoring invalid {} value '{}'", facet, value);
                }
            }
            UiEvent::SortChanged(sort) => {
                self.filters.sort = sort;
                self.refresh();
            }
            UiEvent::QuickFilterClicked(quick) => {
                self.filters.apply_quick_filter(quick);
                self.refresh();
            }
            UiEvent::ClearFiltersClicked => {
                self.filters.reset();
                self.refresh();
            }
            UiEvent::BookmarkClicked(id) => self.on_bookmark_toggle(id),
            UiEvent::DetailRequested(id) => self.on_select_detail(id),
            UiEvent::ShareRequested(name) => {
                let feedback = self.sharer.share(&name);
                self.presenter.show_share_feedback(&feedback);
            }
            UiEvent::ModalCloseRequested => {
                self.open_detail = None;
                self.presenter.close_detail();
            }
        }
    }

    /// 整個替換篩選狀態，只重繪一次
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.refresh();
    }

    /// 重新計算篩選結果並交給 presenter
    pub fn refresh(&mut self) {
        let view = self.engine.apply(&self.catalog, &self.filters);
        self.visible = view.iter().map(|c| c.id).collect();
        let rendered = self
            .renderer
            .render(&view, self.catalog.len(), self.bookmarks.bookmarks());
        self.presenter.render_view(&rendered);
    }

    pub fn render_facets(&mut self) {
        let options = self.engine.facet_options(&self.catalog);
        self.presenter.render_facets(&options);
    }

    /// 切換書籤；詳細頁開啟時重繪詳細頁與列表，否則只更新卡片標記
    pub fn on_bookmark_toggle(&mut self, id: u32) {
        let bookmarked = match self.bookmarks.toggle(id) {
            Ok(set) => set.contains(id),
            Err(e) => {
                tracing::error!("Bookmark for course {} not saved: {}", id, e);
                return;
            }
        };

        if self.open_detail == Some(id) {
            if let Some(detail) =
                self.renderer
                    .detail(&self.catalog, id, self.bookmarks.bookmarks())
            {
                self.presenter.show_detail(&detail);
            }
            self.refresh();
        } else {
            self.presenter
                .update_bookmark(id, bookmarked, self.bookmarks.bookmarks().len());
        }
    }

    /// 開啟 `id` 的詳細頁，未知的 id 忽略
    pub fn on_select_detail(&mut self, id: u32) {
        match self
            .renderer
            .detail(&self.catalog, id, self.bookmarks.bookmarks())
        {
            Some(detail) => {
                self.open_detail = Some(id);
                self.presenter.show_detail(&detail);
            }
            None => tracing::debug!("No course with id {}", id),
        }
    }

    /// 已加書籤的課程，依目錄順序，不受篩選影響
    pub fn bookmarked_view(&self) -> CatalogView {
        let bookmarks = self.bookmarks.bookmarks();
        let view: Vec<_> = self
            .catalog
            .iter()
            .filter(|c| bookmarks.contains(c.id))
            .collect();
        self.renderer.render(&view, self.catalog.len(), bookmarks)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn bookmarks(&self) -> &BookmarkSet {
        self.bookmarks.bookmarks()
    }

    pub fn bookmark_store(&self) -> &BookmarkStore<S> {
        &self.bookmarks
    }

    /// 目前顯示課程的 id，依顯示順序
    pub fn visible_ids(&self) -> &[u32] {
        &self.visible
    }

    pub fn open_detail(&self) -> Option<u32> {
        self.open_detail
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}
