use course_catalog::adapters::embedded::StaticCatalogSource;
use course_catalog::adapters::terminal::MemoryClipboard;
use course_catalog::core::share::ShareSettings;
use course_catalog::domain::model::{Course, Facet, FilterState, QuickFilter, SortKey};
use course_catalog::domain::ports::{KeyValueStore, Presenter};
use course_catalog::domain::presentation::{
    CatalogView, CourseDetail, FacetOptions, ShareFeedback,
};
use course_catalog::{BookmarkStore, CatalogLoader, MemoryStore, Session, Sharer, UiEvent};

/// 記錄 session 要求顯示的所有內容
#[derive(Default)]
struct RecordingPresenter {
    loading_shown: bool,
    facets: Vec<FacetOptions>,
    views: Vec<CatalogView>,
    bookmark_updates: Vec<(u32, bool, usize)>,
    details: Vec<CourseDetail>,
    closed: usize,
    share_feedback: Vec<ShareFeedback>,
}

impl RecordingPresenter {
    fn last_view(&self) -> &CatalogView {
        self.views.last().expect("no view rendered")
    }

    fn last_names(&self) -> Vec<String> {
        self.last_view().courses.iter().map(|c| c.name.clone()).collect()
    }
}

impl Presenter for RecordingPresenter {
    fn show_loading(&mut self) {
        self.loading_shown = true;
    }

    fn render_facets(&mut self, options: &FacetOptions) {
        self.facets.push(options.clone());
    }

    fn render_view(&mut self, view: &CatalogView) {
        self.views.push(view.clone());
    }

    fn update_bookmark(&mut self, id: u32, bookmarked: bool, bookmarked_count: usize) {
        self.bookmark_updates.push((id, bookmarked, bookmarked_count));
    }

    fn show_detail(&mut self, detail: &CourseDetail) {
        self.details.push(detail.clone());
    }

    fn close_detail(&mut self) {
        self.closed += 1;
    }

    fn show_share_feedback(&mut self, feedback: &ShareFeedback) {
        self.share_feedback.push(feedback.clone());
    }
}

fn course(id: u32, name: &str, category: &str, level: &str, delivery: &str, duration: &str) -> Course {
    Course {
        category: category.to_string(),
        level: level.to_string(),
        delivery: delivery.to_string(),
        duration: duration.to_string(),
        course_type: "Instructor-Led".to_string(),
        ..Course::new(id, name)
    }
}

fn courses() -> Vec<Course> {
    let mut feeding = course(1, "Feeding Fundamentals", "Disaster Services", "Beginner", "Virtual", "3 hours");
    feeding.course_code = Some("DSMC 14001".to_string());
    let mut mobile = course(2, "Mobile Feeding Operations", "Disaster Services", "Intermediate", "In-Person", "6 hours");
    mobile.course_code = Some("DSMC 24002".to_string());
    mobile.prerequisites = vec!["Feeding Fundamentals".to_string()];
    let accessible = course(3, "Creating Accessible Documents", "Accessibility", "Beginner", "Self-Study", "1 hour");
    let instructor = course(4, "Basic Instructor Fundamentals", "Leadership", "Advanced", "Blended", "16 hours");
    vec![feeding, mobile, accessible, instructor]
}

async fn session_with(store: MemoryStore) -> Session<MemoryStore, RecordingPresenter> {
    let loader = CatalogLoader::new(StaticCatalogSource::new(courses()));
    let bookmarks = BookmarkStore::load(store, "redcross-bookmarks");
    let sharer = Sharer::new(ShareSettings::default(), MemoryClipboard::new());
    Session::start(&loader, bookmarks, RecordingPresenter::default(), sharer).await
}

#[tokio::test]
async fn test_start_renders_loading_facets_and_full_list() {
    let session = session_with(MemoryStore::new()).await;
    let presenter = session.presenter();

    assert!(presenter.loading_shown);
    assert_eq!(presenter.facets.len(), 1);
    assert_eq!(presenter.views.len(), 1);
    assert_eq!(presenter.last_view().results_title, "4 Courses Found");
    assert_eq!(presenter.last_view().total_courses, 4);
    assert_eq!(session.visible_ids(), &[1, 2, 3, 4]);
}

#[tokio::test]
async fn test_query_facets_and_sort_events() {
    let mut session = session_with(MemoryStore::new()).await;

    session.handle(UiEvent::QueryChanged("FUNDAMENTALS".to_string()));
    assert_eq!(session.visible_ids(), &[1, 4]);

    session.handle(UiEvent::FacetChanged {
        facet: Facet::Level,
        value: "Advanced".to_string(),
        checked: true,
    });
    assert_eq!(session.visible_ids(), &[4]);

    session.handle(UiEvent::ClearFiltersClicked);
    assert_eq!(session.visible_ids(), &[1, 2, 3, 4]);

    session.handle(UiEvent::SortChanged(Some(SortKey::Name)));
    assert_eq!(
        session.presenter().last_names(),
        vec![
            "Basic Instructor Fundamentals",
            "Creating Accessible Documents",
            "Feeding Fundamentals",
            "Mobile Feeding Operations"
        ]
    );

    session.handle(UiEvent::FacetChanged {
        facet: Facet::Duration,
        value: "16".to_string(),
        checked: true,
    });
    assert_eq!(session.visible_ids(), &[4]);
}

#[tokio::test]
async fn test_invalid_duration_value_is_ignored() {
    let mut session = session_with(MemoryStore::new()).await;
    let rendered = session.presenter().views.len();

    session.handle(UiEvent::FacetChanged {
        facet: Facet::Duration,
        value: "forever".to_string(),
        checked: true,
    });

    assert_eq!(session.presenter().views.len(), rendered);
    assert!(session.filters().durations.is_empty());
}

#[tokio::test]
async fn test_disaster_quick_filter_clears_query() {
    let mut session = session_with(MemoryStore::new()).await;
    session.handle(UiEvent::QueryChanged("documents".to_string()));
    assert_eq!(session.visible_ids(), &[3]);

    session.handle(UiEvent::QuickFilterClicked(QuickFilter::Disaster));

    assert!(session.filters().query.is_empty());
    assert_eq!(session.visible_ids(), &[1, 2]);
    assert!(session
        .presenter()
        .last_view()
        .courses
        .iter()
        .all(|c| c.category == "Disaster Services"));
}

#[tokio::test]
async fn test_quick_filter_on_missing_category_yields_empty_view() {
    let loader = CatalogLoader::new(StaticCatalogSource::new(vec![course(
        1, "Feeding Fundamentals", "Disaster Services", "Beginner", "Virtual", "3 hours",
    )]));
    let bookmarks = BookmarkStore::load(MemoryStore::new(), "redcross-bookmarks");
    let sharer = Sharer::new(ShareSettings::default(), MemoryClipboard::new());
    let mut session = Session::start(&loader, bookmarks, RecordingPresenter::default(), sharer).await;

    session.handle(UiEvent::QuickFilterClicked(QuickFilter::Accessibility));
    assert!(session.presenter().last_view().is_empty());
    assert_eq!(session.presenter().last_view().results_title, "0 Courses Found");
}

#[tokio::test]
async fn test_bookmark_from_list_updates_single_item() {
    let mut session = session_with(MemoryStore::new()).await;
    let rendered = session.presenter().views.len();

    session.handle(UiEvent::BookmarkClicked(3));
    session.handle(UiEvent::BookmarkClicked(1));
    session.handle(UiEvent::BookmarkClicked(3));

    let presenter = session.presenter();
    assert_eq!(presenter.views.len(), rendered);
    assert_eq!(
        presenter.bookmark_updates,
        vec![(3, true, 1), (1, true, 2), (3, false, 1)]
    );
    assert_eq!(
        session
            .bookmark_store()
            .storage()
            .get("redcross-bookmarks")
            .unwrap()
            .as_deref(),
        Some("[1]")
    );
}

#[tokio::test]
async fn test_bookmark_from_detail_rerenders_overlay_and_list() {
    let mut session = session_with(MemoryStore::new()).await;
    session.handle(UiEvent::DetailRequested(2));
    let rendered = session.presenter().views.len();

    session.handle(UiEvent::BookmarkClicked(2));

    let presenter = session.presenter();
    assert_eq!(presenter.details.len(), 2);
    assert!(presenter.details[1].bookmarked);
    assert_eq!(presenter.details[1].bookmark_label, "✓ Bookmarked");
    assert_eq!(presenter.views.len(), rendered + 1);
    assert!(presenter.last_view().courses[1].bookmarked);
    assert!(presenter.bookmark_updates.is_empty());
}

#[tokio::test]
async fn test_detail_uses_full_catalog_and_ignores_unknown_ids() {
    let mut session = session_with(MemoryStore::new()).await;
    session.handle(UiEvent::QuickFilterClicked(QuickFilter::Virtual));
    assert_eq!(session.visible_ids(), &[1]);

    // 不在篩選結果中也能開啟
    session.handle(UiEvent::DetailRequested(2));
    let detail = session.presenter().details.last().unwrap().clone();
    assert_eq!(detail.name, "Mobile Feeding Operations");
    assert_eq!(detail.prerequisites, vec!["Feeding Fundamentals"]);
    assert_eq!(detail.related.len(), 1);
    assert_eq!(detail.related[0].id, 1);
    assert_eq!(session.open_detail(), Some(2));

    session.handle(UiEvent::DetailRequested(404));
    assert_eq!(session.presenter().details.len(), 1);
    assert_eq!(session.open_detail(), Some(2));

    session.handle(UiEvent::ModalCloseRequested);
    assert_eq!(session.open_detail(), None);
    assert_eq!(session.presenter().closed, 1);
}

#[tokio::test]
async fn test_feeding_fundamentals_leads_to_mobile_feeding() {
    let mut session = session_with(MemoryStore::new()).await;
    session.handle(UiEvent::DetailRequested(1));

    let detail = session.presenter().details.last().unwrap();
    assert_eq!(detail.leads_to.len(), 1);
    assert_eq!(detail.leads_to[0].name, "Mobile Feeding Operations");
    assert_eq!(detail.leads_to[0].code.as_deref(), Some("DSMC 24002"));
}

#[tokio::test]
async fn test_share_without_native_copies_to_clipboard() {
    let mut session = session_with(MemoryStore::new()).await;
    session.handle(UiEvent::ShareRequested("Feeding Fundamentals".to_string()));

    match session.presenter().share_feedback.last().unwrap() {
        ShareFeedback::Copied { text, label, .. } => {
            assert_eq!(text, "Check out this Red Cross training course: Feeding Fundamentals");
            assert_eq!(*label, "✓ Copied!");
        }
        other => panic!("unexpected feedback: {:?}", other),
    }
}

#[tokio::test]
async fn test_restored_bookmarks_show_in_first_render() {
    let mut store = MemoryStore::new();
    store.set("redcross-bookmarks", "[2, 4]").unwrap();
    let session = session_with(store).await;

    let view = session.presenter().last_view();
    assert_eq!(view.bookmarked_count, 2);
    let flags: Vec<bool> = view.courses.iter().map(|c| c.bookmarked).collect();
    assert_eq!(flags, vec![false, true, false, true]);

    let bookmarked = session.bookmarked_view();
    assert_eq!(bookmarked.courses.len(), 2);
    assert_eq!(bookmarked.results_title, "2 Courses Found");
}

#[tokio::test]
async fn test_set_filters_renders_once() {
    let mut session = session_with(MemoryStore::new()).await;
    let rendered = session.presenter().views.len();

    let mut state = FilterState::with_query("feeding");
    state.sort = Some(SortKey::Duration);
    session.set_filters(state);

    assert_eq!(session.presenter().views.len(), rendered + 1);
    assert_eq!(session.visible_ids(), &[1, 2]);
}
