use crate::domain::ports::Presenter;
use crate::domain::presentation::{CatalogView, CourseDetail, FacetOptions, ShareFeedback};
use serde::Serialize;
use std::io::Write;

/// 每個畫面更新輸出一行 JSON
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    Loading,
    Facets {
        options: &'a FacetOptions,
    },
    View {
        view: &'a CatalogView,
    },
    Bookmark {
        id: u32,
        bookmarked: bool,
        bookmarked_count: usize,
    },
    Detail {
        detail: &'a CourseDetail,
    },
    DetailClosed,
    Share {
        feedback: &'a ShareFeedback,
    },
}

/// 以 JSON Lines 輸出，給其他程式讀取
pub struct JsonPresenter<W: Write> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &Event<'_>) {
        let written = serde_json::to_writer(&mut self.out, event)
            .map_err(std::io::Error::from)
            .and_then(|_| self.out.write_all(b"\n"))
            .and_then(|_| self.out.flush());
        if let Err(e) = written {
            tracing::warn!("Failed to write JSON event: {}", e);
        }
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn show_loading(&mut self) {
        self.emit(&Event::Loading);
    }

    fn render_facets(&mut self, options: &FacetOptions) {
        self.emit(&Event::Facets { options });
    }

    fn render_view(&mut self, view: &CatalogView) {
        self.emit(&Event::View { view });
    }

    fn update_bookmark(&mut self, id: u32, bookmarked: bool, bookmarked_count: usize) {
        self.emit(&Event::Bookmark {
            id,
            bookmarked,
            bookmarked_count,
        });
    }

    fn show_detail(&mut self, detail: &CourseDetail) {
        self.emit(&Event::Detail { detail });
    }

    fn close_detail(&mut self) {
        self.emit(&Event::DetailClosed);
    }

    fn show_share_feedback(&mut self, feedback: &ShareFeedback) {
        self.emit(&Event::Share { feedback });
    }
}
