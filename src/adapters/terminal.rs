use crate::domain::ports::{Clipboard, Presenter, ShareTarget};
use crate::domain::presentation::{
    CatalogView, CourseDetail, CourseRef, CourseSummary, FacetOption, FacetOptions, SharePayload,
    ShareFeedback,
};
use crate::utils::error::Result;
use std::cell::RefCell;
use std::fmt::Write as _;
use std::io::Write;
use std::rc::Rc;

/// 以純文字輸出目錄畫面
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

pub fn format_summary(course: &CourseSummary) -> String {
    let marker = if course.bookmarked { "★" } else { "☆" };
    let mut text = String::new();
    let _ = writeln!(text, "{} [{}] {}", marker, course.id, course.name);
    let _ = writeln!(
        text,
        "    {} | {} {} | {}",
        course.level_badge, course.delivery_icon, course.delivery, course.duration_label
    );
    let _ = writeln!(text, "    {} {}", course.category_icon, course.category);
    let _ = writeln!(text, "    {}", course.description);
    if !course.course_type.is_empty() {
        let _ = writeln!(text, "    {}", course.course_type);
    }
    text
}

pub fn format_view(view: &CatalogView) -> String {
    let mut text = String::new();
    let _ = writeln!(
        text,
        "{} (of {} total, {} bookmarked)",
        view.results_title, view.total_courses, view.bookmarked_count
    );
    if view.is_empty() {
        let _ = writeln!(text, "No courses match your search. Try clearing some filters.");
        return text;
    }
    for course in &view.courses {
        text.push('\n');
        text.push_str(&format_summary(course));
    }
    text
}

fn format_refs(text: &mut String, heading: &str, refs: &[CourseRef]) {
    if refs.is_empty() {
        return;
    }
    let _ = writeln!(text, "\n{}", heading);
    for r in refs {
        match &r.code {
            Some(code) => {
                let _ = writeln!(text, "  - [{}] {} ({})", r.id, r.name, code);
            }
            None => {
                let _ = writeln!(text, "  - [{}] {}", r.id, r.name);
            }
        }
    }
}

pub fn format_detail(detail: &CourseDetail) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{}", detail.name);
    if let Some(code) = &detail.course_code {
        let _ = writeln!(text, "Code: {}", code);
    }
    let _ = writeln!(
        text,
        "{} | {} {} | {}",
        detail.level_badge, detail.delivery_icon, detail.delivery, detail.duration_label
    );
    let _ = writeln!(text, "{} {}", detail.category_icon, detail.category);
    let _ = writeln!(text, "Type: {}", detail.course_type);
    let _ = writeln!(text, "\nDescription\n{}", detail.description);

    if let Some(tags) = &detail.tags {
        let _ = writeln!(text, "\nTags\n{}", tags.join(", "));
    }
    if !detail.prerequisites.is_empty() {
        let _ = writeln!(text, "\nPrerequisites\n{}", detail.prerequisites.join(", "));
    }
    format_refs(&mut text, "Leads to", &detail.leads_to);
    format_refs(&mut text, "Related courses", &detail.related);

    let _ = writeln!(text, "\n[{}]  [{}]", detail.bookmark_label, detail.share_label);
    text
}

fn format_options(text: &mut String, heading: &str, options: &[FacetOption]) {
    let _ = writeln!(text, "{}", heading);
    for option in options {
        let _ = writeln!(text, "  {:<24} {}", option.value, option.label);
    }
}

pub fn format_facets(options: &FacetOptions) -> String {
    let mut text = String::new();
    format_options(&mut text, "Categories", &options.categories);
    format_options(&mut text, "Levels", &options.levels);
    format_options(&mut text, "Delivery", &options.delivery);
    format_options(&mut text, "Duration", &options.durations);
    text
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_loading(&mut self) {
        tracing::info!("Loading courses...");
    }

    fn render_facets(&mut self, options: &FacetOptions) {
        let text = format_facets(options);
        self.emit(&text);
    }

    fn render_view(&mut self, view: &CatalogView) {
        let text = format_view(view);
        self.emit(&text);
    }

    fn update_bookmark(&mut self, id: u32, bookmarked: bool, bookmarked_count: usize) {
        let text = if bookmarked {
            format!("★ Bookmarked course {} ({} bookmarked)\n", id, bookmarked_count)
        } else {
            format!("☆ Removed bookmark for course {} ({} bookmarked)\n", id, bookmarked_count)
        };
        self.emit(&text);
    }

    fn show_detail(&mut self, detail: &CourseDetail) {
        let text = format_detail(detail);
        self.emit(&text);
    }

    fn close_detail(&mut self) {}

    fn show_share_feedback(&mut self, feedback: &ShareFeedback) {
        let text = match feedback {
            ShareFeedback::Shared => return,
            ShareFeedback::Copied { text, label, .. } => format!("{}\n{}\n", text, label),
            ShareFeedback::Unavailable { message } => format!("{}\n", message),
        };
        self.emit(&text);
    }
}

/// 印出分享內容，代替平台的分享面板
pub struct TerminalShare<W: Write> {
    out: W,
}

impl<W: Write> TerminalShare<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ShareTarget for TerminalShare<W> {
    fn share(&mut self, payload: &SharePayload) -> Result<()> {
        writeln!(self.out, "{}", payload.title)?;
        writeln!(self.out, "{}", payload.text)?;
        if !payload.url.is_empty() {
            writeln!(self.out, "{}", payload.url)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// 行程內剪貼簿，複製出來的實例共用內容
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Rc<RefCell<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}
