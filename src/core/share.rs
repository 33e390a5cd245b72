use crate::core::view::SHARE_LABEL;
use crate::domain::ports::{Clipboard, ShareTarget};
use crate::domain::presentation::{SharePayload, ShareFeedback};
use std::time::Duration;

pub const COPIED_LABEL: &str = "✓ Copied!";
pub const COPIED_RESET_AFTER: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareSettings {
    pub title: String,
    pub organization: String,
    pub page_url: String,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            title: "Red Cross Training Course".to_string(),
            organization: "Red Cross".to_string(),
            page_url: String::new(),
        }
    }
}

/// 有原生分享就用，否則複製到剪貼簿
pub struct Sharer {
    settings: ShareSettings,
    native: Option<Box<dyn ShareTarget>>,
    clipboard: Box<dyn Clipboard>,
}

impl Sharer {
    pub fn new(settings: ShareSettings, clipboard: impl Clipboard + 'static) -> Self {
        Self {
            settings,
            native: None,
            clipboard: Box::new(clipboard),
        }
    }

    pub fn with_native(mut self, target: impl ShareTarget + 'static) -> Self {
        self.native = Some(Box::new(target));
        self
    }

    pub fn payload(&self, course_name: &str) -> SharePayload {
        SharePayload {
            title: self.settings.title.clone(),
            text: format!("Check out this course: {}", course_name),
            url: self.settings.page_url.clone(),
        }
    }

    pub fn clipboard_text(&self, course_name: &str) -> String {
        format!(
            "Check out this {} training course: {}",
            self.settings.organization, course_name
        )
    }

    pub fn share(&mut self, course_name: &str) -> ShareFeedback {
        let payload = self.payload(course_name);
        if let Some(native) = self.native.as_mut() {
            match native.share(&payload) {
                Ok(()) => return ShareFeedback::Shared,
                Err(e) => tracing::debug!("Native share unavailable, copying instead: {}", e),
            }
        }

        let text = self.clipboard_text(course_name);
        match self.clipboard.write_text(&text) {
            Ok(()) => ShareFeedback::Copied {
                text,
                label: COPIED_LABEL,
                reset_label: SHARE_LABEL,
                reset_after: COPIED_RESET_AFTER,
            },
            Err(e) => {
                tracing::warn!("Could not copy share text: {}", e);
                ShareFeedback::Unavailable {
                    message: e.user_friendly_message(),
                }
            }
        }
    }
}
