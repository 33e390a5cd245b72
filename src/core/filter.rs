use crate::domain::model::{Catalog, Category, Course, DeliveryMode, FilterState, Level, SortKey};
use crate::domain::presentation::{FacetOption, FacetOptions};
use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;

/// 時長沒有前導整數時視為 999 小時
pub const UNKNOWN_DURATION_HOURS: i64 = 999;

/// 開放區間：超過 8 小時
pub const LONG_BUCKET: u32 = 16;

pub const DURATION_BUCKETS: [u32; 4] = [2, 4, 8, LONG_BUCKET];

/// 目前顯示的課程，依顯示順序
pub type FilteredView<'a> = Vec<&'a Course>;

/// 讀取時長的前導整數，例如 "4 hours" 或 " 2.5h"
///
/// 前導整數為 0 時回傳 0 而不是 999，所以 "0.5 hours" 落在 2 小時內的區間，
/// 不會被當成未知時長歸到超過 8 小時。
pub fn parse_hours(duration: &str) -> i64 {
    let trimmed = duration.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(hours) if negative => -hours,
        Ok(hours) => hours,
        Err(_) => UNKNOWN_DURATION_HOURS,
    }
}

pub fn matches_bucket(hours: i64, bucket: u32) -> bool {
    if bucket == LONG_BUCKET {
        hours > 8
    } else {
        hours <= i64::from(bucket)
    }
}

thread_local! {
    // 根語系 (und) 排序規則，使用編譯進程式的資料
    static COLLATOR: Option<Collator> = match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::warn!("Collator unavailable, sorting by lowercase text: {}", e);
            None
        }
    };
}

/// 依語系排序，完全相同時以位元組順序決定
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        })
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// 先搜尋，再依類別、程度、授課方式、時長篩選，最後排序
    pub fn apply<'a>(&self, catalog: &'a Catalog, state: &FilterState) -> FilteredView<'a> {
        let query = state.query.to_lowercase();
        let mut results: FilteredView<'a> = if query.is_empty() {
            catalog.iter().collect()
        } else {
            catalog
                .iter()
                .filter(|course| Self::matches_query(course, &query))
                .collect()
        };
        tracing::debug!(
            "Query '{}' kept {} of {} courses",
            state.query,
            results.len(),
            catalog.len()
        );

        if !state.categories.is_empty() {
            results.retain(|course| state.categories.contains(&course.category));
        }

        if !state.levels.is_empty() {
            results.retain(|course| state.levels.contains(&course.level));
        }

        if !state.delivery.is_empty() {
            results.retain(|course| state.delivery.contains(&course.delivery));
        }

        if !state.durations.is_empty() {
            results.retain(|course| {
                let hours = parse_hours(&course.duration);
                state
                    .durations
                    .iter()
                    .any(|&bucket| matches_bucket(hours, bucket))
            });
        }

        if let Some(key) = state.sort {
            Self::sort(&mut results, key);
        }

        tracing::debug!("Filtered view has {} courses", results.len());
        results
    }

    /// `query` 必須已轉成小寫
    pub fn matches_query(course: &Course, query: &str) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(query);

        contains(&course.name)
            || course.description.as_deref().is_some_and(contains)
            || contains(&course.category)
            || contains(&course.course_type)
            || course.tags.iter().any(|tag| contains(tag))
    }

    /// 穩定排序，相同鍵值保留目錄順序
    pub fn sort(results: &mut FilteredView<'_>, key: SortKey) {
        match key {
            SortKey::Name => results.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
            SortKey::Category => results.sort_by(|a, b| locale_cmp(&a.category, &b.category)),
            SortKey::Level => results.sort_by_key(|c| Level::from_label(&c.level).rank()),
            SortKey::Duration => results.sort_by_key(|c| parse_hours(&c.duration)),
        }
    }

    pub fn facet_options(&self, catalog: &Catalog) -> FacetOptions {
        let option = |value: &str, label: String| FacetOption {
            value: value.to_string(),
            label,
        };

        FacetOptions {
            categories: catalog
                .categories()
                .iter()
                .map(|c| {
                    let icon = Category::from_label(c).icon();
                    option(c, format!("{} {}", icon, c))
                })
                .collect(),
            levels: Level::ALL
                .iter()
                .map(|l| option(l.label(), format!("{} {}", l.badge(), l.label())))
                .collect(),
            delivery: DeliveryMode::ALL
                .iter()
                .map(|d| option(d.label(), format!("{} {}", d.icon(), d.label())))
                .collect(),
            durations: DURATION_BUCKETS
                .iter()
                .map(|&b| {
                    let label = if b == LONG_BUCKET {
                        "More than 8 hours".to_string()
                    } else {
                        format!("Up to {} hours", b)
                    };
                    option(&b.to_string(), label)
                })
                .collect(),
        }
    }
}
