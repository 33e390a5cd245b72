//! 由先修課程與課程代碼推導課程之間的連結
//!
//! 課程代碼形如 `DSMC 24002`：科目，接著是數字，第一位是程度，
//! 後兩位是系列。科目與系列相同的課程互為相關課程。

use crate::domain::model::{Catalog, Course};
use crate::domain::presentation::CourseRef;

pub const MAX_RELATED: usize = 3;

impl From<&Course> for CourseRef {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            name: course.name.clone(),
            code: course.course_code.clone(),
        }
    }
}

/// 課程代碼的科目與兩位數系列
fn code_family(code: &str) -> Option<(&str, &str)> {
    let mut parts = code.split_whitespace();
    let subject = parts.next()?;
    let number = parts.next()?;
    if parts.next().is_some() || !number.is_ascii() || number.len() < 3 {
        return None;
    }
    Some((subject, &number[1..3]))
}

/// 同系列的其他課程，最多三門
pub fn related_courses(catalog: &Catalog, course: &Course) -> Vec<CourseRef> {
    let Some((subject, family)) = course.course_code.as_deref().and_then(code_family) else {
        return Vec::new();
    };

    catalog
        .iter()
        .filter(|other| other.id != course.id)
        .filter(|other| {
            other.course_code.as_deref().is_some_and(|code| {
                code.starts_with(subject)
                    && code_family(code).is_some_and(|(_, f)| f == family)
            })
        })
        .take(MAX_RELATED)
        .map(CourseRef::from)
        .collect()
}

/// 把 `course` 列為先修的課程
pub fn leads_to(catalog: &Catalog, course: &Course) -> Vec<CourseRef> {
    catalog
        .iter()
        .filter(|other| other.prerequisites.iter().any(|p| *p == course.name))
        .map(CourseRef::from)
        .collect()
}
