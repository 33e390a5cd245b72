use crate::domain::model::Course;
use crate::utils::error::{CatalogError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    #[default]
    Json,
    Csv,
}

impl DataFormat {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Ok(DataFormat::Json),
            "csv" => Ok(DataFormat::Csv),
            other => Err(CatalogError::InvalidConfigValueError {
                field: "source.format".to_string(),
                value: other.to_string(),
                reason: "Supported formats: json, csv".to_string(),
            }),
        }
    }

    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => DataFormat::Csv,
            _ => DataFormat::Json,
        }
    }

    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type.split(';').next()?.trim().to_ascii_lowercase();
        match mime.as_str() {
            "text/csv" | "application/csv" => Some(DataFormat::Csv),
            "application/json" | "text/json" => Some(DataFormat::Json),
            _ => None,
        }
    }
}

/// CSV 格式：每列一門課程，清單欄位以 `;` 分隔
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvCourseRow {
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    level: String,
    #[serde(default)]
    delivery: String,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "type")]
    course_type: String,
    #[serde(default)]
    tags: Option<String>,
    #[serde(default)]
    course_code: Option<String>,
    #[serde(default)]
    prerequisites: Option<String>,
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

impl From<CsvCourseRow> for Course {
    fn from(row: CsvCourseRow) -> Self {
        Course {
            id: row.id,
            name: row.name,
            category: row.category,
            level: row.level,
            delivery: row.delivery,
            duration: row.duration,
            description: row.description.filter(|d| !d.is_empty()),
            course_type: row.course_type,
            tags: split_list(row.tags),
            course_code: row.course_code.filter(|c| !c.is_empty()),
            prerequisites: split_list(row.prerequisites),
        }
    }
}

/// 將資料文件解析為課程
pub fn parse_courses(data: &[u8], format: DataFormat) -> Result<Vec<Course>> {
    match format {
        DataFormat::Json => Ok(serde_json::from_slice(data)?),
        DataFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .flexible(true)
                .from_reader(data);
            reader
                .deserialize::<CsvCourseRow>()
                .map(|row| -> Result<Course> { Ok(Course::from(row?)) })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_document() {
        let data = br#"[
            {"id": 1, "name": "Feeding Fundamentals", "category": "Disaster Services", "tags": ["feeding"]},
            {"id": 2, "name": "Psychological First Aid"}
        ]"#;
        let courses = parse_courses(data, DataFormat::Json).unwrap();

        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].tags, vec!["feeding"]);
    }

    #[test]
    fn test_parse_json_rejects_non_array() {
        assert!(parse_courses(b"{\"id\": 1}", DataFormat::Json).is_err());
        assert!(parse_courses(b"<html>404</html>", DataFormat::Json).is_err());
    }

    #[test]
    fn test_parse_csv_document() {
        let data = "\
id,name,category,level,delivery,duration,description,type,tags,courseCode,prerequisites
1,Feeding Fundamentals,Disaster Services,Beginner,In-Person,4 hours,Intro to feeding,Instructor-Led,feeding; mass care,DS-101,
2,Mobile Feeding Operations,Disaster Services,Intermediate,Blended,6 hours,,Instructor-Led,,DS-201,Feeding Fundamentals
";
        let courses = parse_courses(data.as_bytes(), DataFormat::Csv).unwrap();

        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].tags, vec!["feeding", "mass care"]);
        assert_eq!(courses[0].course_code.as_deref(), Some("DS-101"));
        assert!(courses[0].prerequisites.is_empty());
        assert!(courses[1].description.is_none());
        assert_eq!(courses[1].prerequisites, vec!["Feeding Fundamentals"]);
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(DataFormat::from_path(Path::new("data/courses.CSV")), DataFormat::Csv);
        assert_eq!(DataFormat::from_path(Path::new("courses.json")), DataFormat::Json);
        assert_eq!(
            DataFormat::from_content_type("text/csv; charset=utf-8"),
            Some(DataFormat::Csv)
        );
        assert_eq!(DataFormat::from_content_type("text/html"), None);
        assert!(DataFormat::from_name("xml").is_err());
    }
}
