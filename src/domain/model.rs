use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

/// 資料文件中的一筆課程
///
/// 只有 `id` 是必填，其餘欄位缺少或為 `null` 時使用空值
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: u32,
    #[serde(default, deserialize_with = "loose_string")]
    pub name: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub category: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub level: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub delivery: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub duration: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "loose_string")]
    pub course_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prerequisites: Vec<String>,
}

impl Course {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: String::new(),
            level: String::new(),
            delivery: String::new(),
            duration: String::new(),
            description: None,
            course_type: String::new(),
            tags: Vec::new(),
            course_code: None,
            prerequisites: Vec::new(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 資料檔裡的時數偶爾是數字而不是字串
fn loose_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Int(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(s)) => s,
        Some(Loose::Int(n)) => n.to_string(),
        Some(Loose::Float(n)) => n.to_string(),
        Some(Loose::Flag(b)) => b.to_string(),
        None => String::new(),
    })
}

/// 載入後唯讀的課程集合，id 不重複
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// 建立目錄，重複 id 保留第一筆
    pub fn new(courses: Vec<Course>) -> Self {
        let mut seen = HashSet::with_capacity(courses.len());
        let mut unique = Vec::with_capacity(courses.len());
        for course in courses {
            if seen.insert(course.id) {
                unique.push(course);
            } else {
                tracing::warn!("Dropping duplicate course id {} ({})", course.id, course.name);
            }
        }
        Self { courses: unique }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Course> {
        self.courses.iter()
    }

    pub fn find(&self, id: u32) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// 不重複的類別，遞增排序
    pub fn categories(&self) -> Vec<String> {
        self.courses
            .iter()
            .map(|c| c.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Unrated,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn from_label(label: &str) -> Self {
        match label {
            "Beginner" => Level::Beginner,
            "Intermediate" => Level::Intermediate,
            "Advanced" => Level::Advanced,
            _ => Level::Unrated,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
            Level::Unrated => "",
        }
    }

    /// 未知程度排在 Advanced 之後
    pub fn rank(self) -> u8 {
        match self {
            Level::Beginner => 1,
            Level::Intermediate => 2,
            Level::Advanced => 3,
            Level::Unrated => 4,
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            Level::Beginner => "🟢",
            Level::Intermediate => "🟡",
            Level::Advanced => "🔴",
            Level::Unrated => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryMode {
    InPerson,
    Virtual,
    SelfStudy,
    Blended,
    Various,
    Other,
}

impl DeliveryMode {
    pub const ALL: [DeliveryMode; 5] = [
        DeliveryMode::InPerson,
        DeliveryMode::Virtual,
        DeliveryMode::SelfStudy,
        DeliveryMode::Blended,
        DeliveryMode::Various,
    ];

    pub fn from_label(label: &str) -> Self {
        match label {
            "In-Person" => DeliveryMode::InPerson,
            "Virtual" => DeliveryMode::Virtual,
            "Self-Study" => DeliveryMode::SelfStudy,
            "Blended" => DeliveryMode::Blended,
            "Various" => DeliveryMode::Various,
            _ => DeliveryMode::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeliveryMode::InPerson => "In-Person",
            DeliveryMode::Virtual => "Virtual",
            DeliveryMode::SelfStudy => "Self-Study",
            DeliveryMode::Blended => "Blended",
            DeliveryMode::Various => "Various",
            DeliveryMode::Other => "",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            DeliveryMode::InPerson => "👥",
            DeliveryMode::Virtual => "💻",
            DeliveryMode::SelfStudy => "📚",
            DeliveryMode::Blended => "🔄",
            DeliveryMode::Various | DeliveryMode::Other => "📋",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Accessibility,
    DisasterServices,
    InformationTechnology,
    Leadership,
    DiversityInclusion,
    CustomerService,
    QualityAssurance,
    HealthSafety,
    GeneralTraining,
    Other,
}

impl Category {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Accessibility" => Category::Accessibility,
            "Disaster Services" => Category::DisasterServices,
            "Information Technology" => Category::InformationTechnology,
            "Leadership" => Category::Leadership,
            "Diversity & Inclusion" => Category::DiversityInclusion,
            "Customer Service" => Category::CustomerService,
            "Quality Assurance" => Category::QualityAssurance,
            "Health & Safety" => Category::HealthSafety,
            "General Training" => Category::GeneralTraining,
            _ => Category::Other,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Accessibility => "♿",
            Category::DisasterServices => "🚨",
            Category::InformationTechnology => "💻",
            Category::Leadership => "👔",
            Category::DiversityInclusion => "🤝",
            Category::CustomerService => "💬",
            Category::QualityAssurance => "✅",
            Category::HealthSafety => "🏥",
            Category::GeneralTraining => "📚",
            Category::Other => "📋",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    Level,
    Duration,
    Category,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "level" => Ok(SortKey::Level),
            "duration" => Ok(SortKey::Duration),
            "category" => Ok(SortKey::Category),
            other => Err(format!(
                "unknown sort key '{}', expected one of: name, level, duration, category",
                other
            )),
        }
    }
}

/// 勾選框所屬的篩選維度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Category,
    Level,
    Delivery,
    Duration,
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facet::Category => "category",
            Facet::Level => "level",
            Facet::Delivery => "delivery",
            Facet::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// 快速篩選：重設篩選後只勾選一個值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickFilter {
    Beginner,
    Virtual,
    Accessibility,
    Disaster,
    Under4h,
}

impl QuickFilter {
    pub fn facet(self) -> (Facet, &'static str) {
        match self {
            QuickFilter::Beginner => (Facet::Level, "Beginner"),
            QuickFilter::Virtual => (Facet::Delivery, "Virtual"),
            QuickFilter::Accessibility => (Facet::Category, "Accessibility"),
            QuickFilter::Disaster => (Facet::Category, "Disaster Services"),
            QuickFilter::Under4h => (Facet::Duration, "4"),
        }
    }
}

impl FromStr for QuickFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(QuickFilter::Beginner),
            "virtual" => Ok(QuickFilter::Virtual),
            "accessibility" => Ok(QuickFilter::Accessibility),
            "disaster" => Ok(QuickFilter::Disaster),
            "under-4h" => Ok(QuickFilter::Under4h),
            other => Err(format!(
                "unknown quick filter '{}', expected one of: beginner, virtual, accessibility, disaster, under-4h",
                other
            )),
        }
    }
}

/// 使用者在搜尋面板的所有選擇
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub categories: BTreeSet<String>,
    pub levels: BTreeSet<String>,
    pub delivery: BTreeSet<String>,
    pub durations: BTreeSet<u32>,
    pub sort: Option<SortKey>,
}

impl FilterState {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// 勾選或取消一個篩選值；時長不是整數時回傳 false
    pub fn set_facet(&mut self, facet: Facet, value: &str, checked: bool) -> bool {
        fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T, checked: bool) {
            if checked {
                set.insert(value);
            } else {
                set.remove(&value);
            }
        }

        match facet {
            Facet::Category => toggle(&mut self.categories, value.to_string(), checked),
            Facet::Level => toggle(&mut self.levels, value.to_string(), checked),
            Facet::Delivery => toggle(&mut self.delivery, value.to_string(), checked),
            Facet::Duration => match value.trim().parse::<u32>() {
                Ok(bucket) => toggle(&mut self.durations, bucket, checked),
                Err(_) => return false,
            },
        }
        true
    }

    pub fn clear_facets(&mut self) {
        self.categories.clear();
        self.levels.clear();
        self.delivery.clear();
        self.durations.clear();
    }

    /// 清除搜尋字與篩選，保留排序
    pub fn reset(&mut self) {
        self.query.clear();
        self.clear_facets();
    }

    pub fn apply_quick_filter(&mut self, quick: QuickFilter) {
        self.reset();
        let (facet, value) = quick.facet();
        self.set_facet(facet, value, true);
    }
}

/// 已加書籤的課程 id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkSet(BTreeSet<u32>);

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    /// 回傳切換後 `id` 是否有書籤
    pub fn toggle(&mut self, id: u32) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u32> for BookmarkSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
