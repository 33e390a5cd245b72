use crate::config::toml_config::CatalogConfig;
use crate::domain::model::{Facet, FilterState, QuickFilter, SortKey};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "course-catalog")]
#[command(about = "Search, filter and bookmark training courses")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Path to TOML configuration file (defaults to ./catalog.toml when present)")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Course data URL or file path, overrides [source].endpoint")]
    pub endpoint: Option<String>,

    #[arg(long, global = true, help = "Request timeout in seconds for HTTP sources")]
    pub timeout: Option<u64>,

    #[arg(long, global = true, help = "Bookmark storage file, overrides [storage].path")]
    pub storage: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value = "compact", global = true)]
    pub log_format: LogFormat,

    #[arg(long, value_enum, default_value = "text", global = true, help = "Render results as text or as JSON lines")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Search and filter the catalog")]
    Search(SearchArgs),
    #[command(about = "Show full details for a course")]
    Show { id: u32 },
    #[command(about = "Toggle the bookmark on a course")]
    Bookmark { id: u32 },
    #[command(about = "List bookmarked courses")]
    Bookmarks,
    #[command(about = "Share a course (prints the share text)")]
    Share { id: u32 },
    #[command(about = "List the available filter values")]
    Facets,
}

#[derive(Debug, Default, Args)]
pub struct SearchArgs {
    #[arg(help = "Free-text query matched against name, description, category, type and tags")]
    pub query: Option<String>,

    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<String>,

    #[arg(long = "level", value_name = "LEVEL")]
    pub levels: Vec<String>,

    #[arg(long = "delivery", value_name = "MODE")]
    pub delivery: Vec<String>,

    #[arg(long = "duration", value_name = "HOURS", help = "Duration bucket in hours: 2, 4, 8, or 16 for \"more than 8\"")]
    pub durations: Vec<u32>,

    #[arg(long, help = "name, level, duration or category")]
    pub sort: Option<SortKey>,

    #[arg(long, conflicts_with_all = ["query", "categories", "levels", "delivery", "durations"], help = "beginner, virtual, accessibility, disaster or under-4h")]
    pub quick: Option<QuickFilter>,
}

impl SearchArgs {
    pub fn to_filter_state(&self) -> FilterState {
        let mut state = FilterState::default();
        if let Some(quick) = self.quick {
            state.apply_quick_filter(quick);
        } else {
            state.query = self.query.clone().unwrap_or_default();
            for value in &self.categories {
                state.set_facet(Facet::Category, value, true);
            }
            for value in &self.levels {
                state.set_facet(Facet::Level, value, true);
            }
            for value in &self.delivery {
                state.set_facet(Facet::Delivery, value, true);
            }
            state.durations.extend(self.durations.iter().copied());
        }
        state.sort = self.sort;
        state
    }
}

impl CliConfig {
    /// 命令列參數覆蓋設定檔
    pub fn apply_overrides(&self, config: &mut CatalogConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.source.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout {
            config.source.timeout_seconds = Some(timeout);
        }
        if let Some(storage) = &self.storage {
            config.storage.path = storage.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_args_build_filter_state() {
        let cli = CliConfig::parse_from([
            "course-catalog",
            "search",
            "feeding",
            "--category",
            "Disaster Services",
            "--duration",
            "4",
            "--duration",
            "16",
            "--sort",
            "duration",
        ]);

        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        let state = args.to_filter_state();
        assert_eq!(state.query, "feeding");
        assert!(state.categories.contains("Disaster Services"));
        assert_eq!(state.durations.iter().copied().collect::<Vec<_>>(), vec![4, 16]);
        assert_eq!(state.sort, Some(SortKey::Duration));
    }

    #[test]
    fn test_quick_filter_keeps_sort() {
        let cli = CliConfig::parse_from(["course-catalog", "search", "--quick", "under-4h", "--sort", "name"]);
        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        let state = args.to_filter_state();
        assert!(state.durations.contains(&4));
        assert_eq!(state.sort, Some(SortKey::Name));
    }

    #[test]
    fn test_overrides() {
        let cli = CliConfig::parse_from([
            "course-catalog",
            "--endpoint",
            "https://example.org/courses.csv",
            "--storage",
            "/tmp/bookmarks.json",
            "facets",
        ]);
        let mut config = CatalogConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.source.endpoint, "https://example.org/courses.csv");
        assert_eq!(config.storage.path, "/tmp/bookmarks.json");
        assert_eq!(config.source.timeout_seconds, None);
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn test_json_output_flag() {
        let cli = CliConfig::parse_from(["course-catalog", "bookmarks", "--output", "json"]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(cli.command, Command::Bookmarks));
    }
}
