use clap::Parser;
use course_catalog::adapters::build_source;
use course_catalog::adapters::json::JsonPresenter;
use course_catalog::adapters::terminal::{MemoryClipboard, TerminalPresenter, TerminalShare};
use course_catalog::config::cli::{Command, LogFormat, OutputFormat};
use course_catalog::domain::ports::{ConfigProvider, Presenter};
use course_catalog::utils::{logger, validation::Validate};
use course_catalog::{
    embedded_courses, BookmarkStore, CatalogConfig, CatalogError, CatalogLoader, CliConfig,
    FileKeyValueStore, Session, Sharer, UiEvent,
};

fn fail(e: &CatalogError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}

async fn run<P: Presenter>(command: Command, config: &CatalogConfig, presenter: P, sharer: Sharer) {
    let source = match build_source(config) {
        Ok(source) => source,
        Err(e) => fail(&e),
    };
    let loader = CatalogLoader::new(source).with_fallback(embedded_courses());
    let bookmarks = BookmarkStore::load(
        FileKeyValueStore::new(config.bookmark_path()),
        config.storage_key(),
    );

    let mut session = Session::open(&loader, bookmarks, presenter, sharer).await;

    match command {
        Command::Search(args) => session.set_filters(args.to_filter_state()),
        Command::Show { id } => {
            session.handle(UiEvent::DetailRequested(id));
            if session.open_detail().is_none() {
                eprintln!("No course with id {}", id);
            }
        }
        Command::Bookmark { id } => {
            if session.catalog().find(id).is_some() {
                session.handle(UiEvent::BookmarkClicked(id));
            } else {
                eprintln!("No course with id {}", id);
            }
        }
        Command::Bookmarks => {
            let view = session.bookmarked_view();
            session.presenter_mut().render_view(&view);
        }
        Command::Share { id } => match session.catalog().find(id).map(|c| c.name.clone()) {
            Some(name) => session.handle(UiEvent::ShareRequested(name)),
            None => eprintln!("No course with id {}", id),
        },
        Command::Facets => session.render_facets(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    let mut config = match CatalogConfig::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    cli.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let sharer = Sharer::new(config.share_settings(), MemoryClipboard::new());
    match cli.output {
        OutputFormat::Text => {
            let sharer = sharer.with_native(TerminalShare::new(std::io::stdout()));
            run(cli.command, &config, TerminalPresenter::new(std::io::stdout()), sharer).await
        }
        // JSON 輸出不混入純文字分享內容，改走剪貼簿回饋
        OutputFormat::Json => run(cli.command, &config, JsonPresenter::new(std::io::stdout()), sharer).await,
    }

    Ok(())
}
