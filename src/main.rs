//! # Twin Console CLI (`twin`)
//!
//! Drives the console pages from a terminal. Each command builds the page
//! it belongs to in memory, runs one controller operation against the
//! backend, and prints what the page ends up showing. Notifications are
//! printed on stderr.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `twin health` | Backend status and readiness |
//! | `twin ask "<question>"` | Ask one question |
//! | `twin search "<query>"` | Semantic search |
//! | `twin queries` | List the sample-query catalog |
//! | `twin run <id>` | Ask one catalog question |
//! | `twin run-all` | Ask every catalog question in one batch |
//! | `twin profile` | Show the profile sections |
//! | `twin tabs` | Show the main page tabs, optionally selecting one |
//!
//! ## Examples
//!
//! ```bash
//! twin --base-url http://127.0.0.1:8000 health
//! twin ask "What are your strongest frontend technologies?"
//! twin search "leadership" --category experience
//! twin --config ./config/twin.toml run-all --progress json
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use twin_console::api::{Backend, HttpBackend};
use twin_console::ask::AskController;
use twin_console::catalog::QueryCatalogController;
use twin_console::config::{self, Config};
use twin_console::health;
use twin_console::models::SearchFilters;
use twin_console::outcome::Outcome;
use twin_console::profile::ProfileController;
use twin_console::progress::ProgressMode;
use twin_console::search::SearchController;
use twin_console::tabs::TabController;
use twin_console::ui::Feedback;
use twin_console::view::layout::{PageKind, MAIN_TABS};
use twin_console::view::{ids, ElementId, MemoryPage, View};

/// Twin Console: terminal client for the digital twin recruiter API.
#[derive(Parser)]
#[command(
    name = "twin",
    about = "Twin Console: terminal client for the digital twin recruiter API",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). Built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL; overrides `[backend].base_url`.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check backend health.
    Health,

    /// Ask a single question.
    Ask {
        question: String,
    },

    /// Search the indexed profile.
    Search {
        query: String,

        /// Only return chunks of this category (e.g. `experience`).
        #[arg(long)]
        category: Option<String>,

        /// Only return chunks carrying this tag.
        #[arg(long)]
        tag: Option<String>,
    },

    /// List the sample-query catalog.
    Queries,

    /// Ask one catalog question by id.
    Run {
        id: String,
    },

    /// Ask every catalog question in one batch.
    RunAll {
        /// Progress on stderr: `human`, `json`, or `off`.
        /// Defaults to `human` when stderr is a terminal.
        #[arg(long, value_enum)]
        progress: Option<ProgressMode>,
    },

    /// Show the profile sections.
    Profile,

    /// Show the main page tabs.
    Tabs {
        /// Tab to activate.
        #[arg(long)]
        select: Option<String>,
    },
}

/// A page built in memory plus what its controllers need.
struct Console {
    page: Arc<MemoryPage>,
    backend: Arc<dyn Backend>,
    feedback: Feedback,
}

impl Console {
    fn new(cfg: &Config, kind: PageKind) -> Result<Self> {
        let page = Arc::new(MemoryPage::new());
        kind.build(page.as_ref());
        let backend: Arc<dyn Backend> =
            Arc::new(HttpBackend::new(&cfg.backend).context("Failed to create HTTP client")?);
        let feedback = Feedback::new(page.clone(), &cfg.toast);
        Ok(Self {
            page,
            backend,
            feedback,
        })
    }

    fn view(&self) -> Arc<dyn View> {
        self.page.clone()
    }

    fn text(&self, id: &str) -> String {
        self.page.text(&ElementId::new(id)).unwrap_or_default()
    }

    fn print_toasts(&self) {
        let stack = ElementId::new(ids::TOAST_STACK);
        for toast in self.page.children(&stack) {
            let severity = ["success", "warn", "error", "info"]
                .into_iter()
                .find(|s| self.page.has_class(&toast, &format!("toast-{}", s)))
                .unwrap_or("info");
            eprintln!("[{}] {}", severity, self.page.text(&toast).unwrap_or_default());
        }
    }
}

fn settle(outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Done | Outcome::Stale => Ok(()),
        Outcome::Rejected => bail!("input rejected"),
        Outcome::Skipped => bail!("nothing to do"),
        Outcome::Failed(reason) => bail!(reason),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };
    if let Some(ref url) = cli.base_url {
        cfg.backend.base_url = url.clone();
        config::validate(&cfg)?;
    }
    Ok(cfg)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let cfg = resolve_config(&cli)?;

    match cli.command {
        Commands::Health => {
            let backend = HttpBackend::new(&cfg.backend)?;
            let report = health::check(&backend).await?;
            println!("backend:     {}", backend.base_url());
            println!("{}", report);
        }
        Commands::Ask { question } => {
            let console = Console::new(&cfg, PageKind::Main)?;
            let ctl = AskController::new(
                console.view(),
                console.backend.clone(),
                console.feedback.clone(),
            );
            let outcome = ctl.submit(&question).await;
            println!("{}", console.text(ids::ANSWER_BOX));
            console.print_toasts();
            settle(outcome)?;
        }
        Commands::Search {
            query,
            category,
            tag,
        } => {
            let console = Console::new(&cfg, PageKind::Main)?;
            TabController::new(console.view(), MAIN_TABS).select("search")?;
            let ctl = SearchController::new(
                console.view(),
                console.backend.clone(),
                console.feedback.clone(),
                cfg.search.snippet_chars,
            );
            let outcome = ctl.submit(&query, &SearchFilters { category, tag }).await;
            print_search_results(&console);
            console.print_toasts();
            settle(outcome)?;
        }
        Commands::Queries => {
            let console = Console::new(&cfg, PageKind::Testing)?;
            let ctl = catalog(&console);
            let outcome = ctl.load_queries().await;
            print_catalog(&console, &ctl);
            console.print_toasts();
            settle(outcome)?;
        }
        Commands::Run { id } => {
            let console = Console::new(&cfg, PageKind::Testing)?;
            let ctl = catalog(&console);
            settle(ctl.load_queries().await)?;
            let outcome = ctl.run_single(&id).await;
            if outcome == Outcome::Skipped {
                bail!("no catalog query with id: {}", id);
            }
            print_catalog(&console, &ctl);
            console.print_toasts();
            settle(outcome)?;
        }
        Commands::RunAll { progress } => {
            let console = Console::new(&cfg, PageKind::Testing)?;
            let mode = progress.unwrap_or_else(ProgressMode::default_for_tty);
            let ctl = catalog(&console).with_reporter(mode.reporter());
            settle(ctl.load_queries().await)?;
            let outcome = ctl.run_all().await;
            print_catalog(&console, &ctl);
            println!("progress: {}", console.text(ids::PROGRESS));
            console.print_toasts();
            settle(outcome)?;
        }
        Commands::Profile => {
            let console = Console::new(&cfg, PageKind::Profile)?;
            let ctl = ProfileController::new(
                console.view(),
                console.backend.clone(),
                console.feedback.clone(),
            );
            let outcome = ctl.load().await;
            print_profile(&console);
            console.print_toasts();
            settle(outcome)?;
        }
        Commands::Tabs { select } => {
            let console = Console::new(&cfg, PageKind::Main)?;
            let tabs = TabController::new(console.view(), MAIN_TABS);
            if let Some(name) = select {
                tabs.select(&name)?;
            }
            for name in tabs.names() {
                let marker = if tabs.active() == Some(name.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!("{} {}", marker, name);
            }
        }
    }

    Ok(())
}

fn catalog(console: &Console) -> QueryCatalogController {
    QueryCatalogController::new(
        console.view(),
        console.backend.clone(),
        console.feedback.clone(),
    )
}

fn print_catalog(console: &Console, ctl: &QueryCatalogController) {
    let session = ctl.session();
    println!("{:<6} {:<10} QUESTION", "ID", "BEHAVIORAL");
    for q in session.queries() {
        let flag = if q.behavioral { "Yes" } else { "No" };
        println!("{:<6} {:<10} {}", q.id, flag, q.text);
        let answer = session
            .cell(&q.id)
            .and_then(|cell| console.page.text(cell))
            .unwrap_or_default();
        if !answer.is_empty() {
            println!("       -> {}", answer.replace('\n', "\n          "));
        }
    }
}

fn print_search_results(console: &Console) {
    let results = ElementId::new(ids::SEARCH_RESULTS);
    let html = console
        .page
        .content(&results)
        .map(|c| c.html())
        .unwrap_or_default();
    // One result per block element; keep them on separate lines.
    let text = twin_console::ui::escape::markup_text(&html.replace("</div></div>", "</div></div>\n"));
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        println!("{}", line.trim());
    }
}

fn print_profile(console: &Console) {
    let body = ElementId::new(ids::PROFILE_BODY);
    let html = console
        .page
        .content(&body)
        .map(|c| c.html())
        .unwrap_or_default();
    let spaced = html
        .replace("</h3>", "</h3>\n")
        .replace("</h4>", "</h4>\n")
        .replace("</p>", "</p>\n")
        .replace("</li>", "</li>\n")
        .replace("<h3>", "\n<h3>");
    let text = twin_console::ui::escape::markup_text(&spaced);
    println!("{}", text.trim());
}
