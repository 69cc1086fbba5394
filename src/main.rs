//! Headless driver for the dashboard core.
//!
//! Exercises the library without a rendering layer: loads the dataset once,
//! optionally runs a search, navigates to a chosen result, and resolves a
//! topic label for a route. Output is JSON on stdout; logs go to stderr or the
//! configured trace file.
//!
//! # Usage
//!
//! ```text
//! survey-lens [QUERY] [--select N] [--active-section KEY]
//!             [--resolve PATH [--fragment FRAG] [--hint TEXT]]
//!             [--config FILE] [--skip-load]
//! ```
//!
//! Without `--config`, configuration is read from `SURVEY_LENS_*` environment
//! variables.

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

use survey_lens::app::{handle_event, SearchEvent};
use survey_lens::{initialize, Config, Dashboard, RouteLocation};

#[derive(Parser, Debug)]
#[command(
    name = "survey-lens",
    version,
    about = "Headless driver for the survey dashboard data core"
)]
struct CliArgs {
    /// Search query to run against the navigation tree.
    query: Option<String>,

    /// Flat TOML configuration file.
    #[arg(short, long, value_name = "FILE", env = "SURVEY_LENS_CONFIG")]
    config: Option<PathBuf>,

    /// Navigate to the result at this position.
    #[arg(long, value_name = "N", requires = "query")]
    select: Option<usize>,

    /// Section key of the page currently showing.
    #[arg(long, value_name = "KEY")]
    active_section: Option<String>,

    /// Resolve the topic label for this route path.
    #[arg(long, value_name = "PATH")]
    resolve: Option<String>,

    /// Route fragment used with `--resolve`.
    #[arg(long, value_name = "FRAG", requires = "resolve")]
    fragment: Option<String>,

    /// Chart hint text used with `--resolve`.
    #[arg(long, value_name = "TEXT", requires = "resolve")]
    hint: Option<String>,

    /// Do not load the dataset.
    #[arg(long)]
    skip_load: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config = match args.config.as_ref() {
        Some(path) => match Config::from_toml_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("survey-lens: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::from_env(),
    };
    survey_lens::observability::init_tracing(&config);

    tracing::debug!(config = ?config, "driver starting");

    let dashboard = match initialize(&config) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            tracing::error!(error = %e, "initialization failed");
            return ExitCode::FAILURE;
        }
    };

    if !args.skip_load && !load(&dashboard).await {
        return ExitCode::FAILURE;
    }

    if let Some(query) = args.query.as_deref() {
        search(&dashboard, query, args.select, args.active_section.as_deref()).await;
    }

    if let Some(path) = args.resolve.as_deref() {
        let location = RouteLocation::new(path, args.fragment.as_deref());
        let label = dashboard.resolver().resolve(args.hint.as_deref(), &location);
        println!("{}", json!({ "route": path, "topic": label }));
    }

    ExitCode::SUCCESS
}

async fn load(dashboard: &Dashboard) -> bool {
    match dashboard.cache().load_data().await {
        Ok(dataset) => {
            println!(
                "{}",
                json!({ "records": dataset.len(), "columns": dataset.headers() })
            );
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "dataset unavailable");
            if let survey_lens::SurveyError::SourcesExhausted { attempts } = e.as_ref() {
                for attempt in attempts {
                    eprintln!("  {attempt}");
                }
            }
            false
        }
    }
}

async fn search(dashboard: &Dashboard, query: &str, select: Option<usize>, active_section: Option<&str>) {
    let mut state = dashboard.search_state();
    handle_event(&mut state, &SearchEvent::QueryChanged(query.to_string()));

    match serde_json::to_string_pretty(state.results()) {
        Ok(results) => println!("{results}"),
        Err(e) => tracing::warn!(error = %e, "failed to serialize search results"),
    }

    let Some(index) = select else {
        return;
    };

    let (_, actions) = handle_event(&mut state, &SearchEvent::Select(index));
    if actions.is_empty() {
        tracing::warn!(index, "no search result at that position");
        return;
    }

    let coordinator = dashboard.coordinator(|path: &str| {
        println!("{}", json!({ "route": path }));
    });
    for action in &actions {
        coordinator
            .execute(action, active_section, |topic, slug| {
                println!("{}", json!({ "topic": topic, "subheading": slug }));
            })
            .await;
    }
}
