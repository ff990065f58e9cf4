use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use git_release_notes::cli::outputs::{self, JsonReport};
use git_release_notes::cli::{run_release_notes, ReleaseNotesArgs, WorkflowResult};
use git_release_notes::config::{self, Config};
use git_release_notes::git::{CommitSource, Git2Repository, RemoteCoordinates, SnapshotSource};
use git_release_notes::{ui, ReleaseNotesError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

#[derive(clap::Parser)]
#[command(
    name = "git-release-notes",
    version,
    about = "Generate categorized release notes and the next version from conventional commits"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, default_value = ".", help = "Path inside the git repository")]
    repo: PathBuf,

    #[arg(
        long,
        help = "Read commits from a saved compare-commits JSON file instead of git"
    )]
    commits_file: Option<PathBuf>,

    #[arg(long, help = "Base reference (default: latest release tag)")]
    base: Option<String>,

    #[arg(long, help = "Head reference or explicit release tag (default: HEAD)")]
    head: Option<String>,

    #[arg(long, help = "Prefix of task identifiers, e.g. JIRA-")]
    task_prefix: Option<String>,

    #[arg(long, help = "Base URL for task links")]
    task_base_url: Option<String>,

    #[arg(long, help = "Application name: tag prefix <app>@ and default scope")]
    app: Option<String>,

    #[arg(long, help = "Only keep commits with this conventional scope")]
    scope: Option<String>,

    #[arg(long, help = "Force a pre-release version bump")]
    prerelease: bool,

    #[arg(long, value_enum, default_value = "markdown", help = "Output format")]
    format: OutputFormat,

    #[arg(
        long,
        env = "GITHUB_OUTPUT",
        help = "File to append step outputs to (name=value lines)"
    )]
    github_output: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => apply_overrides(cfg, &args),
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let repository = Git2Repository::open(&args.repo);
    let coordinates = match resolve_coordinates(&config, repository.as_ref().ok()) {
        Ok(coordinates) => coordinates,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    let web_url = coordinates.web_url(&config.repository.host_url);

    let source: Box<dyn CommitSource> = match (&args.commits_file, repository) {
        (Some(path), _) => {
            ui::display_status(&format!("Reading commits from {}", path.display()));
            Box::new(SnapshotSource::new(path))
        }
        (None, Ok(repo)) => {
            ui::display_status(&format!("Reading commits from {}", web_url));
            Box::new(repo.with_web_links(&config.repository.host_url, &web_url))
        }
        (None, Err(e)) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = ReleaseNotesArgs {
        base: args.base.clone(),
        head: args.head.clone(),
        prerelease: args.prerelease,
    };
    let result = match run_release_notes(&*source, &workflow_args, &config, &coordinates) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&format!("Failed to generate release notes: {}", e));
            std::process::exit(1);
        }
    };

    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_release_summary(&result);

    match args.format {
        OutputFormat::Markdown => print_markdown(&result),
        OutputFormat::Json => {
            let report = JsonReport::new(&result);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if let Some(path) = &args.github_output {
        outputs::write_github_output(path, &result)?;
        ui::display_success(&format!("Wrote step outputs to {}", path.display()));
    }

    Ok(())
}

/// Console logging controlled by RUST_LOG (default: warn), on stderr.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// CLI flags take precedence over the configuration file.
fn apply_overrides(mut config: Config, args: &Args) -> Config {
    if let Some(prefix) = &args.task_prefix {
        config.task_prefix = prefix.clone();
    }
    if let Some(url) = &args.task_base_url {
        config.task_base_url = Some(url.clone());
    }
    if let Some(app) = &args.app {
        config.app = Some(app.clone());
    }
    if let Some(scope) = &args.scope {
        config.commit_scope = Some(scope.clone());
    }
    config
}

/// Configured owner/name, falling back to the URL of the configured remote.
fn resolve_coordinates(
    config: &Config,
    repository: Option<&Git2Repository>,
) -> git_release_notes::Result<RemoteCoordinates> {
    let settings = &config.repository;
    if let (Some(owner), Some(name)) = (&settings.owner, &settings.name) {
        return Ok(RemoteCoordinates::new(owner, name));
    }

    let inferred = repository
        .and_then(|repo| repo.remote_url(&settings.remote))
        .and_then(|url| RemoteCoordinates::from_url(&url))
        .ok_or_else(|| {
            ReleaseNotesError::config(format!(
                "Cannot determine repository owner and name from remote '{}'; \
                 set [repository] owner and name",
                settings.remote
            ))
        })?;
    Ok(RemoteCoordinates::new(
        settings.owner.clone().unwrap_or(inferred.owner),
        settings.name.clone().unwrap_or(inferred.name),
    ))
}

fn print_markdown(result: &WorkflowResult) {
    let notes = &result.notes;
    if !notes.changes.is_empty() {
        println!("{}", notes.changes);
    }
    if !notes.tasks.is_empty() {
        println!("\nTasks: {}", notes.tasks);
    }
    if !notes.pull_requests.is_empty() {
        println!("\nPull requests: {}", notes.pull_requests);
    }
}
