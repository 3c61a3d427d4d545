use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blastmap")]
#[command(
    version,
    about = "Change-impact (blast radius) analyzer for application file trees"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the blast radius of a set of changed files
    Analyze {
        #[arg(help = "Changed file paths; may be inexact")]
        files: Vec<String>,
        #[arg(long, short, default_value = ".", help = "Application root directory")]
        root: PathBuf,
        #[arg(long, short, help = "Application identifier")]
        app: Option<String>,
        #[arg(long, short, help = "Maximum propagation depth")]
        depth: Option<usize>,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Resolve inexact paths against the application file tree
    Resolve {
        #[arg(help = "Paths to resolve")]
        files: Vec<String>,
        #[arg(long, short, default_value = ".", help = "Application root directory")]
        root: PathBuf,
        #[arg(long, short, help = "Application identifier")]
        app: Option<String>,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
}

/// Application id: explicit flag, else the root directory's name
fn app_id_for(app: Option<String>, root: &PathBuf) -> String {
    app.unwrap_or_else(|| {
        root.canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "default".to_string())
    })
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Analyze {
            files,
            root,
            app,
            depth,
            format,
        } => {
            let app = app_id_for(app, &root);
            let runtime = Runtime::new()?;
            runtime.block_on(blastmap::cli::commands::analyze::run(
                app, root, files, depth, &format,
            ))?;
        }
        Commands::Resolve {
            files,
            root,
            app,
            format,
        } => {
            let app = app_id_for(app, &root);
            let runtime = Runtime::new()?;
            runtime.block_on(blastmap::cli::commands::resolve::run(
                app, root, files, &format,
            ))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                blastmap::cli::commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                blastmap::cli::commands::config::path();
            }
        },
    }

    Ok(())
}
