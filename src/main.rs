use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use traincfg::cli::commands;
use traincfg::run::RunOptions;
use traincfg::settings::{OutputFormat, SettingsLoader};

#[derive(Parser)]
#[command(name = "traincfg")]
#[command(
    version,
    about = "Hierarchical training-configuration resolver for ML experiment pipelines"
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
    /// Resolve a configuration document and print the flattened tree
    Resolve {
        #[arg(help = "Configuration document to resolve")]
        path: PathBuf,
        #[arg(
            long = "set",
            value_name = "KEY.PATH=VALUE",
            help = "Override a key in the resolved tree"
        )]
        overrides: Vec<String>,
        #[arg(short = 'f', long, help = "Output format: yaml, json")]
        format: Option<OutputFormat>,
        #[arg(long, help = "Fail on keys duplicated between sibling includes")]
        strict: bool,
    },

    /// Resolve and validate a document against the training-config schema
    Check {
        #[arg(help = "Configuration document to check")]
        path: PathBuf,
        #[arg(long, help = "Fail on keys duplicated between sibling includes")]
        strict: bool,
    },

    /// Discover configuration documents and report whether they resolve
    List {
        #[arg(help = "Configs root to scan (defaults to the settings value)")]
        root: Option<PathBuf>,
    },

    /// Show the run plan a document would produce, without starting anything
    Plan {
        #[arg(help = "Configuration document to plan from")]
        path: PathBuf,
        #[arg(long, help = "Experiment identifier")]
        identifier: Option<String>,
        #[arg(long, help = "Random seed")]
        seed: Option<u64>,
        #[arg(long, help = "Base directory for run output")]
        run_dir: Option<PathBuf>,
        #[arg(
            long = "set",
            value_name = "KEY.PATH=VALUE",
            help = "Override a key in the resolved tree"
        )]
        overrides: Vec<String>,
        #[arg(long, help = "Fail on keys duplicated between sibling includes")]
        strict: bool,
    },

    /// Manage tool settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show current settings (merged from all sources)
    Show {
        #[arg(short = 'g', long, help = "Show global settings file only")]
        global: bool,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show settings file paths
    Path,
    /// Edit settings file with $EDITOR
    Edit {
        #[arg(long, short, help = "Edit global settings")]
        global: bool,
    },
    /// Initialize settings
    Init {
        #[arg(long, short, help = "Initialize global settings")]
        global: bool,
        #[arg(long, help = "Overwrite existing settings")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mtraincfg encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

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
        Commands::Resolve {
            path,
            overrides,
            format,
            strict,
        } => {
            let settings = SettingsLoader::load()?;
            commands::resolve::run(commands::resolve::ResolveOptions {
                path: &path,
                overrides: &overrides,
                format: format.unwrap_or(settings.output.format),
                strict: strict || settings.resolver.strict,
            })?;
        }
        Commands::Check { path, strict } => {
            let settings = SettingsLoader::load()?;
            commands::check::run(&path, strict || settings.resolver.strict)?;
        }
        Commands::List { root } => {
            let settings = SettingsLoader::load()?;
            let root = root.unwrap_or(settings.paths.configs_root);
            commands::list::run(&root)?;
        }
        Commands::Plan {
            path,
            identifier,
            seed,
            run_dir,
            overrides,
            strict,
        } => {
            let settings = SettingsLoader::load()?;
            commands::plan::run(commands::plan::PlanOptions {
                path: &path,
                overrides: &overrides,
                run: RunOptions {
                    identifier,
                    seed,
                    run_dir,
                },
                strict: strict || settings.resolver.strict,
            })?;
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show { global, format } => {
                commands::settings::show(global, &format)?;
            }
            SettingsAction::Path => {
                commands::settings::path()?;
            }
            SettingsAction::Edit { global } => {
                commands::settings::edit(global)?;
            }
            SettingsAction::Init { global, force } => {
                if global {
                    commands::settings::init_global(force)?;
                } else {
                    commands::settings::init_project()?;
                }
            }
        },
    }

    Ok(())
}
