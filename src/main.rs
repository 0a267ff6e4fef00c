use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use fpa_calc::config::{self, Config};
use fpa_calc::export::{self, DEFAULT_EXPORT_FILE};
use fpa_calc::model::{Complexity, FunctionType, ProjectId};
use fpa_calc::output;
use fpa_calc::scoring::{total_degree_of_influence, weight_for};
use fpa_calc::state::AppState;
use fpa_calc::tui::{self, App, ThemeColors};

const EXIT_SUCCESS: i32 = 0;
const EXIT_VALIDATION: i32 = 1;
const EXIT_CONFIG: i32 = 2;
const EXIT_IO: i32 = 3;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Totals for every project (default if no subcommand)
    Summary,
    /// Entries of one project with its totals
    List {
        /// Project id (defaults to the first project)
        #[arg(short, long)]
        project: Option<String>,
    },
    /// General system characteristic ratings and the resulting VAF
    Vaf,
    /// The function point weight table
    Weights,
    /// Write the CSV report for all projects
    Export {
        /// Destination file (defaults to export.path from the workspace, then function-points.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Interactive calculator
    Tui,
    /// Create a workspace file interactively
    Init,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "fpa-calc")]
#[command(about = "Function Point Analysis calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to workspace file (defaults to ~/.config/fpa-calc/workspace.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format for summary, list, vaf and weights
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Route tracing through the stderr buffer. `RUST_LOG` wins unless
/// `--verbose` asks for everything.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(fpa_calc::stderr_buffer::BufferedStderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    std::process::exit(run(cli).await);
}

async fn run(cli: Cli) -> i32 {
    let command = cli.command.unwrap_or(Commands::Summary);

    if let Commands::Init = command {
        return match config::init::run_init_wizard(cli.config) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                EXIT_IO
            }
        };
    }

    // Load workspace
    let config = match config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    let state = match config::build_state(&config) {
        Ok(s) => s,
        Err(errors) => {
            eprintln!("Workspace errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            return EXIT_VALIDATION;
        }
    };

    tracing::debug!(
        projects = state.projects().len(),
        entries = state.entries().len(),
        "workspace ready"
    );

    let use_colors = output::should_use_colors();
    match command {
        Commands::Summary => match cli.format {
            OutputFormat::Text => print_text(output::format_summary(&state, use_colors)),
            OutputFormat::Json => print_json(output::build_report(&state, None)),
        },
        Commands::List { project } => {
            let project_id = match resolve_project(&state, project) {
                Ok(id) => id,
                Err(msg) => {
                    eprintln!("{}", msg);
                    return EXIT_VALIDATION;
                }
            };
            match cli.format {
                OutputFormat::Text => {
                    print_text(output::format_entries_table(&state, &project_id, use_colors))
                }
                OutputFormat::Json => print_json(output::build_report(&state, Some(&project_id))),
            }
        }
        Commands::Vaf => match cli.format {
            OutputFormat::Text => print_text(output::format_vaf_panel(&state, use_colors)),
            OutputFormat::Json => print_json(vaf_report(&state)),
        },
        Commands::Weights => match cli.format {
            OutputFormat::Text => {
                println!("{}", output::format_weight_table(use_colors));
                EXIT_SUCCESS
            }
            OutputFormat::Json => print_json(Ok::<_, fpa_calc::ValidationError>(weight_rows())),
        },
        Commands::Export { output } => {
            let path = export_path(&config, output);
            let csv = match export::build_csv(&state) {
                Ok(csv) => csv,
                Err(e) => {
                    eprintln!("Export failed: {}", e);
                    return EXIT_VALIDATION;
                }
            };
            if let Err(e) = export::write_csv(&path, &csv) {
                eprintln!("Export failed: {:#}", e);
                return EXIT_IO;
            }
            println!(
                "Exported {} entries across {} projects to {}",
                state.entries().len(),
                state.projects().len(),
                path.display()
            );
            EXIT_SUCCESS
        }
        Commands::Tui => {
            let theme = tui::resolve_theme(config.theme.unwrap_or_default());
            let app = App::new(state, export_path(&config, None), ThemeColors::for_theme(theme));
            match tui::run_tui(app).await {
                Ok(summary) => {
                    tracing::info!(
                        projects = summary.projects,
                        entries = summary.entries,
                        "session ended"
                    );
                    EXIT_SUCCESS
                }
                Err(e) => {
                    eprintln!("TUI error: {:#}", e);
                    EXIT_IO
                }
            }
        }
        Commands::Init => EXIT_SUCCESS,
    }
}

/// `--output`, then `export.path` from the workspace, then the default file name.
fn export_path(config: &Config, output: Option<PathBuf>) -> PathBuf {
    output
        .or_else(|| {
            config
                .export
                .as_ref()
                .and_then(|e| e.path.as_ref())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE))
}

fn resolve_project(state: &AppState, requested: Option<String>) -> Result<ProjectId, String> {
    match requested {
        Some(raw) => {
            let id = ProjectId::new(raw).map_err(|e| e.to_string())?;
            if state.project(&id).is_none() {
                return Err(format!("Unknown project '{}'", id));
            }
            Ok(id)
        }
        None => state
            .selected_id()
            .cloned()
            .ok_or_else(|| "No projects in workspace".to_string()),
    }
}

fn print_text(result: Result<String, fpa_calc::ValidationError>) -> i32 {
    match result {
        Ok(text) => {
            println!("{}", text);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_VALIDATION
        }
    }
}

fn print_json<T: Serialize>(result: Result<T, fpa_calc::ValidationError>) -> i32 {
    let value = match result {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_VALIDATION;
        }
    };
    match serde_json::to_string_pretty(&value) {
        Ok(json) => {
            println!("{}", json);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            EXIT_IO
        }
    }
}

fn vaf_report(state: &AppState) -> Result<serde_json::Value, fpa_calc::ValidationError> {
    Ok(serde_json::json!({
        "vaf": state.vaf()?,
        "total_degree_of_influence": total_degree_of_influence(state.characteristics())?,
        "characteristics": state.characteristics(),
    }))
}

#[derive(Serialize)]
struct WeightRow {
    #[serde(rename = "type")]
    function_type: FunctionType,
    low: u32,
    medium: u32,
    high: u32,
}

fn weight_rows() -> Vec<WeightRow> {
    FunctionType::ALL
        .iter()
        .map(|&function_type| WeightRow {
            function_type,
            low: weight_for(function_type, Complexity::Low),
            medium: weight_for(function_type, Complexity::Medium),
            high: weight_for(function_type, Complexity::High),
        })
        .collect()
}
