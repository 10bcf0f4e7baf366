use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use scrapval::output;
use scrapval::valuation::{
    estimate_value, validate_request, validate_tables, Valuation, ValuationRequest,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_REQUEST: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate value from a JSON request, or an array of requests (default if no subcommand)
    Estimate {
        /// Path to a JSON request file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Emit machine-readable JSON instead of the human breakdown
        #[arg(long)]
        json: bool,
    },
    /// Print the effective rule tables (defaults plus config overrides)
    Tables,
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "scrapval")]
#[command(about = "Rule-based resale/scrap value estimator for used electronics", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/scrapval/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Estimate {
        file: None,
        json: false,
    });
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    match command {
        Commands::Init => {
            if let Err(e) = scrapval::config::run_init_wizard(config_path) {
                eprintln!("Init error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        Commands::Tables => {
            let config = load_config_or_exit(config_path, cli.verbose);
            match serde_saphyr::to_string(&config.tables) {
                Ok(yaml) => print!("{}", yaml),
                Err(e) => {
                    eprintln!("Failed to render tables: {}", e);
                    std::process::exit(EXIT_IO);
                }
            }
        }
        Commands::Estimate { file, json } => {
            let config = load_config_or_exit(config_path, cli.verbose);

            let input = match read_input(file.as_deref()) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Input error: {}", e);
                    std::process::exit(EXIT_IO);
                }
            };

            // A top-level array is a batch; anything else is a single request
            let parsed: serde_json::Value = match serde_json::from_str(&input) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("Request error: invalid JSON - {}", e);
                    std::process::exit(EXIT_REQUEST);
                }
            };
            let batch = parsed.is_array();
            let requests: Vec<ValuationRequest> = if batch {
                match serde_json::from_value(parsed) {
                    Ok(v) => v,
                    Err(e) => {
                        eprintln!("Request error: {}", e);
                        std::process::exit(EXIT_REQUEST);
                    }
                }
            } else {
                match serde_json::from_value::<ValuationRequest>(parsed) {
                    Ok(r) => vec![r],
                    Err(e) => {
                        eprintln!("Request error: {}", e);
                        std::process::exit(EXIT_REQUEST);
                    }
                }
            };

            // Validate every request before valuing any of them
            let mut request_errors = Vec::new();
            for (i, request) in requests.iter().enumerate() {
                if let Err(errors) = validate_request(request) {
                    for error in errors {
                        if batch {
                            request_errors.push(format!("requests[{}].{}", i, error));
                        } else {
                            request_errors.push(error);
                        }
                    }
                }
            }
            if !request_errors.is_empty() {
                eprintln!("Request error(s):");
                for error in &request_errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_REQUEST);
            }

            if cli.verbose {
                eprintln!("Parsed {} request(s)", requests.len());
            }

            let valuations: Vec<Valuation> = requests
                .iter()
                .map(|request| estimate_value(request, &config.tables))
                .collect();

            if json {
                // Preserve input order so consumers can correlate responses
                let rendered = if batch {
                    serde_json::to_string_pretty(&valuations)
                } else {
                    serde_json::to_string_pretty(&valuations[0])
                };
                match rendered {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Failed to serialize result: {}", e);
                        std::process::exit(EXIT_IO);
                    }
                }
            } else {
                let use_colors = output::should_use_colors();
                if batch {
                    // Highest value first; stable sort keeps input order for ties
                    let mut items: Vec<output::ValuedItem> = requests
                        .iter()
                        .zip(&valuations)
                        .map(|(request, valuation)| output::ValuedItem {
                            request,
                            value: valuation.estimated_value,
                        })
                        .collect();
                    items.sort_by(|a, b| {
                        b.value
                            .partial_cmp(&a.value)
                            .unwrap_or(std::cmp::Ordering::Equal)
                    });
                    println!(
                        "{}",
                        output::format_valued_table(&items, &config.tables.currency, use_colors)
                    );
                } else {
                    println!(
                        "{}",
                        output::format_valuation_detail(&requests[0], &valuations[0], use_colors)
                    );
                }
            }

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Valued {} request(s) in {:?}",
                    requests.len(),
                    start_time.elapsed()
                );
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load the config and validate its rule tables, exiting on any problem.
fn load_config_or_exit(config_path: Option<PathBuf>, verbose: bool) -> scrapval::config::Config {
    let config = match scrapval::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = validate_tables(&config.tables) {
        eprintln!("Rule table errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if verbose {
        eprintln!(
            "Rule tables loaded (currency {}, {} component classes)",
            config.tables.currency,
            config.tables.component_classes.len()
        );
    }

    config
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file at {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read request from stdin")?;
            Ok(buffer)
        }
    }
}
