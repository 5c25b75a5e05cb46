#![warn(clippy::pedantic)]

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use cube_sim::{Cube, Mark};
use env_logger::TimestampPrecision;
use fmc_core::{
    Metric, Phase,
    accounting::{apply_marks, calc_marks},
    chain::{SubmissionId, flatten_phases},
    config::EngineConfig,
    dr::describe,
    legality::check_boundary,
    metrics::{algorithm_length, lengths},
    notation,
    phase::{classify, status},
    scoring::final_moves_or_dnf,
};
use itertools::Itertools;
use log::{LevelFilter, debug};
use owo_colors::OwoColorize;

use crate::tree::ChainFile;

mod tree;

/// Move accounting and phase classification for fewest moves chains
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The engine configuration file, in TOML format. Defaults to
    /// `fmc/config.toml` in the user configuration directory.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of a move sequence
    Normalize { algorithm: String },
    /// Count the moves of a sequence, ignoring rotations
    Count {
        algorithm: String,
        /// HTM, QTM, STM or ATM. Defaults to the configured metric.
        #[arg(short, long, value_parser = parse_metric)]
        metric: Option<Metric>,
        /// Print every metric
        #[arg(long, conflicts_with = "metric")]
        all: bool,
    },
    /// Classify the cube after a scramble and a solution
    Phase {
        scramble: String,
        #[arg(default_value = "")]
        solution: String,
    },
    /// Describe the domino reduction after a scramble and a solution
    Dr {
        scramble: String,
        #[arg(default_value = "")]
        solution: String,
    },
    /// Show what cancellation does to every move, one argument per skeleton part
    Marks {
        #[arg(required = true)]
        parts: Vec<String>,
    },
    /// Check that a contribution may hand a chain off at a phase
    Boundary {
        #[arg(value_parser = parse_phase)]
        phase: Phase,
        algorithm: String,
    },
    /// Replay a chain file from the root to a submission
    Chain {
        file: PathBuf,
        /// Position of the last submission in the file. Defaults to the last one.
        #[arg(long)]
        leaf: Option<usize>,
    },
    /// Score a final solution of a regular competition
    Score { scramble: String, solution: String },
}

fn parse_metric(s: &str) -> Result<Metric, String> {
    s.parse()
        .map_err(|()| format!("{s:?} is not one of HTM, QTM, STM or ATM"))
}

fn parse_phase(s: &str) -> Result<Phase, String> {
    s.parse().map_err(|()| format!("{s:?} is not a phase"))
}

fn load_config(path: Option<PathBuf>) -> color_eyre::Result<EngineConfig> {
    match path {
        Some(path) if !path.exists() => Err(eyre!("The configuration file {path:?} does not exist")),
        Some(path) => Ok(EngineConfig::load(&path)?),
        None => match dirs::config_dir() {
            Some(dir) => Ok(EngineConfig::load(&dir.join("fmc").join("config.toml"))?),
            None => Ok(EngineConfig::default()),
        },
    }
}

fn cube_after(scramble: &str, solution: &str) -> color_eyre::Result<Cube> {
    let mut cube = Cube::from(&notation::parse(scramble)?);
    cube.twist(&notation::parse(solution)?);
    Ok(cube)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .parse_default_env()
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = load_config(cli.config)?;
    debug!("Using {config:?}");

    match cli.command {
        Commands::Normalize { algorithm } => {
            println!("{}", notation::normalize(&algorithm)?);
        }
        Commands::Count {
            algorithm,
            metric,
            all,
        } => {
            let algorithm = notation::parse(&algorithm)?;

            if all {
                let lengths = lengths(&algorithm)?;
                for metric in Metric::ALL {
                    println!("{metric}: {}", lengths.get(metric));
                }
            } else {
                let metric = metric.unwrap_or(config.default_metric);
                println!("{}", algorithm_length(&algorithm, metric));
            }
        }
        Commands::Phase { scramble, solution } => {
            let cube = cube_after(&scramble, &solution)?;
            let phase = classify(&cube);

            println!("{} {}", phase.bold(), status(&cube, phase));
        }
        Commands::Dr { scramble, solution } => {
            let description = describe(&cube_after(&scramble, &solution)?);

            if !description.dr && !description.eo {
                println!("{}", "Not edge oriented".red());
                return Ok(());
            }

            println!("EO: {}", description.eo_status.iter().join(","));
            println!("DR: {}", description.dr_status.iter().join(","));
            println!("Parity: {}", description.parity);

            if description.dr {
                println!("{}c{}e", description.corners, description.edges);
                println!("{}qt", description.quarter_turns);

                if description.corners == 4 {
                    let state = description.corner_state;
                    println!("Corners: {}/{}", state.normal, state.inverse);
                }
                if description.fake_htr {
                    println!("{}", "Fake HTR".yellow());
                }
                if description.htr {
                    println!("{}", "HTR".green());
                }
            }
        }
        Commands::Marks { parts } => {
            let groups = parts
                .iter()
                .map(|part| {
                    notation::remove_comments(part)
                        .split_whitespace()
                        .map(ToOwned::to_owned)
                        .collect_vec()
                })
                .collect_vec();

            let marks = calc_marks(&groups)?;

            for group in apply_marks(&groups, &marks) {
                let line = group
                    .iter()
                    .map(|marked| match marked.mark {
                        Mark::None => marked.token.clone(),
                        Mark::Merged => marked.token.yellow().to_string(),
                        Mark::Cancelled => marked.token.red().strikethrough().to_string(),
                    })
                    .join(" ");
                println!("{line}");
            }
        }
        Commands::Boundary { phase, algorithm } => {
            let algorithm = notation::parse(&algorithm)?;

            if check_boundary(phase, &algorithm)? {
                println!("{}", "Legal".green());
            } else {
                println!("{}", "Illegal".red());
            }
        }
        Commands::Chain { file, leaf } => {
            let chain = ChainFile::load(&file)?.into_chain()?;

            let leaf = match leaf {
                Some(leaf) => Some(SubmissionId(leaf)),
                None => chain
                    .store
                    .iter()
                    .last()
                    .map(|submission| submission.id),
            };
            let phases = flatten_phases(&chain.store, &chain.scramble, leaf)?;

            for entry in phases {
                println!(
                    "{} {} {} | {} {} {}",
                    entry.phase.bold(),
                    entry.status,
                    notation::remove_comments(&entry.solution).trim(),
                    entry.accounting.moves,
                    entry.accounting.cumulative_moves.cyan(),
                    format!("-{}", entry.accounting.cancel_moves).dimmed(),
                );
            }
        }
        Commands::Score { scramble, solution } => {
            let moves = final_moves_or_dnf(&scramble, &solution, &config);

            if moves.is_result() {
                println!("{}", moves.green());
            } else {
                println!("{}", moves.red());
            }
        }
    }

    Ok(())
}
