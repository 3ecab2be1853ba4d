use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use game_cli::config::Config;
use game_cli::notifier::ConsoleNotifier;
use game_core::{LearningEngine, SystemClock, parse_word_list};
use game_persistence::FileStore;
use game_types::{DestinyUpgradeKind, GameName, UpgradeKind};

type Engine = LearningEngine<FileStore, StdRng, SystemClock>;

#[derive(Parser)]
#[command(name = "vocab-quest", version, about = "Vocabulary practice progression engine")]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import a word list (one `source<tab|;|,>target` pair per line)
    Import { path: PathBuf },
    /// Pick a practice session from the imported word list
    Select {
        #[arg(long)]
        count: Option<usize>,
    },
    /// Record an answer for a word
    #[command(group(ArgGroup::new("outcome").required(true).args(["correct", "wrong"])))]
    Record {
        word: String,
        #[arg(long)]
        correct: bool,
        #[arg(long)]
        wrong: bool,
    },
    /// Settle a finished round into coins
    Settle {
        game: GameName,
        #[arg(allow_negative_numbers = true)]
        score: i64,
        #[arg(long = "correct")]
        correct_count: Option<u32>,
        #[arg(long = "wrong")]
        wrong_count: Option<u32>,
    },
    /// Show coins and upgrade levels
    State,
    /// Show the most recent rounds
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show the high score table
    Scores,
    /// Forget every recorded answer
    ResetStats,
}

fn build_engine(config: &Config, notifier: &ConsoleNotifier) -> Engine {
    let rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut engine = LearningEngine::with_parts(
        FileStore::new(&config.data_dir),
        rng,
        SystemClock,
        config.engine_config(),
    );
    engine.add_handler(Box::new(notifier.clone()));
    engine
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli, config: Config) -> Result<()> {
    let notifier = ConsoleNotifier::new();
    let mut engine = build_engine(&config, &notifier);

    match cli.command {
        Command::Import { path } => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read word list {}", path.display()))?;
            let pairs = parse_word_list(&text)
                .with_context(|| format!("Failed to import {}", path.display()))?;
            engine.import_vocabulary(&pairs);
            if notifier.failed_writes() > 0 {
                bail!(
                    "Parsed {} word pairs from {} but could not save them",
                    pairs.len(),
                    path.display()
                );
            }
            if cli.json {
                print_json(&json!({ "imported": pairs.len() }))?;
            } else {
                println!("Imported {} word pairs", pairs.len());
            }
        }
        Command::Select { count } => {
            let Some(pairs) = engine.vocabulary() else {
                bail!("No word list imported yet; run `vocab-quest import <path>` first");
            };
            let selected = engine.select(&pairs, count.unwrap_or(config.session_size));
            if cli.json {
                print_json(&selected)?;
            } else {
                for pair in &selected {
                    println!("{}\t{}", pair.source_text, pair.target_text);
                }
            }
        }
        Command::Record { word, correct, .. } => {
            let stat = engine.record(&word, correct);
            if cli.json {
                print_json(&stat)?;
            } else {
                println!(
                    "{}: {} correct, {} wrong",
                    word, stat.correct_count, stat.incorrect_count
                );
            }
        }
        Command::Settle {
            game,
            score,
            correct_count,
            wrong_count,
        } => {
            let settlement = engine.settle(game, score, correct_count, wrong_count);
            if cli.json {
                print_json(&settlement)?;
            } else {
                println!(
                    "{} score {}: +{} coins ({})",
                    game, score, settlement.coins_earned, settlement.entry.timestamp
                );
            }
        }
        Command::State => {
            let state = engine.load_player_state();
            if cli.json {
                print_json(&state)?;
            } else {
                println!("Coins: {}", state.coins);
                println!("Destiny points: {}", state.destiny_points);
                for kind in UpgradeKind::ALL {
                    let level = state.level(kind);
                    if level > 0 {
                        println!("  {}: {}", kind, level);
                    }
                }
                for kind in DestinyUpgradeKind::ALL {
                    let level = state.destiny_level(kind);
                    if level > 0 {
                        println!("  {}: {}", kind, level);
                    }
                }
            }
        }
        Command::History { limit } => {
            let history: Vec<_> = engine.history().into_iter().take(limit).collect();
            if cli.json {
                print_json(&history)?;
            } else if history.is_empty() {
                println!("No rounds played yet");
            } else {
                for entry in &history {
                    println!("{}  {:<8} {}", entry.timestamp, entry.game, entry.score);
                }
            }
        }
        Command::Scores => {
            let scores = engine.high_scores();
            if cli.json {
                print_json(&scores)?;
            } else {
                for game in GameName::ALL {
                    println!("{:<8} {}", game, scores.get(game));
                }
            }
        }
        Command::ResetStats => {
            engine.clear_vocab_stats();
            if !cli.json && notifier.failed_writes() == 0 {
                println!("Vocabulary stats cleared");
            }
        }
    }

    let failed = notifier.failed_documents();
    if !failed.is_empty() {
        bail!("Progress not saved for {:?}", failed);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Invalid configuration")?;
    info!("Using data directory {}", config.data_dir.display());

    run(cli, config)
}
