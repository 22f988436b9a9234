//! Spelling Hive - CLI
//!
//! Generates, rescores and inspects seven-letter word puzzles.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use spelling_hive::{
    commands::{GenerateMode, compare_puzzles, rank_uniqueness, run_generate, solve_puzzle},
    config::GeneratorConfig,
    generator::{CancelFlag, GenerationPolicy, RunStatus},
    output::{
        ReportMode, print_overlap, print_run_summary, print_solve_result, print_uniqueness,
    },
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use tokio::signal;

#[derive(Parser)]
#[command(
    name = "spelling_hive",
    about = "Generate and solve seven-letter word puzzles",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Main word list, one word per line
    #[arg(short = 'w', long, global = true)]
    wordlist: Option<PathBuf>,

    /// Directory holding one JSON file per puzzle
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Worker threads for scanning the word list
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,

    /// Log level: error, warn, info, debug, trace (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate puzzles: sampled, for given letters, or by rescoring all
    Generate {
        /// Letters for a manual puzzle; the first is the center letter
        letters: Option<String>,

        /// Rescore every stored puzzle under the current rules
        #[arg(short, long, conflicts_with = "letters")]
        regenerate: bool,

        /// Number of valid puzzles to generate
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Maximum sampling attempts
        #[arg(long)]
        max_tries: Option<usize>,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Report format for valid puzzles
        #[arg(long, value_enum)]
        print_valid: Option<ReportMode>,

        /// Report format for invalid puzzles
        #[arg(long, value_enum)]
        print_invalid: Option<ReportMode>,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Show every answer of a puzzle, creating it if needed
    Solve {
        /// Puzzle letters; the first is the center letter
        letters: String,
    },

    /// Rank stored puzzles by uniqueness, least unique first
    Uniq {
        /// Puzzle directories, letters or files (default: the data directory)
        targets: Vec<String>,
    },

    /// Show the words two puzzles have in common
    Compare {
        /// First puzzle (letters or file)
        first: String,
        /// Second puzzle (letters or file)
        second: String,
    },
}

/// Acceptance rule overrides
#[derive(Args, Default)]
struct PolicyArgs {
    #[arg(long)]
    min_word_length: Option<usize>,
    #[arg(long)]
    total_letter_count: Option<usize>,
    #[arg(long)]
    count_pangrams: Option<usize>,
    #[arg(long)]
    min_word_count: Option<usize>,
    #[arg(long)]
    max_word_count: Option<usize>,
    #[arg(long)]
    min_total_score: Option<u32>,
    #[arg(long)]
    max_total_score: Option<u32>,
    #[arg(long)]
    max_plurals: Option<usize>,
    #[arg(long)]
    max_gerunds: Option<usize>,
    #[arg(long)]
    max_preterite: Option<usize>,
    /// Stop limiting -S pairs
    #[arg(long)]
    no_cap_plurals: bool,
    /// Stop limiting -ING pairs
    #[arg(long)]
    no_cap_gerunds: bool,
    /// Stop limiting -ED pairs
    #[arg(long)]
    no_cap_preterite: bool,
}

impl PolicyArgs {
    fn apply(&self, policy: &mut GenerationPolicy) {
        macro_rules! set {
            ($($field:ident),*) => {
                $(if let Some(value) = self.$field {
                    policy.$field = value;
                })*
            };
        }
        set!(
            min_word_length,
            total_letter_count,
            count_pangrams,
            min_word_count,
            max_word_count,
            min_total_score,
            max_total_score,
            max_plurals,
            max_gerunds,
            max_preterite
        );
        policy.cap_plurals &= !self.no_cap_plurals;
        policy.cap_gerunds &= !self.no_cap_gerunds;
        policy.cap_preterite &= !self.no_cap_preterite;
    }
}

fn init_logging(level: &str) {
    env_logger::Builder::new()
        .filter_level(level.parse().unwrap_or(log::LevelFilter::Warn))
        .parse_default_env()
        .init();
}

/// Load the config file and apply the global flags
fn load_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = GeneratorConfig::load(cli.config.as_deref())?;
    if let Some(path) = &cli.wordlist {
        config.word_list_path.clone_from(path);
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir.clone_from(dir);
    }
    if let Some(threads) = cli.threads {
        config.threads = threads.max(1);
    }
    Ok(config)
}

/// Cancel the flag on Ctrl-C
///
/// The signal is awaited on a small runtime of its own, so the generation
/// loop stays synchronous.
fn watch_interrupt(cancel: CancelFlag) {
    let spawned = thread::Builder::new()
        .name("interrupt".into())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_io()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    log::warn!("Unable to listen for interrupts: {e}");
                    return;
                }
            };
            runtime.block_on(async {
                match signal::ctrl_c().await {
                    Ok(()) => {
                        log::info!("Received interrupt");
                        cancel.cancel();
                    }
                    Err(e) => log::warn!("Unable to listen for interrupts: {e}"),
                }
            });
        });
    if let Err(e) = spawned {
        log::warn!("Unable to listen for interrupts: {e}");
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Generate {
            letters,
            regenerate,
            count,
            max_tries,
            seed,
            print_valid,
            print_invalid,
            policy,
        } => {
            if let Some(count) = count {
                config.puzzle_count = count;
            }
            if let Some(max_tries) = max_tries {
                config.max_puzzle_tries = max_tries;
            }
            if let Some(mode) = print_valid {
                config.print_valid = mode;
            }
            if let Some(mode) = print_invalid {
                config.print_invalid = mode;
            }
            policy.apply(&mut config.policy);

            let mode = match letters {
                Some(text) => GenerateMode::Manual(text),
                None if regenerate => GenerateMode::Regenerate,
                None => GenerateMode::Batch,
            };

            let cancel = CancelFlag::new();
            watch_interrupt(cancel.clone());

            let summary = run_generate(&config, &mode, seed, &cancel)?;
            print_run_summary(&summary, &mode);
            if summary.status == RunStatus::Cancelled {
                return Ok(ExitCode::from(130));
            }
        }
        Commands::Solve { letters } => {
            let result = solve_puzzle(&config, &letters)
                .with_context(|| format!("Could not solve {letters}"))?;
            print_solve_result(&result);
        }
        Commands::Uniq { targets } => {
            let rows = rank_uniqueness(&targets, &config.data_dir)?;
            print_uniqueness(&rows);
        }
        Commands::Compare { first, second } => {
            let overlap = compare_puzzles(&first, &second, &config.data_dir)?;
            print_overlap(&overlap);
        }
    }

    Ok(ExitCode::SUCCESS)
}
