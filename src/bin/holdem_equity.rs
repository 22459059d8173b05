use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use holdem_equity::core::PokerError;
use holdem_equity::holdem::{
    EquitySweepBuilder, EquityTable, HandKind, MAX_OPPONENTS, MonteCarloGame, PocketHand,
    winning_category_counts,
};
use rand::rngs::StdRng;
use rand::{SeedableRng, rng};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(name = "holdem_equity")]
#[command(about = "Monte carlo equity for Texas Hold'em starting hands")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the equity of one pocket hand
    Equity {
        /// Pocket hand such as AsKd or Ts_Kh
        hand: PocketHand,
        /// Number of opponents
        #[arg(short, long, default_value_t = 1)]
        opponents: usize,
        #[arg(short, long, default_value_t = 1_000)]
        trials: usize,
        /// Opponents that fold before showdown
        #[arg(short, long, default_value_t = 0)]
        folding: usize,
        /// Seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Simulate every pocket hand against 1 to 8 opponents and write a csv
    Sweep {
        /// Where to write the table
        #[arg(short, long, default_value = "pocket_hand_wins.csv")]
        output: PathBuf,
        #[arg(short, long, default_value_t = 1_000)]
        trials: usize,
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = MAX_OPPONENTS)]
        max_opponents: usize,
        #[arg(short, long, default_value_t = 0)]
        folding: usize,
        /// Only sweep these hands
        #[arg(long, value_delimiter = ',')]
        hands: Vec<PocketHand>,
        /// Give up after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Also print the table as json
        #[arg(long)]
        json: bool,
    },
    /// Look a hand up in a saved table
    Lookup {
        /// Table written by the sweep command
        #[arg(short, long, default_value = "pocket_hand_wins.csv")]
        table: PathBuf,
        /// Pocket hand label, either card order
        hand: String,
    },
    /// Generate random pocket hands of a kind
    Generate {
        /// suited, pairs, connected or connected_suited
        kind: HandKind,
        #[arg(short, long, default_value_t = 1)]
        count: usize,
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Count which hand categories win showdowns
    Winners {
        #[arg(short, long, default_value_t = 2)]
        players: usize,
        #[arg(short, long, default_value_t = 10_000)]
        trials: usize,
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rng()),
    }
}

fn run(command: Commands) -> Result<(), PokerError> {
    match command {
        Commands::Equity {
            hand,
            opponents,
            trials,
            folding,
            seed,
        } => {
            let mut game = MonteCarloGame::new(hand, opponents, folding)?;
            let result = game.estimate_equity(trials, &mut seeded(seed))?;
            println!(
                "{hand} vs {opponents}: {:.2}% +/- {:.2} ({} wins, {} ties, {} losses)",
                result.equity(),
                result.standard_error(),
                result.wins(),
                result.ties(),
                result.losses()
            );
        }
        Commands::Sweep {
            output,
            trials,
            seed,
            max_opponents,
            folding,
            hands,
            timeout_secs,
            json,
        } => {
            let mut builder = EquitySweepBuilder::default()
                .opponents(1..=max_opponents)
                .trials(trials)
                .seed(seed)
                .num_folding(folding);
            if !hands.is_empty() {
                builder = builder.hands(hands);
            }
            let sweep = builder.build()?;

            if let Some(secs) = timeout_secs {
                let cancel = sweep.cancel_handle();
                thread::spawn(move || {
                    thread::sleep(Duration::from_secs(secs));
                    cancel.store(true, std::sync::atomic::Ordering::Relaxed);
                });
            }

            let table = sweep.run()?;
            table.save(&output)?;
            println!("Wrote {} rows to {}", table.len(), output.display());
            for failure in table.failures() {
                eprintln!(
                    "{} vs {} failed: {}",
                    failure.hand, failure.opponents, failure.error
                );
            }
            if json {
                println!("{}", table.to_json()?);
            }
        }
        Commands::Lookup { table, hand } => {
            let table = EquityTable::load(&table)?;
            match table.lookup_label(&hand)? {
                Some(row) => {
                    println!(
                        "{} pair={} suited={} connected={}",
                        row.hand, row.pair, row.suited, row.connected
                    );
                    for n in 1..=MAX_OPPONENTS {
                        if let Some(equity) = row.against(n) {
                            println!("  vs {n}: {equity:.2}%");
                        }
                    }
                }
                None => println!("{hand} is not in the table"),
            }
        }
        Commands::Generate { kind, count, seed } => {
            let mut rng = seeded(seed);
            for _ in 0..count {
                println!("{}", kind.generate(&mut rng)?);
            }
        }
        Commands::Winners {
            players,
            trials,
            seed,
        } => {
            let counts = winning_category_counts(players, trials, &mut seeded(seed))?;
            for (category, count) in counts.iter().collect::<Vec<_>>().into_iter().rev() {
                let pct = count as f64 / counts.total().max(1) as f64 * 100.0;
                println!("{:<16} {count:>8} {pct:>6.2}%", category.label());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
