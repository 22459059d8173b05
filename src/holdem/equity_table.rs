use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use tracing::{debug, event, trace_span, warn};

use super::{MonteCarloGame, PocketHand, SimulationResult};
use crate::core::{Card, PokerError};

/// The table has one equity column per opponent count, 1 through 8.
pub const MAX_OPPONENTS: usize = 8;

const DEFAULT_TRIALS: usize = 1_000;

/// Equity of one pocket hand against every table size.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquityRow {
    pub hand: PocketHand,
    pub pair: bool,
    pub suited: bool,
    pub connected: bool,
    /// `equity[n - 1]` is the percentage against `n` opponents. `None` when
    /// that table size wasn't simulated.
    pub equity: [Option<f64>; MAX_OPPONENTS],
}

impl EquityRow {
    pub fn new(hand: PocketHand) -> Self {
        Self {
            hand,
            pair: hand.is_pair(),
            suited: hand.is_suited(),
            connected: hand.is_connected(),
            equity: [None; MAX_OPPONENTS],
        }
    }

    /// Equity against `opponents` players.
    pub fn against(&self, opponents: usize) -> Option<f64> {
        opponents
            .checked_sub(1)
            .and_then(|idx| self.equity.get(idx).copied().flatten())
    }

    fn write_csv<W: Write>(&self, w: &mut W) -> Result<(), PokerError> {
        write!(
            w,
            "{},{},{},{}",
            self.hand,
            csv_bool(self.pair),
            csv_bool(self.suited),
            csv_bool(self.connected)
        )?;
        for equity in &self.equity {
            match equity {
                Some(e) => write!(w, ",{e}")?,
                None => write!(w, ",")?,
            }
        }
        writeln!(w)?;
        Ok(())
    }

    fn parse_csv(line: &str) -> Result<Self, PokerError> {
        let bad_row = || PokerError::InvalidTableRow(line.to_string());
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [label, pair, suited, connected, equities @ ..] = fields.as_slice() else {
            return Err(bad_row());
        };
        if equities.len() != MAX_OPPONENTS {
            return Err(bad_row());
        }

        let mut row = Self::new(label.parse()?);
        let flags = [parse_bool(pair), parse_bool(suited), parse_bool(connected)];
        if flags != [Some(row.pair), Some(row.suited), Some(row.connected)] {
            return Err(bad_row());
        }
        for (slot, cell) in row.equity.iter_mut().zip(equities) {
            if !cell.is_empty() {
                *slot = Some(cell.parse().map_err(|_| bad_row())?);
            }
        }
        Ok(row)
    }
}

/// Booleans are spelled `True` and `False` in the table.
fn csv_bool(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "True" | "true" => Some(true),
        "False" | "false" => Some(false),
        _ => None,
    }
}

fn csv_header() -> String {
    let mut header = String::from("pocket_cards,pair,suited,connected");
    for n in 1..=MAX_OPPONENTS {
        header.push_str(&format!(",win_pct{n}"));
    }
    header
}

/// A single (hand, table size) simulation that did not produce a number.
#[derive(Debug)]
pub struct SweepFailure {
    pub hand: PocketHand,
    pub opponents: usize,
    pub error: PokerError,
}

/// Starting hand equities, one row per pocket hand, indexed by hand.
#[derive(Debug, Default)]
pub struct EquityTable {
    rows: Vec<EquityRow>,
    index: HashMap<PocketHand, usize>,
    failures: Vec<SweepFailure>,
}

impl EquityTable {
    /// Build a table from rows. Each pocket hand may appear once.
    pub fn new(rows: Vec<EquityRow>) -> Result<Self, PokerError> {
        let mut index = HashMap::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            if index.insert(row.hand, idx).is_some() {
                return Err(PokerError::InvalidTableRow(format!(
                    "duplicate hand {}",
                    row.hand
                )));
            }
        }
        Ok(Self {
            rows,
            index,
            failures: vec![],
        })
    }

    pub fn rows(&self) -> &[EquityRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Simulations that failed while this table was being swept.
    pub fn failures(&self) -> &[SweepFailure] {
        &self.failures
    }

    pub fn get(&self, hand: &PocketHand) -> Option<&EquityRow> {
        self.index.get(hand).map(|idx| &self.rows[*idx])
    }

    /// Find the row for two cards given in either order.
    ///
    /// Two copies of the same card are never in the table.
    pub fn lookup(&self, a: Card, b: Card) -> Option<&EquityRow> {
        let hand = PocketHand::new(a, b).ok()?;
        self.get(&hand)
    }

    /// Find the row for a label such as `"Ts_Kh"` or `"KhTs"`.
    pub fn lookup_label(&self, label: &str) -> Result<Option<&EquityRow>, PokerError> {
        let hand: PocketHand = label.parse()?;
        Ok(self.get(&hand))
    }

    /// Write the table as csv with a header row.
    pub fn write_csv<W: Write>(&self, mut w: W) -> Result<(), PokerError> {
        writeln!(w, "{}", csv_header())?;
        for row in &self.rows {
            row.write_csv(&mut w)?;
        }
        w.flush()?;
        Ok(())
    }

    /// Read a table written by `write_csv`.
    pub fn read_csv<R: BufRead>(r: R) -> Result<Self, PokerError> {
        let mut lines = r.lines();
        let header = lines.next().transpose()?.unwrap_or_default();
        if header.trim() != csv_header() {
            return Err(PokerError::InvalidTableRow(header));
        }

        let mut rows = vec![];
        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(EquityRow::parse_csv(&line)?);
        }
        Self::new(rows)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PokerError> {
        self.write_csv(BufWriter::new(File::create(path)?))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PokerError> {
        Self::read_csv(BufReader::new(File::open(path)?))
    }

    /// Every row as a pretty printed json array.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, PokerError> {
        Ok(serde_json::to_string_pretty(&self.rows)?)
    }
}

/// Builder for an [`EquitySweep`].
///
/// ```
/// use holdem_equity::holdem::{EquitySweepBuilder, PocketHand};
///
/// let sweep = EquitySweepBuilder::default()
///     .hands(vec!["AsAh".parse::<PocketHand>().unwrap()])
///     .opponents(1..=2)
///     .trials(200)
///     .seed(7)
///     .build()
///     .unwrap();
/// let table = sweep.run().unwrap();
/// assert_eq!(1, table.len());
/// assert!(table.rows()[0].against(2).is_some());
/// assert!(table.rows()[0].against(3).is_none());
/// ```
#[derive(Debug, Default)]
pub struct EquitySweepBuilder {
    hands: Option<Vec<PocketHand>>,
    opponents: Option<RangeInclusive<usize>>,
    trials: Option<usize>,
    seed: u64,
    num_folding: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl EquitySweepBuilder {
    /// Only sweep these hands. Every pocket hand by default.
    pub fn hands(mut self, hands: Vec<PocketHand>) -> Self {
        self.hands = Some(hands);
        self
    }

    /// Table sizes to simulate. `1..=8` by default.
    pub fn opponents(mut self, opponents: RangeInclusive<usize>) -> Self {
        self.opponents = Some(opponents);
        self
    }

    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = Some(trials);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn num_folding(mut self, num_folding: usize) -> Self {
        self.num_folding = num_folding;
        self
    }

    /// Share a flag that stops the sweep once set.
    pub fn cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn build(self) -> Result<EquitySweep, PokerError> {
        let opponents = self.opponents.unwrap_or(1..=MAX_OPPONENTS);
        if opponents.is_empty() || *opponents.start() == 0 {
            return Err(PokerError::InvalidConfig("opponent range must start at 1"));
        }
        if *opponents.end() > MAX_OPPONENTS {
            return Err(PokerError::InvalidConfig("at most 8 opponents"));
        }
        let mut hands = self.hands.unwrap_or_else(PocketHand::all);
        hands.sort_unstable();
        hands.dedup();
        if hands.is_empty() {
            return Err(PokerError::InvalidConfig("no hands to sweep"));
        }

        Ok(EquitySweep {
            hands,
            opponents,
            trials: self.trials.unwrap_or(DEFAULT_TRIALS),
            seed: self.seed,
            num_folding: self.num_folding,
            cancel: self.cancel.unwrap_or_default(),
        })
    }
}

/// Simulates every (hand, opponent count) pair in parallel.
///
/// Each pair gets its own game and its own rng seeded from the sweep seed
/// and the pair itself, so the numbers don't depend on thread scheduling
/// or on which other hands are part of the sweep.
#[derive(Debug)]
pub struct EquitySweep {
    hands: Vec<PocketHand>,
    opponents: RangeInclusive<usize>,
    trials: usize,
    seed: u64,
    num_folding: usize,
    cancel: Arc<AtomicBool>,
}

impl EquitySweep {
    /// The flag that stops this sweep. Clone it to another thread.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    fn unit_seed(&self, hand: PocketHand, opponents: usize) -> u64 {
        let unit = (u64::from(hand.id()) << 8) | opponents as u64;
        self.seed ^ unit.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }

    fn run_unit(&self, hand: PocketHand, opponents: usize) -> Result<SimulationResult, PokerError> {
        if self.is_cancelled() {
            return Err(PokerError::Cancelled);
        }
        let mut rng = StdRng::seed_from_u64(self.unit_seed(hand, opponents));
        let mut game = MonteCarloGame::new(hand, opponents, self.num_folding)?;
        let result = game.estimate_equity(self.trials, &mut rng)?;
        debug!(%hand, opponents, equity = result.equity(), "Finished sweep unit");
        Ok(result)
    }

    /// Run the whole sweep on the rayon pool.
    ///
    /// A unit that fails is logged and kept in `EquityTable::failures`
    /// while the rest of the sweep carries on. Cancelling stops any unit
    /// that hasn't started and fails the sweep.
    pub fn run(&self) -> Result<EquityTable, PokerError> {
        let span = trace_span!(
            "EquitySweep::run",
            hands = self.hands.len(),
            trials = self.trials
        );
        let _enter = span.enter();

        let units: Vec<(PocketHand, usize)> = self
            .hands
            .iter()
            .flat_map(|hand| self.opponents.clone().map(move |n| (*hand, n)))
            .collect();
        event!(
            tracing::Level::INFO,
            units = units.len(),
            "Starting equity sweep"
        );

        let outcomes: Vec<(PocketHand, usize, Result<SimulationResult, PokerError>)> = units
            .par_iter()
            .map(|(hand, n)| (*hand, *n, self.run_unit(*hand, *n)))
            .collect();

        if self.is_cancelled() {
            warn!("Equity sweep cancelled");
            return Err(PokerError::Cancelled);
        }
        self.assemble(outcomes)
    }

    fn assemble(
        &self,
        outcomes: Vec<(PocketHand, usize, Result<SimulationResult, PokerError>)>,
    ) -> Result<EquityTable, PokerError> {
        let mut table = EquityTable::new(self.hands.iter().copied().map(EquityRow::new).collect())?;
        for (hand, opponents, outcome) in outcomes {
            match outcome {
                Ok(result) => {
                    if let Some(idx) = table.index.get(&hand) {
                        table.rows[*idx].equity[opponents - 1] = Some(result.equity());
                    }
                }
                Err(PokerError::Cancelled) => return Err(PokerError::Cancelled),
                Err(error) => {
                    warn!(%hand, opponents, %error, "Sweep unit failed");
                    table.failures.push(SweepFailure {
                        hand,
                        opponents,
                        error,
                    });
                }
            }
        }
        Ok(table)
    }
}
