use rand::Rng;
use rand::seq::index::sample;
use tracing::{event, trace_span};

use super::{Outcome, PocketHand, best_category, resolve};
use crate::core::{Card, Deck, FlatDeck, HandCategory, PokerError};

/// Cards needed for the board once the three burns are included.
const BOARD_WITH_BURNS: usize = 8;

/// Make sure `players` hole hands plus a burned board fit in `available`.
fn check_table(players: usize, available: usize) -> Result<(), PokerError> {
    if players == 0 {
        return Err(PokerError::EmptyOpponentPool);
    }
    let requested = players * 2 + BOARD_WITH_BURNS;
    if requested > available {
        return Err(PokerError::InsufficientDeck {
            requested,
            remaining: available,
        });
    }
    Ok(())
}

/// Deal two cards to every player and then the board.
///
/// The flop, turn and river each have a card burned in front of them.
fn deal_table(
    deck: &mut FlatDeck,
    players: usize,
    holes: &mut Vec<[Card; 2]>,
    board: &mut Vec<Card>,
) -> Result<(), PokerError> {
    holes.clear();
    for _ in 0..players {
        let hole = deck.deal_n(2)?;
        holes.push([hole[0], hole[1]]);
    }

    board.clear();
    for street in [3, 1, 1] {
        deck.burn()?;
        board.extend_from_slice(deck.deal_n(street)?);
    }
    Ok(())
}

/// Win, tie and loss counts for one pocket hand against one table size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    wins: usize,
    ties: usize,
    losses: usize,
}

impl SimulationResult {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Loss => self.losses += 1,
        }
    }

    pub fn wins(&self) -> usize {
        self.wins
    }

    pub fn ties(&self) -> usize {
        self.ties
    }

    pub fn losses(&self) -> usize {
        self.losses
    }

    pub fn trials(&self) -> usize {
        self.wins + self.ties + self.losses
    }

    /// Percentage of trials the hero won or tied, in `[0, 100]`.
    ///
    /// An empty result has no equity.
    pub fn equity(&self) -> f64 {
        let trials = self.trials();
        if trials == 0 {
            return 0.0;
        }
        (self.wins + self.ties) as f64 / trials as f64 * 100.0
    }

    /// Standard error of `equity`, also as a percentage.
    pub fn standard_error(&self) -> f64 {
        let trials = self.trials();
        if trials == 0 {
            return 0.0;
        }
        let p = self.equity() / 100.0;
        (p * (1.0 - p) / trials as f64).sqrt() * 100.0
    }

    /// Fold another batch of trials into this one.
    pub fn merge(&mut self, other: &SimulationResult) {
        self.wins += other.wins;
        self.ties += other.ties;
        self.losses += other.losses;
    }
}

/// Monte Carlo estimate of how often one pocket hand holds up against a
/// number of random opponents.
///
/// The playing deck is built once from every card the hero doesn't hold
/// and then reshuffled for every trial.
#[derive(Debug, Clone)]
pub struct MonteCarloGame {
    hero: PocketHand,
    num_opponents: usize,
    num_folding: usize,
    /// Every card except the hero's.
    deck: FlatDeck,
    /// Opponent hole cards for the current trial.
    opponents: Vec<[Card; 2]>,
    /// Board for the current trial.
    board: Vec<Card>,
}

impl MonteCarloGame {
    /// Set up a game for `hero` against `num_opponents` players.
    ///
    /// If `num_folding` is strictly between zero and `num_opponents` that
    /// many opponents, picked at random, fold before the showdown of each
    /// trial. Any other value means nobody folds.
    pub fn new(
        hero: PocketHand,
        num_opponents: usize,
        num_folding: usize,
    ) -> Result<Self, PokerError> {
        let deck: FlatDeck = Deck::default().without(&hero.cards()).into();
        check_table(num_opponents, deck.len())?;

        Ok(Self {
            hero,
            num_opponents,
            num_folding,
            deck,
            opponents: Vec::with_capacity(num_opponents),
            board: Vec::with_capacity(5),
        })
    }

    pub fn hero(&self) -> PocketHand {
        self.hero
    }

    pub fn num_opponents(&self) -> usize {
        self.num_opponents
    }

    /// Play out a single trial.
    pub fn simulate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Outcome, PokerError> {
        self.deck.shuffle(rng);
        deal_table(
            &mut self.deck,
            self.num_opponents,
            &mut self.opponents,
            &mut self.board,
        )?;

        if self.num_folding > 0 && self.num_folding < self.opponents.len() {
            let mut folded = sample(rng, self.opponents.len(), self.num_folding).into_vec();
            // Highest index first so every swap_remove leaves the rest in place.
            folded.sort_unstable_by(|a, b| b.cmp(a));
            for idx in folded {
                self.opponents.swap_remove(idx);
            }
        }

        resolve(&self.hero.cards(), &self.opponents, &self.board)
    }

    /// Run `trials` independent trials.
    pub fn estimate_equity<R: Rng + ?Sized>(
        &mut self,
        trials: usize,
        rng: &mut R,
    ) -> Result<SimulationResult, PokerError> {
        let span = trace_span!(
            "MonteCarloGame::estimate_equity",
            hero = %self.hero,
            opponents = self.num_opponents,
            trials
        );
        let _enter = span.enter();

        let mut result = SimulationResult::default();
        for _ in 0..trials {
            result.record(self.simulate(rng)?);
        }

        event!(
            tracing::Level::TRACE,
            equity = result.equity(),
            wins = result.wins(),
            ties = result.ties(),
            "Simulation finished"
        );
        Ok(result)
    }
}

/// Equity percentage of `hero` against `num_opponents` random hands.
///
/// ```
/// use holdem_equity::holdem::{PocketHand, estimate_equity};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let hero: PocketHand = "7c2d".parse().unwrap();
/// let mut rng = StdRng::seed_from_u64(0);
/// let equity = estimate_equity(hero, 2, 500, 0, &mut rng).unwrap();
/// assert!((0.0..=100.0).contains(&equity));
/// ```
pub fn estimate_equity<R: Rng + ?Sized>(
    hero: PocketHand,
    num_opponents: usize,
    trials: usize,
    num_folding: usize,
    rng: &mut R,
) -> Result<f64, PokerError> {
    let mut game = MonteCarloGame::new(hero, num_opponents, num_folding)?;
    Ok(game.estimate_equity(trials, rng)?.equity())
}

/// Tally of winning hand categories over many deals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryCounts {
    counts: [usize; 9],
}

impl CategoryCounts {
    pub fn record(&mut self, category: HandCategory) {
        self.counts[usize::from(category.strength() - 1)] += 1;
    }

    pub fn get(&self, category: HandCategory) -> usize {
        self.counts[usize::from(category.strength() - 1)]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Each category with its count, weakest first.
    pub fn iter(&self) -> impl Iterator<Item = (HandCategory, usize)> + '_ {
        HandCategory::categories()
            .into_iter()
            .map(|category| (category, self.get(category)))
    }

    /// The category that won most often. Ties go to the stronger category.
    pub fn most_common(&self) -> Option<HandCategory> {
        self.iter()
            .filter(|(_, count)| *count > 0)
            .max_by_key(|(_, count)| *count)
            .map(|(category, _)| category)
    }
}

/// Deals complete tables from a full deck and reports which category
/// took the pot.
#[derive(Debug, Clone)]
pub struct WinningHandGame {
    num_players: usize,
    deck: FlatDeck,
    hands: Vec<[Card; 2]>,
    board: Vec<Card>,
}

impl WinningHandGame {
    pub fn new(num_players: usize) -> Result<Self, PokerError> {
        let deck = FlatDeck::default();
        check_table(num_players, deck.len())?;
        Ok(Self {
            num_players,
            deck,
            hands: Vec::with_capacity(num_players),
            board: Vec::with_capacity(5),
        })
    }

    /// Deal one table and return the winning category.
    pub fn simulate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<HandCategory, PokerError> {
        self.deck.shuffle(rng);
        deal_table(
            &mut self.deck,
            self.num_players,
            &mut self.hands,
            &mut self.board,
        )?;
        best_category(&self.hands, &self.board)
    }

    pub fn count<R: Rng + ?Sized>(
        &mut self,
        trials: usize,
        rng: &mut R,
    ) -> Result<CategoryCounts, PokerError> {
        let span = trace_span!(
            "WinningHandGame::count",
            players = self.num_players,
            trials
        );
        let _enter = span.enter();

        let mut counts = CategoryCounts::default();
        for _ in 0..trials {
            counts.record(self.simulate(rng)?);
        }
        Ok(counts)
    }
}

/// The winning category of a single random deal for `num_players`.
pub fn winning_category<R: Rng + ?Sized>(
    num_players: usize,
    rng: &mut R,
) -> Result<HandCategory, PokerError> {
    WinningHandGame::new(num_players)?.simulate(rng)
}

/// How often each category wins over `trials` random deals.
pub fn winning_category_counts<R: Rng + ?Sized>(
    num_players: usize,
    trials: usize,
    rng: &mut R,
) -> Result<CategoryCounts, PokerError> {
    WinningHandGame::new(num_players)?.count(trials, rng)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn pocket(s: &str) -> PocketHand {
        s.parse().unwrap()
    }

    #[test]
    fn test_simulation_result_counts() {
        let mut result = SimulationResult::default();
        assert_eq!(0.0, result.equity());
        assert_eq!(0.0, result.standard_error());

        result.record(Outcome::Win);
        result.record(Outcome::Tie);
        result.record(Outcome::Loss);
        result.record(Outcome::Loss);
        assert_eq!(4, result.trials());
        assert_abs_diff_eq!(50.0, result.equity());
        assert_abs_diff_eq!(25.0, result.standard_error());

        let mut merged = result;
        merged.merge(&result);
        assert_eq!(8, merged.trials());
        assert_eq!(2, merged.ties());
        assert_abs_diff_eq!(50.0, merged.equity());
    }

    #[test_log::test]
    fn test_aces_heads_up() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = MonteCarloGame::new(pocket("AsAh"), 1, 0).unwrap();
        let result = game.estimate_equity(50_000, &mut rng).unwrap();
        assert_eq!(50_000, result.trials());
        assert_abs_diff_eq!(85.5, result.equity(), epsilon = 1.0);
    }

    #[test]
    fn test_equity_drops_with_more_opponents() {
        let mut rng = StdRng::seed_from_u64(42);
        let equities: Vec<f64> = [1, 3, 6]
            .iter()
            .map(|n| estimate_equity(pocket("AsAh"), *n, 5_000, 0, &mut rng).unwrap())
            .collect();
        assert!(equities[0] > equities[1]);
        assert!(equities[1] > equities[2]);
    }

    #[test]
    fn test_aces_beat_seven_deuce() {
        let mut rng = StdRng::seed_from_u64(7);
        let aces = estimate_equity(pocket("AsAh"), 2, 5_000, 0, &mut rng).unwrap();
        let trash = estimate_equity(pocket("7c2d"), 2, 5_000, 0, &mut rng).unwrap();
        assert!(aces > trash);
    }

    #[test]
    fn test_folding_helps_the_hero() {
        let mut rng = StdRng::seed_from_u64(3);
        let full_table = estimate_equity(pocket("KcKd"), 5, 5_000, 0, &mut rng).unwrap();
        let folded = estimate_equity(pocket("KcKd"), 5, 5_000, 4, &mut rng).unwrap();
        assert!(folded > full_table + 10.0);
    }

    #[test]
    fn test_folding_everyone_is_ignored() {
        let hero = pocket("QhJh");
        for folding in [3, 10] {
            let mut one = StdRng::seed_from_u64(9);
            let mut two = StdRng::seed_from_u64(9);
            let with = MonteCarloGame::new(hero, 3, folding)
                .unwrap()
                .estimate_equity(1_000, &mut one)
                .unwrap();
            let without = MonteCarloGame::new(hero, 3, 0)
                .unwrap()
                .estimate_equity(1_000, &mut two)
                .unwrap();
            assert_eq!(with, without);
        }
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let mut one = StdRng::seed_from_u64(1234);
        let mut two = StdRng::seed_from_u64(1234);
        let a = estimate_equity(pocket("Ts9s"), 4, 2_000, 1, &mut one).unwrap();
        let b = estimate_equity(pocket("Ts9s"), 4, 2_000, 1, &mut two).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_trials() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = MonteCarloGame::new(pocket("AsAh"), 2, 0).unwrap();
        let result = game.estimate_equity(0, &mut rng).unwrap();
        assert_eq!(0, result.trials());
        assert_eq!(0.0, result.equity());
    }

    #[test]
    fn test_table_size_limits() {
        assert!(matches!(
            MonteCarloGame::new(pocket("AsAh"), 0, 0),
            Err(PokerError::EmptyOpponentPool)
        ));
        assert!(matches!(
            MonteCarloGame::new(pocket("AsAh"), 22, 0),
            Err(PokerError::InsufficientDeck {
                requested: 52,
                remaining: 50
            })
        ));

        // 21 opponents and a burned board use every remaining card.
        let mut rng = StdRng::seed_from_u64(5);
        let mut game = MonteCarloGame::new(pocket("AsAh"), 21, 0).unwrap();
        let result = game.estimate_equity(100, &mut rng).unwrap();
        assert_eq!(100, result.trials());
    }

    #[test]
    fn test_burns_leave_distinct_board() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut game = MonteCarloGame::new(pocket("2c2d"), 8, 0).unwrap();
        for _ in 0..200 {
            game.simulate(&mut rng).unwrap();
            assert_eq!(5, game.board.len());
            assert_eq!(8, game.opponents.len());
            // Hole cards, three burns and the board.
            assert_eq!(50 - 8 * 2 - 8, game.deck.len());
        }
    }

    #[test_log::test]
    fn test_winning_category_counts() {
        let mut rng = StdRng::seed_from_u64(17);
        let counts = winning_category_counts(6, 2_000, &mut rng).unwrap();
        assert_eq!(2_000, counts.total());
        // With six players somebody nearly always has at least a pair.
        assert!(counts.get(HandCategory::HighCard) < counts.get(HandCategory::TwoPair));
        assert!(counts.most_common().is_some());
        assert_eq!(9, counts.iter().count());
    }

    #[test]
    fn test_winning_category_errors() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            winning_category(0, &mut rng),
            Err(PokerError::EmptyOpponentPool)
        ));
        assert!(matches!(
            winning_category(23, &mut rng),
            Err(PokerError::InsufficientDeck { .. })
        ));
        assert!(winning_category(22, &mut rng).is_ok());
    }

    #[test]
    fn test_category_counts_most_common() {
        let mut counts = CategoryCounts::default();
        assert_eq!(None, counts.most_common());
        counts.record(HandCategory::Flush);
        counts.record(HandCategory::Flush);
        counts.record(HandCategory::OnePair);
        assert_eq!(Some(HandCategory::Flush), counts.most_common());
        assert_eq!(3, counts.total());
    }
}
