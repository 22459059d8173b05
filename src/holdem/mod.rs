/// Module that can generate possible cards for a starting hand.
mod starting_hand;
/// Export `StartingHand`
pub use self::starting_hand::{StartingHand, Suitedness};

/// Two card pocket hands, their label codec and the category generator.
mod pocket;
/// Export `PocketHand`
pub use self::pocket::{HandKind, PocketHand, generate};

/// Deciding who won once every card is out.
mod showdown;
pub use self::showdown::{Outcome, best_category, resolve};

/// Export the Monte Carlo simulation.
mod monte_carlo_game;
pub use self::monte_carlo_game::{
    CategoryCounts, MonteCarloGame, SimulationResult, WinningHandGame, estimate_equity,
    winning_category, winning_category_counts,
};

/// The full table of starting hand equities.
mod equity_table;
pub use self::equity_table::{
    EquityRow, EquitySweep, EquitySweepBuilder, EquityTable, MAX_OPPONENTS, SweepFailure,
};
