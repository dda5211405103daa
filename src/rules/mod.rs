//! Game rules: legal move generation and win evaluation.
//!
//! Both are pure functions over player values and the setup. `GameState`
//! calls into them when it is built.

pub mod movegen;
pub mod win;

pub use movegen::{has_single_move, legal_double_moves, legal_single_moves};
pub use win::{decide, Outcome, WinCheck};
