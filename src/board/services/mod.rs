//! Application services for the task board.

mod controller;

pub use controller::{
    BoardError, BoardResult, IgnoredMove, LoadOutcome, MoveOutcome, TaskBoardController,
    choose_initial_team,
};
