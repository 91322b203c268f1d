//! List reconciliation engine.
//!
//! Reducer-style state updates plus side-effect commands: `reduce` is pure and
//! never suspends, `ListController` runs the resulting commands and feeds their
//! results back as actions.

mod action;
mod command;
mod reducer;
mod runtime;
mod state;
pub mod view;

pub use action::{Action, AsyncAction, ListAction};
pub use command::Command;
pub use reducer::reduce;
pub use runtime::ListController;
pub use state::{FetchKind, InFlightFetch, ListConfig, ListState, PendingToggle, ScreenState};

#[cfg(test)]
mod tests;
