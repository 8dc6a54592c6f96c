//! hexview
//!
//! Terminal hex viewer. Renders a file as fixed-width lines through a
//! pipeline of column transforms onto a scrollable pad, loading only a
//! window of the file around the viewport.
//!
//! Follows a Pure Core / Impure Shell split: `model`, `pipeline`,
//! `view_state` and `state` are testable without a terminal; `view` owns
//! the terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod plugins;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
