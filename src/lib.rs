//! Step-by-step perfect maze generation and best-first maze solving.
//!
//! The maze core is made of [`grid::Grid`], a flat arena of [`cell::Cell`] values. Two state
//! machines advance over it one bounded unit of work per call:
//!
//! - [`generator::Generator`], a randomized depth-first backtracker that carves a spanning tree
//!   of passages;
//! - [`solver::Solver`], a best-first search from the start cell to a goal cell through the carved
//!   passages.
//!
//! Neither owns any cells or renders anything, so any driver can animate them by calling `step`
//! once per tick and reading cell state in between. The crate ships one such driver, [`App`], a
//! terminal animation configured through [`Config`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod cell;
pub mod direction;
pub mod error;
pub mod generator;
pub mod grid;
pub mod solver;

mod app;
mod config;
mod events;
mod types;
mod ui;

pub use app::App;
pub use config::Config;
