//! Board generation and cell-reveal engine for minesweeper.
//!
//! A [`Board`] owns its grid of [`Cell`]s, places the mines when it is built and then takes
//! reveal and flag moves from whatever presentation layer drives it. Nothing here renders,
//! reads input or persists state.

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod generator;
mod layout;
mod types;
