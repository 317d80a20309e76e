//! Simulation core: grid, transition rule, history, patterns, persistence
//! and the session that ties them together.
//!
//! Nothing in here touches the terminal. The front end reads state through
//! [`Session`] and drives it with [`Command`]s and resolved grid coordinates.

pub mod codec;
pub mod error;
pub mod grid;
pub mod history;
pub mod patterns;
pub mod rules;
pub mod session;
pub mod stats;

pub use error::{DecodeError, GridError, PatternError, PersistError};
pub use grid::{Boundary, Grid};
pub use history::History;
pub use patterns::{library, Pattern};
pub use session::{Command, DrawMode, Playback, Session};
pub use stats::Statistics;
