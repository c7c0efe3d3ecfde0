//! Rules of a falling-block puzzle game, independent of any user interface.
//!
//! [`core`] holds the static data (board cells, piece templates, shapes) and
//! [`engine`] the moving parts: the active piece, scoring, the gravity timer
//! and the controller that ties them to a high-score store.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece collides with locked cells at its spawn position")]
pub struct PieceCollisionError;
