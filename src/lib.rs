//! Falling-block puzzle engine.
//!
//! The engine lives in [`game`] and is built from the static piece
//! [`catalog`], live [`piece`] instances and the [`board`]. Renderers read a
//! [`snapshot`]; drivers feed the engine through the [`command`] seam.

pub mod board;
pub mod catalog;
pub mod command;
pub mod game;
pub mod piece;
pub mod snapshot;
