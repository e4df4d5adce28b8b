//! # Base types for raychess
//!
//! This is an auxiliary crate for `raychess`, which contains the value types and the piece
//! geometry. Everything here is pure and doesn't know about the board contents.
//!
//! Normally you don't want to use this crate directly. Use `raychess` instead.

pub mod geometry;
pub mod square_set;
pub mod types;
