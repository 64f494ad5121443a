//! Decorative full-page backdrop: drifting particles joined by proximity
//! lines over a layer of slowly spinning code glyphs, pulled toward the
//! pointer and repopulated on every resize.
//!
//! The simulation core ([`backdrop::Engine`]) only needs a [`backdrop::Canvas`]
//! to draw into; [`backdrop::BackdropPlugin`] hosts it inside a Bevy app.

pub mod backdrop;
pub mod config;
