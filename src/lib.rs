//! Satellite position tracking on top of SGP4.
//!
//! TLE files are fetched and cached by [`catalog`], propagated and turned
//! into subpoints and look angles by [`predict`], and streamed by
//! [`tracker`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod predict;
pub mod report;
pub mod tracker;
