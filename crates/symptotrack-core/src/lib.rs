//! Core types and engines for the SymptoTrack health tracker.
//!
//! This crate is free of database and terminal dependencies. Persistence goes
//! through the [`storage::KeyValueStore`] trait; backends such as
//! `symptotrack-store-sqlite` implement it.

pub mod achievements;
pub mod catalog;
pub mod error;
pub mod goal;
pub mod journal;
pub mod log;
pub mod matcher;
pub mod quiz;
pub mod storage;
pub mod trends;

pub use error::{Error, Result};
