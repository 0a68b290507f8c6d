//! sqlx-backed executors and schema reflection for the pagination engine.

pub mod error;
pub mod sql;
