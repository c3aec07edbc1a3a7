//! Document tables for parliamentary records.
//!
//! Each record kind lives in its own `(id, data jsonb)` table. Dossiers and
//! members are addressed by a natural key taken from inside the document and
//! written with an atomic insert-or-replace; votes, meetings and amendments are
//! plain inserts. Every call takes the connection (or transaction) to run on.

pub mod errors;
pub mod db;
pub mod document;
pub mod dossier;
pub mod member;
pub mod vote;
pub mod meeting;
pub mod amendment;
mod scope;

pub use errors::ModelError;

#[cfg(test)]
mod tests;
