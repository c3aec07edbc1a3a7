//! Cross-cutting helpers shared by the binaries and library crates.

pub mod utils;
