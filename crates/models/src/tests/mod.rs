/// Live-database helpers shared by the store tests
pub mod support;
