pub mod analytics;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod store;
#[cfg(test)]
pub mod test_helpers;
