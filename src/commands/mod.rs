//! Command implementations for the CLI
//!
//! - start: Start the HTTP service
//! - test: Test configuration validity
//! - config: Configuration display and validation
//! - quote: Itemized quote from the terminal
//! - prices: Inspect the stored price table

pub mod config;
pub mod prices;
pub mod quote;
pub mod start;
pub mod test;
