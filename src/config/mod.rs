//! Configuration module for the ledger engine
//!
//! Holds the user preferences that shape period and schedule computation:
//! payday, weekend adjustment, short-month policy and display format.

pub mod settings;

pub use settings::Settings;
