#[macro_use]
extern crate rust_i18n;

pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod rota;
pub mod startup;
pub mod utils;

// Initialize i18n
i18n!("locales", fallback = "en");
