//! Core of the Flatpress to LaTeX converter: entries, parsing, filtering and
//! the ports the adapters plug into.
pub mod application;
pub mod domain;
pub mod error;
pub mod parser;
pub mod ports;
pub mod utils;
