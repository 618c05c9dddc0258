//! Helper functions shared by the content pipeline and its outputs

mod date;

pub use date::*;
