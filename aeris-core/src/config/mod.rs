//! Configuration type definitions

mod types;

pub use types::FrcConfig;
