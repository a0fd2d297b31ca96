pub mod config;
pub mod recovery;
