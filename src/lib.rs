pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod corpus;
pub mod logging;
pub mod metrics;
pub mod search;
pub mod web;

pub use config::Config;
pub use corpus::{CorpusSource, InMemoryCorpus, JsonCorpus, Record};
pub use search::RankingEngine;
