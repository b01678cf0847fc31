pub mod competitions;
pub mod config;
pub mod display;
pub mod feed;
pub mod fixtures;
pub mod football_api;
pub mod http_cache;
pub mod league_metrics;
pub mod scorers;
pub mod standings;
pub mod state;
