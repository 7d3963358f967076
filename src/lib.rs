pub mod app;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod model;
pub mod range;
pub mod source;
pub mod stats;
pub mod ui;
pub mod view;
pub mod visual;
