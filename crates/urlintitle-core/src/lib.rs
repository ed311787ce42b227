pub mod config;
pub mod logging;

// Rendering engine
pub mod controller;
pub mod env;
pub mod service;
pub mod tags;
pub mod template;
pub mod updater;
pub mod url_filter;
