//! CLI command handlers, one file per command.

mod example;
mod options;
mod render;
mod serve;
mod tags;
mod watch;

pub use example::run_example;
pub use options::{run_options_reset, run_options_set, run_options_show, OptionsUpdate};
pub use render::run_render;
pub use serve::run_serve;
pub use tags::run_tags;
pub use watch::run_watch;
