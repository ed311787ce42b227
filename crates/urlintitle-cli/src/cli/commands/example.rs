//! `urlintitle example [format]` – preview a format on the example page.

use anyhow::Result;
use urlintitle_core::config::{OptionsSource, OptionsStore};
use urlintitle_core::env::Environment;
use urlintitle_core::template;

pub fn run_example(store: &OptionsStore, format: Option<String>) -> Result<()> {
    let format = match format {
        Some(f) => f,
        None => store.load()?.format,
    };
    println!("{}", template::render(&format, &Environment::example()));
    Ok(())
}
