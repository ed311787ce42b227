//! `urlintitle options show|set|reset`.

use anyhow::Result;
use urlintitle_core::config::{OptionsSource, OptionsStore};

/// Fields to change; `None` keeps the saved value.
#[derive(Debug, Default)]
pub struct OptionsUpdate {
    pub format: Option<String>,
    pub is_whitelist: Option<bool>,
    pub regexps: Option<Vec<String>>,
}

pub fn run_options_show(store: &OptionsStore) -> Result<()> {
    let options = store.load()?;
    println!("format: {}", options.format);
    println!(
        "url filter: {}",
        if options.url_filter_is_whitelist {
            "whitelist"
        } else {
            "blacklist"
        }
    );
    if options.url_filter_regexps.is_empty() {
        println!("url filter regexps: (none)");
    } else {
        println!("url filter regexps:");
        for regexp in &options.url_filter_regexps {
            println!("  {regexp}");
        }
    }
    Ok(())
}

/// Applies `update` on top of the saved options. Invalid patterns abort
/// without touching the saved file.
pub fn run_options_set(store: &OptionsStore, update: OptionsUpdate) -> Result<()> {
    let mut options = store.load()?;
    if let Some(format) = update.format {
        options.format = format;
    }
    if let Some(is_whitelist) = update.is_whitelist {
        options.url_filter_is_whitelist = is_whitelist;
    }
    if let Some(regexps) = update.regexps {
        options.url_filter_regexps = regexps;
    }
    store.save(options)?;
    println!("Options saved.");
    Ok(())
}

pub fn run_options_reset(store: &OptionsStore) -> Result<()> {
    store.clear()?;
    println!("Options saved.");
    Ok(())
}
