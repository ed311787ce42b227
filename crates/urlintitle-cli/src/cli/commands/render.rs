//! `urlintitle render <url> <title>` – render one title.

use anyhow::{Context, Result};
use urlintitle_core::config::{Options, OptionsSource, OptionsStore};
use urlintitle_core::env::{Environment, Location};
use urlintitle_core::template::normalize_title;
use urlintitle_core::updater::{self, TitleUpdate};
use urlintitle_core::url_filter::UrlFilter;

/// Prints the formatted title, or nothing when the URL filter rejects `url`.
pub fn run_render(
    store: &OptionsStore,
    url: &str,
    title: &str,
    format: Option<String>,
    previous_suffix: Option<&str>,
) -> Result<()> {
    let options = store.load()?;
    match render_title(&options, url, title, format, previous_suffix)? {
        Some(update) => println!("{}", update.formatted_title),
        None => tracing::info!("url={} filtered out, title left unchanged", url),
    }
    Ok(())
}

/// Renders `title` for `url`; `None` when the URL is filtered out.
fn render_title(
    options: &Options,
    url: &str,
    title: &str,
    format: Option<String>,
    previous_suffix: Option<&str>,
) -> Result<Option<TitleUpdate>> {
    let parsed = url::Url::parse(url).with_context(|| format!("invalid page URL: {url}"))?;
    if !UrlFilter::from_options(options).passes(url) {
        return Ok(None);
    }

    // Saved formats are already normalized; an override must match them.
    let format = match format {
        Some(f) => normalize_title(&f),
        None => options.format.clone(),
    };
    let env = Environment::new(Location::from_url(&parsed), title);
    Ok(Some(updater::update(&format, &env, previous_suffix)))
}
