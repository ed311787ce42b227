//! CLI for the urlintitle title renderer.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use urlintitle_core::config::OptionsStore;

use commands::{
    run_example, run_options_reset, run_options_set, run_options_show, run_render, run_serve,
    run_tags, run_watch, OptionsUpdate,
};

/// Top-level CLI for urlintitle.
#[derive(Debug, Parser)]
#[command(name = "urlintitle")]
#[command(about = "urlintitle: append URL metadata to page titles", long_about = None)]
pub struct Cli {
    /// Options file to use instead of ~/.config/urlintitle/options.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub options: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Render the title for a page URL and raw title.
    Render {
        /// Page URL.
        url: String,
        /// Raw page title.
        #[arg(allow_hyphen_values = true)]
        title: String,
        /// Format to use instead of the saved one.
        #[arg(long)]
        format: Option<String>,
        /// Suffix returned by the previous render of this page, to strip before rendering.
        #[arg(long, value_name = "SUFFIX", allow_hyphen_values = true)]
        previous_suffix: Option<String>,
    },

    /// List the tags usable in a format, with example values.
    Tags,

    /// Preview a format (default: the saved one) on the example page.
    Example {
        /// Format to preview.
        format: Option<String>,
    },

    /// Show, change, or reset the saved options.
    Options {
        #[command(subcommand)]
        action: OptionsAction,
    },

    /// Answer JSON render requests, one per stdin line.
    Serve,

    /// Rewrite the title of a simulated page whose title is set from stdin lines.
    Watch {
        /// Page URL.
        url: String,
        /// Initial page title.
        #[arg(long, default_value = "")]
        title: String,
        /// Prefix each line to the current title instead of replacing it.
        #[arg(long)]
        prepend: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum OptionsAction {
    /// Print the current options.
    Show,

    /// Change some options; unspecified ones keep their value.
    Set {
        /// Title format, e.g. "{title} - {hostname}".
        #[arg(long)]
        format: Option<String>,
        /// Only process URLs matching a filter pattern.
        #[arg(long, conflicts_with = "blacklist")]
        whitelist: bool,
        /// Skip URLs matching a filter pattern.
        #[arg(long)]
        blacklist: bool,
        /// URL filter pattern (repeatable). Replaces the saved list.
        #[arg(long = "regexp", value_name = "REGEXP")]
        regexps: Vec<String>,
        /// Remove all URL filter patterns.
        #[arg(long, conflicts_with = "regexps")]
        clear_regexps: bool,
    },

    /// Restore default options.
    Reset,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let store = match cli.options {
            Some(path) => OptionsStore::at(path),
            None => OptionsStore::open_default()?,
        };
        tracing::debug!("using options at {}", store.path().display());

        match cli.command {
            CliCommand::Render {
                url,
                title,
                format,
                previous_suffix,
            } => run_render(&store, &url, &title, format, previous_suffix.as_deref())?,
            CliCommand::Tags => run_tags(),
            CliCommand::Example { format } => run_example(&store, format)?,
            CliCommand::Options { action } => match action {
                OptionsAction::Show => run_options_show(&store)?,
                OptionsAction::Set {
                    format,
                    whitelist,
                    blacklist,
                    regexps,
                    clear_regexps,
                } => {
                    let is_whitelist = match (whitelist, blacklist) {
                        (true, _) => Some(true),
                        (_, true) => Some(false),
                        _ => None,
                    };
                    let regexps = if clear_regexps {
                        Some(Vec::new())
                    } else if regexps.is_empty() {
                        None
                    } else {
                        Some(regexps)
                    };
                    run_options_set(
                        &store,
                        OptionsUpdate {
                            format,
                            is_whitelist,
                            regexps,
                        },
                    )?
                }
                OptionsAction::Reset => run_options_reset(&store)?,
            },
            CliCommand::Serve => run_serve(store).await?,
            CliCommand::Watch {
                url,
                title,
                prepend,
            } => run_watch(store, &url, &title, prepend).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
