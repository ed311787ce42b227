//! `urlintitle watch <url>` – drive a controller against a simulated page.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use urlintitle_core::config::OptionsStore;
use urlintitle_core::controller::{Controller, MemoryPage, PageHost};
use urlintitle_core::service::LocalRenderService;

/// Time given to the controller to settle before printing the title.
const SETTLE: Duration = Duration::from_millis(25);

/// Each stdin line becomes the page's new title (or its prefix with
/// `prepend`); the resulting visible title is printed after each change.
pub async fn run_watch(store: OptionsStore, url: &str, title: &str, prepend: bool) -> Result<()> {
    let parsed = url::Url::parse(url).with_context(|| format!("invalid page URL: {url}"))?;
    let (tx, rx) = mpsc::channel(16);
    let page = MemoryPage::new(parsed, title).with_notifier(&tx);

    let Some(controller) = Controller::attach(page.clone()) else {
        return Ok(());
    };
    let service = Arc::new(LocalRenderService::new(store));
    let task = tokio::spawn(controller.run(service, rx));

    tokio::time::sleep(SETTLE).await;
    println!("{}", page.title());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let next = if prepend {
            format!("{line}{}", page.title())
        } else {
            line
        };
        page.page_set_title(&next);
        tokio::time::sleep(SETTLE).await;
        println!("{}", page.title());
    }

    drop(tx);
    let controller = task.await.context("controller task failed")?;
    tracing::debug!(state = ?controller.state(), "watch finished");
    Ok(())
}
