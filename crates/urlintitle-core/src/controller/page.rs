//! In-memory page used by the CLI `watch` loop and by tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use super::PageHost;
use crate::env::Location;

#[derive(Debug)]
struct PageInner {
    url: url::Url,
    title: String,
    opted_out: bool,
    host_writes: usize,
    notifier: Option<mpsc::WeakSender<()>>,
}

/// A page with a URL and a title that both the page and a controller write.
///
/// Every title write is trimmed, the way browsers post-process titles, and
/// fires a change notification when a notifier is attached. The notifier is
/// held weakly so the notification stream ends once its owner drops it.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    inner: Arc<Mutex<PageInner>>,
}

impl MemoryPage {
    pub fn new(url: url::Url, title: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PageInner {
                url,
                title: title.trim().to_string(),
                opted_out: false,
                host_writes: 0,
                notifier: None,
            })),
        }
    }

    /// Notify `tx` on every title write, including the controller's own.
    pub fn with_notifier(self, tx: &mpsc::Sender<()>) -> Self {
        self.lock().notifier = Some(tx.downgrade());
        self
    }

    fn lock(&self) -> MutexGuard<'_, PageInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_opted_out(&self, opted_out: bool) {
        self.lock().opted_out = opted_out;
    }

    /// Title write authored by the page itself.
    pub fn page_set_title(&self, title: &str) {
        self.write_title(title);
    }

    /// Number of writes made through [`PageHost::set_title`].
    pub fn host_writes(&self) -> usize {
        self.lock().host_writes
    }

    fn write_title(&self, title: &str) {
        let notifier = {
            let mut inner = self.lock();
            inner.title = title.trim().to_string();
            inner.notifier.as_ref().and_then(|w| w.upgrade())
        };
        if let Some(tx) = notifier {
            // A full queue already holds a pending notification.
            let _ = tx.try_send(());
        }
    }
}

impl PageHost for MemoryPage {
    fn title(&self) -> String {
        self.lock().title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.lock().host_writes += 1;
        self.write_title(title);
    }

    fn location(&self) -> Location {
        Location::from_url(&self.lock().url)
    }

    fn href(&self) -> String {
        self.lock().url.to_string()
    }

    fn opted_out(&self) -> bool {
        self.lock().opted_out
    }
}
