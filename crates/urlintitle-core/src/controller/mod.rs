//! Per-page change reconciliation.
//!
//! A [`Controller`] watches one page for title changes, asks a render service
//! for the formatted title, and writes it back without reacting to its own
//! writes. The state machine lives in the synchronous methods below; `run`
//! (in `driver`) drives it from a notification stream and a [`RenderService`].
//!
//! [`RenderService`]: crate::service::RenderService

mod driver;
mod page;

pub use page::MemoryPage;

use crate::env::Location;
use crate::service::{Constants, FormatTitleRequest};
use crate::updater::TitleUpdate;

/// The page side of a controller: read and write the title, report the location.
pub trait PageHost {
    /// Current observable title.
    fn title(&self) -> String;
    /// Writes the title. The host may post-process it (trim, truncate).
    fn set_title(&mut self, title: &str);
    fn location(&self) -> Location;
    /// Full page URL, used for URL filtering.
    fn href(&self) -> String;
    /// Pages can opt out of title rewriting entirely.
    fn opted_out(&self) -> bool {
        false
    }
}

/// Transient per-page-load state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateState {
    /// Raw title waiting for dispatch. Cleared as soon as the request is sent.
    pub last_original_title: Option<String>,
    /// Last formatted title written, before host post-processing.
    pub last_formatted_title: Option<String>,
    /// Suffix returned with the last applied update.
    pub last_formatted_title_suffix: Option<String>,
    /// Title read back right after the last write.
    pub last_postprocessed_title: Option<String>,
}

/// What [`Controller::apply`] did with a render result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Written,
    /// Same formatted title as the last write; nothing written.
    Unchanged,
    /// No result (URL filtered out or service unavailable).
    Skipped,
}

#[derive(Debug)]
pub struct Controller<H> {
    host: H,
    state: UpdateState,
}

impl<H: PageHost> Controller<H> {
    /// Attaches to a page, or returns `None` if the page opted out.
    pub fn attach(host: H) -> Option<Self> {
        if host.opted_out() {
            tracing::debug!(url = %host.href(), "page opted out of title rewriting");
            return None;
        }
        Some(Self {
            host,
            state: UpdateState::default(),
        })
    }

    pub fn state(&self) -> &UpdateState {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Handles a (possibly spurious) change notification.
    ///
    /// Returns `true` when the title needs rendering; the caller then fetches
    /// [`Constants`] and calls [`Controller::dispatch`].
    pub fn on_title_changed(&mut self) -> bool {
        let current = self.host.title();
        if self.state.last_original_title.as_deref() == Some(current.as_str())
            || self.state.last_postprocessed_title.as_deref() == Some(current.as_str())
        {
            tracing::debug!(title = %current, "dropping redundant title notification");
            return false;
        }
        self.state.last_original_title = Some(current);
        self.state.last_formatted_title = None;
        true
    }

    /// Builds the render request for the pending raw title and clears it.
    ///
    /// Only the location fields advertised in `constants` are copied. Returns
    /// `None` when no title is pending.
    pub fn dispatch(&mut self, constants: &Constants) -> Option<FormatTitleRequest> {
        let Some(title) = self.state.last_original_title.take() else {
            tracing::debug!("constants arrived with no pending title");
            return None;
        };
        Some(FormatTitleRequest {
            location: self.host.location().copy_fields(constants.field_names()),
            filtering_url: self.host.href(),
            title,
            previous_formatted_title_suffix: self.state.last_formatted_title_suffix.clone(),
        })
    }

    /// Forgets the pending raw title after a failed constants round trip,
    /// so the next notification for it is not dropped.
    pub fn abandon(&mut self) {
        self.state.last_original_title = None;
    }

    /// Writes a render result if it differs from the last formatted title.
    ///
    /// Compares against the live state, not state captured at request time.
    pub fn apply(&mut self, result: Option<TitleUpdate>) -> Applied {
        let Some(update) = result else {
            return Applied::Skipped;
        };
        if self.state.last_formatted_title.as_deref() == Some(update.formatted_title.as_str()) {
            tracing::debug!(title = %update.formatted_title, "formatted title unchanged");
            return Applied::Unchanged;
        }
        self.host.set_title(&update.formatted_title);
        self.state.last_postprocessed_title = Some(self.host.title());
        self.state.last_formatted_title = Some(update.formatted_title);
        self.state.last_formatted_title_suffix = update.formatted_title_suffix;
        Applied::Written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::service::LocalRenderService;

    fn page(title: &str) -> MemoryPage {
        MemoryPage::new(
            url::Url::parse("https://www.example.com/inbox").unwrap(),
            title,
        )
    }

    fn service() -> LocalRenderService<Options> {
        LocalRenderService::new(Options {
            format: "{title} - {hostname}".to_string(),
            ..Options::default()
        })
    }

    /// One full notification → dispatch → apply cycle, synchronously.
    fn cycle(
        ctl: &mut Controller<MemoryPage>,
        svc: &LocalRenderService<Options>,
    ) -> Option<Applied> {
        if !ctl.on_title_changed() {
            return None;
        }
        let req = ctl.dispatch(&Constants::current())?;
        Some(ctl.apply(svc.format(req).unwrap()))
    }

    #[test]
    fn opted_out_page_is_not_attached() {
        let p = page("Inbox");
        p.set_opted_out(true);
        assert!(Controller::attach(p).is_none());
    }

    #[test]
    fn duplicate_notifications_issue_one_request() {
        let mut ctl = Controller::attach(page("Inbox")).unwrap();
        assert!(ctl.on_title_changed());
        assert!(!ctl.on_title_changed());
        assert_eq!(ctl.state().last_original_title.as_deref(), Some("Inbox"));
    }

    #[test]
    fn dispatch_clears_pending_title() {
        let mut ctl = Controller::attach(page("Inbox")).unwrap();
        ctl.on_title_changed();
        let req = ctl.dispatch(&Constants::current()).unwrap();
        assert_eq!(req.title, "Inbox");
        assert_eq!(req.filtering_url, "https://www.example.com/inbox");
        assert_eq!(req.location.hostname, "www.example.com");
        assert!(req.previous_formatted_title_suffix.is_none());
        assert!(ctl.state().last_original_title.is_none());
        assert!(ctl.dispatch(&Constants::current()).is_none());
    }

    #[test]
    fn dispatch_copies_only_advertised_fields() {
        let mut ctl = Controller::attach(page("Inbox")).unwrap();
        ctl.on_title_changed();
        let mut constants = Constants::current();
        constants.location_fields.remove("pathname");
        let req = ctl.dispatch(&constants).unwrap();
        assert_eq!(req.location.pathname, "");
        assert_eq!(req.location.protocol, "https:");
    }

    #[test]
    fn apply_writes_and_records_state() {
        let svc = service();
        let mut ctl = Controller::attach(page("Inbox")).unwrap();
        assert_eq!(cycle(&mut ctl, &svc), Some(Applied::Written));
        assert_eq!(ctl.host().title(), "Inbox - www.example.com");
        let state = ctl.state();
        assert_eq!(state.last_formatted_title.as_deref(), Some("Inbox - www.example.com"));
        assert_eq!(state.last_postprocessed_title.as_deref(), Some("Inbox - www.example.com"));
        assert_eq!(state.last_formatted_title_suffix.as_deref(), Some("- www.example.com"));
    }

    #[test]
    fn own_write_does_not_retrigger() {
        let svc = service();
        let mut ctl = Controller::attach(page("Inbox")).unwrap();
        cycle(&mut ctl, &svc);
        assert_eq!(cycle(&mut ctl, &svc), None);
        assert_eq!(ctl.host().host_writes(), 1);
    }

    #[test]
    fn postprocessed_title_is_what_host_reports() {
        let mut ctl = Controller::attach(page("Inbox")).unwrap();
        ctl.on_title_changed();
        ctl.dispatch(&Constants::current());
        ctl.apply(Some(TitleUpdate {
            formatted_title: "  padded  ".to_string(),
            formatted_title_suffix: None,
        }));
        assert_eq!(ctl.state().last_formatted_title.as_deref(), Some("  padded  "));
        assert_eq!(ctl.state().last_postprocessed_title.as_deref(), Some("padded"));
        // The host's trimmed title must not trigger a new render.
        assert!(!ctl.on_title_changed());
    }

    #[test]
    fn page_prepending_keeps_single_suffix() {
        let svc = service();
        let mut ctl = Controller::attach(page("Inbox")).unwrap();
        cycle(&mut ctl, &svc);

        let current = ctl.host().title();
        ctl.host().page_set_title(&format!("(1) {current}"));
        assert_eq!(cycle(&mut ctl, &svc), Some(Applied::Written));
        assert_eq!(ctl.host().title(), "(1) Inbox - www.example.com");

        let current = ctl.host().title();
        ctl.host().page_set_title(&format!("(2) {current}"));
        cycle(&mut ctl, &svc);
        assert_eq!(ctl.host().title(), "(2) (1) Inbox - www.example.com");
    }

    #[test]
    fn page_rewrite_of_formatted_title_renders_again() {
        let svc = service();
        let mut ctl = Controller::attach(page("Inbox")).unwrap();
        cycle(&mut ctl, &svc);
        let first = ctl.state().clone();

        ctl.host().page_set_title("Inbox  - www.example.com");
        assert_eq!(cycle(&mut ctl, &svc), Some(Applied::Written));
        assert_eq!(ctl.state().last_formatted_title, first.last_formatted_title);
        assert_eq!(ctl.host().title(), "Inbox - www.example.com");
    }

    #[test]
    fn repeated_result_is_not_rewritten() {
        let svc = service();
        let mut ctl = Controller::attach(page("Inbox")).unwrap();
        cycle(&mut ctl, &svc);
        let same = TitleUpdate {
            formatted_title: "Inbox - www.example.com".to_string(),
            formatted_title_suffix: Some("- www.example.com".to_string()),
        };
        assert_eq!(ctl.apply(Some(same)), Applied::Unchanged);
        assert_eq!(ctl.host().host_writes(), 1);
    }

    #[test]
    fn filtered_result_changes_nothing() {
        let mut ctl = Controller::attach(page("Inbox")).unwrap();
        ctl.on_title_changed();
        ctl.dispatch(&Constants::current());
        assert_eq!(ctl.apply(None), Applied::Skipped);
        assert_eq!(ctl.host().title(), "Inbox");
        assert_eq!(ctl.host().host_writes(), 0);
    }

    #[test]
    fn abandon_allows_retry() {
        let mut ctl = Controller::attach(page("Inbox")).unwrap();
        assert!(ctl.on_title_changed());
        ctl.abandon();
        assert!(ctl.on_title_changed());
    }
}
