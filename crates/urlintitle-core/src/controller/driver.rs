//! Async driver: notifications in, render round trips out.
//!
//! Several round trips may be in flight at once and complete in any order.
//! Each completion is handled against the controller's state at that moment.
//! Stale results are applied as they come; there is no cancellation.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use super::{Applied, Controller, PageHost};
use crate::service::{Constants, RenderService, ServiceError};
use crate::updater::TitleUpdate;

enum Completion {
    Constants(Result<Constants, ServiceError>),
    Update(Result<Option<TitleUpdate>, ServiceError>),
}

impl<H: PageHost> Controller<H> {
    /// Renders the current title, then re-renders on every notification until
    /// the notification stream closes and all round trips have completed.
    ///
    /// Notifications may be spurious or coalesced. Service failures leave the
    /// title unchanged.
    pub async fn run<S>(mut self, service: Arc<S>, mut notifications: mpsc::Receiver<()>) -> Self
    where
        S: RenderService + ?Sized + 'static,
    {
        let mut in_flight: JoinSet<Completion> = JoinSet::new();
        let mut open = true;

        if self.on_title_changed() {
            spawn_constants(&mut in_flight, &service);
        }

        loop {
            tokio::select! {
                // Drain queued notifications before handling completions.
                biased;

                msg = notifications.recv(), if open => match msg {
                    Some(()) => {
                        if self.on_title_changed() {
                            spawn_constants(&mut in_flight, &service);
                        }
                    }
                    None => open = false,
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => match joined {
                    Ok(Completion::Constants(Ok(constants))) => {
                        if let Some(request) = self.dispatch(&constants) {
                            let service = Arc::clone(&service);
                            in_flight.spawn(async move {
                                Completion::Update(service.format_title_update(request).await)
                            });
                        }
                    }
                    Ok(Completion::Constants(Err(e))) => {
                        tracing::warn!("render service constants failed: {e}");
                        self.abandon();
                    }
                    Ok(Completion::Update(Ok(result))) => {
                        if self.apply(result) == Applied::Written {
                            tracing::debug!(
                                title = ?self.state.last_postprocessed_title,
                                "title updated"
                            );
                        }
                    }
                    Ok(Completion::Update(Err(e))) => {
                        tracing::warn!("render request failed, leaving title unchanged: {e}");
                    }
                    Err(e) => {
                        tracing::warn!("render task failed: {e}");
                    }
                },
                else => break,
            }
        }

        self
    }
}

fn spawn_constants<S>(in_flight: &mut JoinSet<Completion>, service: &Arc<S>)
where
    S: RenderService + ?Sized + 'static,
{
    let service = Arc::clone(service);
    in_flight.spawn(async move { Completion::Constants(service.get_constants().await) });
}
