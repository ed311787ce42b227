//! Render service: the request/response boundary between page observers and
//! the rendering engine.
//!
//! [`RenderService`] is the transport-neutral seam. [`LocalRenderService`]
//! answers in process from an [`OptionsSource`]; `handle_json` serves the same
//! requests as JSON messages.

mod error;
mod protocol;

pub use error::ServiceError;
pub use protocol::{Constants, FormatTitleRequest, Request, Response};

use async_trait::async_trait;

use crate::config::OptionsSource;
use crate::env::Environment;
use crate::updater::{self, TitleUpdate};
use crate::url_filter::UrlFilter;

#[async_trait]
pub trait RenderService: Send + Sync {
    async fn get_constants(&self) -> Result<Constants, ServiceError>;

    /// `Ok(None)` when the URL filter rejects `request.filtering_url`.
    async fn format_title_update(
        &self,
        request: FormatTitleRequest,
    ) -> Result<Option<TitleUpdate>, ServiceError>;
}

/// Renders with options read fresh from `source` on every request.
#[derive(Debug, Clone)]
pub struct LocalRenderService<O> {
    source: O,
}

impl<O: OptionsSource> LocalRenderService<O> {
    pub fn new(source: O) -> Self {
        Self { source }
    }

    /// Synchronous core of `format_title_update`.
    pub fn format(&self, request: FormatTitleRequest) -> Result<Option<TitleUpdate>, ServiceError> {
        let options = self.source.load()?;
        if !UrlFilter::from_options(&options).passes(&request.filtering_url) {
            tracing::debug!(url = %request.filtering_url, "URL filtered out");
            return Ok(None);
        }
        let env = Environment::new(request.location, request.title);
        Ok(Some(updater::update(
            &options.format,
            &env,
            request.previous_formatted_title_suffix.as_deref(),
        )))
    }

    pub fn handle(&self, request: Request) -> Result<Response, ServiceError> {
        match request {
            Request::GetConstants => Ok(Response::Constants(Constants::current())),
            Request::FormatTitleUpdate(req) => self.format(req).map(Response::Update),
        }
    }

    /// Parses one JSON request and returns the JSON response.
    pub fn handle_json(&self, message: &str) -> Result<String, ServiceError> {
        let request: Request = serde_json::from_str(message)?;
        let response = self.handle(request)?;
        Ok(serde_json::to_string(&response)?)
    }
}

#[async_trait]
impl<O: OptionsSource> RenderService for LocalRenderService<O> {
    async fn get_constants(&self) -> Result<Constants, ServiceError> {
        Ok(Constants::current())
    }

    async fn format_title_update(
        &self,
        request: FormatTitleRequest,
    ) -> Result<Option<TitleUpdate>, ServiceError> {
        self.format(request)
    }
}
