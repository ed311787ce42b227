//! Request/response messages exchanged between a page observer and the renderer.
//!
//! On the wire every request is a JSON object tagged by `"name"`:
//!
//! ```json
//! {"name": "get_constants"}
//! {"name": "format_title_update", "location": {...}, "filtering_url": "...",
//!  "title": "...", "previous_formatted_title_suffix": null}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::env::{Location, LOCATION_FIELD_NAMES};
use crate::updater::TitleUpdate;

/// Reply to `get_constants`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constants {
    /// Location field name to example value. Observers snapshot exactly these fields.
    #[serde(rename = "LOCATION_FIELDS")]
    pub location_fields: Map<String, Value>,
}

impl Constants {
    /// Constants served by this renderer.
    pub fn current() -> Self {
        let example = Location::example();
        let mut location_fields = Map::new();
        for name in LOCATION_FIELD_NAMES {
            let value = example.field(name).unwrap_or_default();
            let value = match (name, value.parse::<u16>()) {
                ("port", Ok(port)) => Value::from(port),
                _ => Value::from(value),
            };
            location_fields.insert(name.to_string(), value);
        }
        Self { location_fields }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.location_fields.keys().map(String::as_str)
    }
}

/// Arguments of `format_title_update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatTitleRequest {
    pub location: Location,
    /// Full page URL checked against the URL filter.
    pub filtering_url: String,
    /// Raw page title.
    pub title: String,
    pub previous_formatted_title_suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Request {
    GetConstants,
    FormatTitleUpdate(FormatTitleRequest),
}

/// `Update(None)` is the "URL filtered out" reply and serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Constants(Constants),
    Update(Option<TitleUpdate>),
}
