//! HTTP seed source.
//!
//! One blocking GET against a JSON endpoint shaped like the public
//! placeholder todo list: an array of `{id, title, completed}` records,
//! extra fields ignored.

use super::{SeedError, SeedResult, SeedSource};
use crate::model::task::Task;
use log::info;

/// Default public endpoint serving placeholder todo records.
pub const DEFAULT_SEED_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/todos";

/// Blocking HTTP implementation of [`SeedSource`].
#[derive(Debug, Clone)]
pub struct HttpSeedSource {
    endpoint: String,
}

impl HttpSeedSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for HttpSeedSource {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_ENDPOINT)
    }
}

impl SeedSource for HttpSeedSource {
    fn fetch(&self, limit: u32) -> SeedResult<Vec<Task>> {
        let url = format!("{}?_limit={limit}", self.endpoint);
        let client = reqwest::blocking::Client::builder().build()?;

        let response = client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let records: Vec<Task> = serde_json::from_str(&body)?;
        info!(
            "event=seed_fetch module=seed status=ok records={}",
            records.len()
        );
        Ok(records)
    }
}
