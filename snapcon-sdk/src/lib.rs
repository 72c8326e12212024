//! # snapcon-sdk
//!
//! Blocking client for the snapcon web console API.
//!
//! ## Example
//!
//! ```no_run
//! use snapcon_sdk::SnapconClient;
//!
//! let client = SnapconClient::new("http://localhost:8888");
//!
//! for snapshot in client.snapshots("root").unwrap() {
//!     println!("{} {}", snapshot.id, snapshot.description);
//! }
//!
//! client.create("root", "before upgrade", Some("important=yes")).unwrap();
//! ```

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use snapcon_core::{Change, Settings, Snapshot};

#[derive(Clone)]
pub struct SnapconClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct UndoChangeRequest<'a> {
    config: &'a str,
    range: &'a str,
    paths: &'a [String],
}

impl SnapconClient {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the console (e.g., "http://localhost:8888")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()?;
        let response = check(response)?;
        response
            .json()
            .with_context(|| format!("decoding response of {}", path))
    }

    fn post(&self, path: &str, query: &[(&str, &str)]) -> Result<()> {
        let response = self.client.post(self.url(path)).query(query).send()?;
        check(response)?;
        Ok(())
    }

    /// Names of all snapper configurations
    pub fn configs(&self) -> Result<Vec<String>> {
        self.get("/api/configs", &[])
    }

    /// Settings of one configuration
    pub fn settings(&self, config: &str) -> Result<Settings> {
        self.get("/api/get-config", &[("config", config)])
    }

    /// Snapshots of one configuration, in snapper's order
    pub fn snapshots(&self, config: &str) -> Result<Vec<Snapshot>> {
        self.get("/api/snapshots", &[("config", config)])
    }

    /// Files changed within `range` (e.g. "12..13")
    pub fn status(&self, config: &str, range: &str) -> Result<Vec<Change>> {
        self.get("/api/status", &[("config", config), ("range", range)])
    }

    /// Revert `paths` to their state at the start of `range`
    pub fn undo_change(&self, config: &str, range: &str, paths: &[String]) -> Result<()> {
        let request = UndoChangeRequest {
            config,
            range,
            paths,
        };
        let response = self
            .client
            .post(self.url("/api/undochange"))
            .json(&request)
            .send()?;
        check(response)?;
        Ok(())
    }

    /// Roll back to snapshot `id`. The server picks a description when none is given.
    pub fn rollback(&self, config: &str, id: u32, description: Option<&str>) -> Result<()> {
        let id = id.to_string();
        let mut query = vec![("config", config), ("id", id.as_str())];
        if let Some(description) = description {
            query.push(("description", description));
        }
        self.post("/api/rollback", &query)
    }

    /// Create a snapshot
    pub fn create(&self, config: &str, description: &str, userdata: Option<&str>) -> Result<()> {
        let mut query = vec![("config", config), ("description", description)];
        if let Some(userdata) = userdata {
            query.push(("userdata", userdata));
        }
        self.post("/api/create", &query)
    }

    /// Delete snapshot `id`
    pub fn delete(&self, config: &str, id: u32) -> Result<()> {
        let id = id.to_string();
        self.post("/api/delete", &[("config", config), ("id", id.as_str())])
    }

    /// Check server health
    pub fn health_check(&self) -> Result<bool> {
        let response = self.client.get(self.url("/health")).send()?;

        Ok(response.status().is_success())
    }
}

/// Turns an error status into an error carrying the server's message.
fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    anyhow::bail!("server returned {}: {}", status, body.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SnapconClient::new("http://localhost:8888/");
        assert_eq!(client.base_url, "http://localhost:8888");
        assert_eq!(client.url("/api/configs"), "http://localhost:8888/api/configs");
    }

    #[test]
    fn test_undo_request_body() {
        let paths = vec!["/etc/fstab".to_string()];
        let body = serde_json::to_value(UndoChangeRequest {
            config: "root",
            range: "1..2",
            paths: &paths,
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({"config": "root", "range": "1..2", "paths": ["/etc/fstab"]})
        );
    }

    #[test]
    fn test_unreachable_server_is_error() {
        let client = SnapconClient::new("http://127.0.0.1:9");
        assert!(client.configs().is_err());
    }
}
