//! Bugzilla REST client for retirement tickets.

use reqwest::Url;
use serde::Deserialize;
use ut_core::ticket::{Ticket, TicketStatus, TicketUpdate};

use crate::error::ClientError;
use crate::http::{build_client, check_response};

const API_KEY_HEADER: &str = "X-BUGZILLA-API-KEY";
const TICKET_FIELDS: &str = "id,product,component,status,whiteboard,summary,alias";

/// Search criteria for retirement tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketQuery {
    pub product: String,
    pub component: String,
    pub statuses: Vec<String>,
}

#[derive(Deserialize)]
struct BugsResponse {
    #[serde(default)]
    bugs: Vec<WireBug>,
}

/// Bugzilla 5 returns `alias` as a list; older instances as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireAlias {
    Many(Vec<String>),
    One(String),
}

#[derive(Deserialize)]
struct WireBug {
    id: u64,
    #[serde(default)]
    product: String,
    #[serde(default)]
    component: String,
    status: TicketStatus,
    #[serde(default)]
    whiteboard: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    alias: Option<WireAlias>,
}

impl WireBug {
    fn into_ticket(self, base_url: &str) -> Ticket {
        let alias = match self.alias {
            Some(WireAlias::Many(aliases)) => aliases,
            Some(WireAlias::One(alias)) if !alias.is_empty() => vec![alias],
            Some(WireAlias::One(_)) | None => Vec::new(),
        };
        Ticket {
            url: show_bug_url(base_url, self.id),
            id: self.id,
            product: self.product,
            component: self.component,
            status: self.status,
            whiteboard: self.whiteboard,
            summary: self.summary,
            alias,
        }
    }
}

fn show_bug_url(base_url: &str, id: u64) -> String {
    format!("{base_url}/show_bug.cgi?id={id}")
}

/// Authenticated client for one Bugzilla instance.
pub struct BugzillaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BugzillaClient {
    /// Create a client for the instance at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            http: build_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Human-facing URL of a ticket.
    #[must_use]
    pub fn ticket_url(&self, id: u64) -> String {
        show_bug_url(&self.base_url, id)
    }

    /// REST search URL for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the base URL does not parse.
    pub fn search_url(&self, query: &TicketQuery) -> Result<Url, ClientError> {
        let endpoint = format!("{}/rest/bug", self.base_url);
        let mut params = vec![
            ("product", query.product.as_str()),
            ("component", query.component.as_str()),
        ];
        params.extend(query.statuses.iter().map(|status| ("status", status.as_str())));
        params.push(("include_fields", TICKET_FIELDS));

        Url::parse_with_params(&endpoint, &params).map_err(|e| ClientError::InvalidUrl {
            url: endpoint,
            reason: e.to_string(),
        })
    }

    /// Tickets matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the tracker returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn search(&self, query: &TicketQuery) -> Result<Vec<Ticket>, ClientError> {
        let url = self.search_url(query)?;
        tracing::debug!(%url, "searching tickets");
        let resp = check_response(
            self.http
                .get(url)
                .header(API_KEY_HEADER, &self.api_key)
                .send()
                .await?,
        )
        .await?;

        let data: BugsResponse = resp.json().await?;
        Ok(data
            .bugs
            .into_iter()
            .map(|bug| bug.into_ticket(&self.base_url))
            .collect())
    }

    /// A single ticket by id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the tracker returns no bug, or
    /// any transport/parse error.
    pub async fn ticket(&self, id: u64) -> Result<Ticket, ClientError> {
        let url = format!("{}/rest/bug/{id}", self.base_url);
        let resp = check_response(
            self.http
                .get(&url)
                .header(API_KEY_HEADER, &self.api_key)
                .send()
                .await?,
        )
        .await?;

        let data: BugsResponse = resp.json().await?;
        data.bugs
            .into_iter()
            .next()
            .map(|bug| bug.into_ticket(&self.base_url))
            .ok_or(ClientError::NotFound(id))
    }

    /// Apply `update` to ticket `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the tracker rejects
    /// the update.
    pub async fn update(&self, id: u64, update: &TicketUpdate) -> Result<(), ClientError> {
        let url = format!("{}/rest/bug/{id}", self.base_url);
        tracing::debug!(id, "updating ticket");
        check_response(
            self.http
                .put(&url)
                .header(API_KEY_HEADER, &self.api_key)
                .json(update)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }
}
