use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde_json::Value;

use crate::http_cache::ResponseCache;

pub const DEFAULT_API_BASE: &str = "https://api.football-data.org/v4";
const AUTH_HEADER: &str = "X-Auth-Token";
const REQUEST_TIMEOUT_SECS: u64 = 10;

const COMPETITION_TTL: Duration = Duration::from_secs(60 * 60);
const DATA_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    Scheduled,
    Finished,
}

impl MatchStatus {
    pub fn as_query(self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Finished => "FINISHED",
        }
    }
}

/// One upstream resource together with the parameters that select it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Competition(u32),
    Standings(u32),
    Matches(u32, MatchStatus),
    Scorers(u32),
}

impl Endpoint {
    pub fn url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        match self {
            Endpoint::Competition(id) => format!("{base}/competitions/{id}"),
            Endpoint::Standings(id) => format!("{base}/competitions/{id}/standings"),
            Endpoint::Matches(id, status) => {
                format!("{base}/competitions/{id}/matches?status={}", status.as_query())
            }
            Endpoint::Scorers(id) => format!("{base}/competitions/{id}/scorers"),
        }
    }

    pub fn ttl(&self) -> Duration {
        match self {
            Endpoint::Competition(_) => COMPETITION_TTL,
            Endpoint::Standings(_) | Endpoint::Matches(..) | Endpoint::Scorers(_) => DATA_TTL,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Competition(_) => "competition",
            Endpoint::Standings(_) => "standings",
            Endpoint::Matches(_, MatchStatus::Scheduled) => "scheduled matches",
            Endpoint::Matches(_, MatchStatus::Finished) => "finished matches",
            Endpoint::Scorers(_) => "scorers",
        }
    }
}

/// Blocking GET returning the response body of a successful request.
pub trait Transport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<String>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<String> {
        let mut req = self
            .client
            .get(url)
            .header(USER_AGENT, "scoreboard_analytics/0.1");
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let resp = req.send().context("request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            return Err(anyhow::anyhow!("http {}: {}", status, body));
        }
        Ok(body)
    }
}

/// football-data.org client with a per-endpoint response cache.
pub struct FootballApi<T: Transport> {
    transport: T,
    base_url: String,
    api_key: Option<String>,
    cache: ResponseCache,
}

impl<T: Transport> FootballApi<T> {
    pub fn new(transport: T, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_cache(transport, base_url, api_key, ResponseCache::new())
    }

    /// Builds a client around an existing cache, e.g. one shared with an
    /// earlier client or pre-seeded with responses.
    pub fn with_cache(
        transport: T,
        base_url: impl Into<String>,
        api_key: Option<String>,
        cache: ResponseCache,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            api_key,
            cache,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn competition_info(&mut self, competition_id: u32) -> Result<Value> {
        self.fetch(Endpoint::Competition(competition_id), Instant::now())
    }

    pub fn standings(&mut self, competition_id: u32) -> Result<Value> {
        self.fetch(Endpoint::Standings(competition_id), Instant::now())
    }

    pub fn matches(&mut self, competition_id: u32, status: MatchStatus) -> Result<Value> {
        self.fetch(Endpoint::Matches(competition_id, status), Instant::now())
    }

    pub fn scorers(&mut self, competition_id: u32) -> Result<Value> {
        self.fetch(Endpoint::Scorers(competition_id), Instant::now())
    }

    /// Returns the cached payload while it is fresh at `now`, otherwise
    /// requests it again. Failures are returned as-is and never cached.
    pub fn fetch(&mut self, endpoint: Endpoint, now: Instant) -> Result<Value> {
        if let Some(body) = self.cache.get(&endpoint, now) {
            return Ok(body.clone());
        }

        let url = endpoint.url(&self.base_url);
        let body = {
            let mut headers = Vec::new();
            if let Some(key) = self.api_key.as_deref() {
                headers.push((AUTH_HEADER, key));
            }
            self.transport
                .get(&url, &headers)
                .with_context(|| format!("{} request failed", endpoint.label()))?
        };

        let value: Value = serde_json::from_str(body.trim())
            .with_context(|| format!("invalid {} json", endpoint.label()))?;
        self.cache.purge_expired(now);
        let ttl = endpoint.ttl();
        self.cache.insert(endpoint, value.clone(), ttl, now);
        Ok(value)
    }
}
