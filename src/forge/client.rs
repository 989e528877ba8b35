// file: src/forge/client.rs
// description: GitHub REST client for repository enumeration, contents listing and rate limits
// reference: https://docs.github.com/en/rest/repos/contents

use crate::config::ForgeConfig;
use crate::error::{Result, ScanError};
use crate::forge::credentials::Credential;
use crate::forge::types::{ContentsResponse, RateLimitResponse, RateLimitStatus, RepoRef};
use crate::search::{ContentEntry, DirectoryLister};
use chrono::DateTime;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

const API_VERSION: &str = "2022-11-28";

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: Url,
    per_page: u32,
    authenticated: bool,
}

impl GitHubClient {
    pub fn new(config: &ForgeConfig, credential: Option<&Credential>) -> Result<Self> {
        let api_url = Url::parse(&config.api_url)
            .map_err(|e| ScanError::Config(format!("Invalid api_url '{}': {}", config.api_url, e)))?;

        if api_url.cannot_be_a_base() {
            return Err(ScanError::Config(format!(
                "api_url cannot be used as a base URL: {}",
                config.api_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        if let Some(credential) = credential {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", credential.token))
                .map_err(|_| {
                    ScanError::Config(format!(
                        "Token from {} contains invalid characters",
                        credential.source
                    ))
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url,
            per_page: config.per_page,
            authenticated: credential.is_some(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Binds this client to one repository as a [`DirectoryLister`].
    pub fn repository(&self, full_name: &str) -> RepositoryContents<'_> {
        RepositoryContents {
            client: self,
            full_name: full_name.to_string(),
        }
    }

    pub async fn get_repository(&self, full_name: &str) -> Result<RepoRef> {
        let (owner, repo) = split_full_name(full_name)?;
        let url = self.endpoint(["repos", owner, repo])?;
        self.get_json(url, full_name).await
    }

    /// Fetches every repository of `org`, one page at a time.
    pub async fn list_organization_repositories(&self, org: &str) -> Result<Vec<RepoRef>> {
        let mut repositories = Vec::new();
        let mut page = 1u32;

        loop {
            let mut url = self.endpoint(["orgs", org, "repos"])?;
            url.query_pairs_mut()
                .append_pair("per_page", &self.per_page.to_string())
                .append_pair("page", &page.to_string());

            let batch: Vec<RepoRef> = self.get_json(url, org).await?;
            let batch_len = batch.len();
            debug!("Fetched page {} of {} ({} repositories)", page, org, batch_len);
            repositories.extend(batch);

            if batch_len < self.per_page as usize {
                break;
            }
            page += 1;
        }

        Ok(repositories)
    }

    /// Lists the entries directly inside `path` of `full_name`; `""` is the root.
    pub async fn list_contents(&self, full_name: &str, path: &str) -> Result<Vec<ContentEntry>> {
        let (owner, repo) = split_full_name(full_name)?;
        let mut url = self.endpoint(["repos", owner, repo, "contents"])?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
        }

        let response: ContentsResponse = self.get_json(url, path).await?;
        into_listing(response, path)
    }

    pub async fn rate_limit(&self) -> Result<RateLimitStatus> {
        let url = self.endpoint(["rate_limit"])?;
        let response: RateLimitResponse = self.get_json(url, "rate_limit").await?;
        let core = response.resources.core;

        let reset = DateTime::from_timestamp(core.reset, 0)
            .ok_or_else(|| ScanError::Forge(format!("Invalid reset timestamp {}", core.reset)))?;

        Ok(RateLimitStatus {
            limit: core.limit,
            remaining: core.remaining,
            reset,
        })
    }

    fn endpoint<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| ScanError::Config(format!("Invalid api_url: {}", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, subject: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let response = check_status(response, subject).await?;
        Ok(response.json::<T>().await?)
    }
}

async fn check_status(response: Response, subject: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(classify_status(status, subject, url, body))
}

/// Maps a failed response onto the error kinds the search distinguishes.
///
/// GitHub answers 403 for both rate limiting and access denial.
fn classify_status(status: StatusCode, subject: &str, url: String, body: String) -> ScanError {
    match status {
        StatusCode::NOT_FOUND => ScanError::not_found(subject),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => ScanError::RateLimited {
            status: status.as_u16(),
            url,
        },
        _ => ScanError::Forge(format!(
            "GitHub request to {} failed with status {}: {}",
            url, status, body
        )),
    }
}

/// A file at `path` comes back as a single object; it is not a directory.
fn into_listing(response: ContentsResponse, path: &str) -> Result<Vec<ContentEntry>> {
    match response {
        ContentsResponse::Listing(entries) => Ok(entries),
        ContentsResponse::Single(_) => Err(ScanError::not_found(path)),
    }
}

fn split_full_name(full_name: &str) -> Result<(&str, &str)> {
    match full_name.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => Err(ScanError::Validation(format!(
            "Repository must be given as owner/name, got '{}'",
            full_name
        ))),
    }
}

/// Qualifies a bare repository name with `org`; `owner/name` is kept as-is.
pub fn qualify_repository_name(name: &str, org: &str) -> String {
    if name.contains('/') {
        name.to_string()
    } else {
        format!("{}/{}", org, name)
    }
}

/// One repository seen through the contents API.
pub struct RepositoryContents<'a> {
    client: &'a GitHubClient,
    full_name: String,
}

impl RepositoryContents<'_> {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}

impl DirectoryLister for RepositoryContents<'_> {
    async fn list_directory(&self, path: &str) -> Result<Vec<ContentEntry>> {
        self.client.list_contents(&self.full_name, path).await
    }
}
