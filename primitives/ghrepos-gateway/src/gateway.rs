//! GitHub REST calls for the authenticated owner's repositories.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use std::fmt;

use crate::error::{GatewayError, Result};
use crate::repository::{RepoUpdate, Repository, Visibility, normalize};

/// Repositories requested per listing. Only the first page is fetched.
pub const PAGE_SIZE: u32 = 120;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("ghrepos/", env!("CARGO_PKG_VERSION"));

/// Remote operations on the owner's repositories.
///
/// The session holds one implementation behind an `Arc` and passes it into
/// every action; records never point back at the gateway that produced them.
#[async_trait]
pub trait RepoGateway: Send + Sync {
    /// Lists the first page of repositories, sorted by name.
    async fn list_repositories(&self) -> Result<Vec<Repository>>;

    /// Applies `update` and returns the record as the server now reports it.
    async fn update_fields(&self, repo: &Repository, update: &RepoUpdate) -> Result<Repository>;

    async fn delete(&self, repo: &Repository) -> Result<()>;

    /// Opens the repository in the default handler. Best effort, never fails.
    async fn open(&self, repo: &Repository);

    async fn archive(&self, repo: &Repository) -> Result<Repository> {
        self.update_fields(repo, &RepoUpdate::archived(true)).await
    }

    async fn unarchive(&self, repo: &Repository) -> Result<Repository> {
        self.update_fields(repo, &RepoUpdate::archived(false)).await
    }

    async fn make_public(&self, repo: &Repository) -> Result<Repository> {
        self.update_fields(repo, &RepoUpdate::visibility(Visibility::Public))
            .await
    }

    async fn make_private(&self, repo: &Repository) -> Result<Repository> {
        self.update_fields(repo, &RepoUpdate::visibility(Visibility::Private))
            .await
    }
}

/// HTTP gateway to the GitHub API. Configuration is fixed at construction.
#[derive(Clone)]
pub struct Gateway {
    client: Client,
    base_url: String,
    owner: String,
    token: String,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    pub fn new(token: impl Into<String>, owner: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            owner: owner.into(),
            token: token.into(),
        })
    }

    /// Points the gateway at another API root, e.g. a GitHub Enterprise host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Builds a request carrying the credential and the pinned API headers.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %url, "sending request");

        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, ACCEPT_GITHUB_JSON)
            .header(API_VERSION_HEADER, API_VERSION)
    }

    fn repo_path(&self, repo: &Repository) -> String {
        format!("/repos/{}/{}", self.owner, repo.name)
    }
}

/// Returns the body when `response` has exactly the `expected` status.
async fn expect_status(response: Response, expected: StatusCode) -> Result<String> {
    let status = response.status();
    if status != expected {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, %body, "unexpected status");
        return Err(GatewayError::Status { status, body });
    }
    Ok(response.text().await?)
}

#[async_trait]
impl RepoGateway for Gateway {
    async fn list_repositories(&self) -> Result<Vec<Repository>> {
        let response = self
            .request(Method::GET, "/user/repos")
            .query(&[("per_page", PAGE_SIZE)])
            .send()
            .await?;

        let body = expect_status(response, StatusCode::OK).await?;
        let repos: Vec<Repository> = serde_json::from_str(&body)?;
        tracing::debug!(count = repos.len(), "repositories fetched");

        Ok(normalize(repos))
    }

    async fn update_fields(&self, repo: &Repository, update: &RepoUpdate) -> Result<Repository> {
        tracing::debug!(repo = %repo.name, ?update, "updating repository");
        let response = self
            .request(Method::PATCH, &self.repo_path(repo))
            .json(update)
            .send()
            .await?;

        let body = expect_status(response, StatusCode::OK).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn delete(&self, repo: &Repository) -> Result<()> {
        let response = self
            .request(Method::DELETE, &self.repo_path(repo))
            .send()
            .await?;

        expect_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    async fn open(&self, repo: &Repository) {
        if let Err(err) = open::that_detached(&repo.clone_url) {
            tracing::debug!(url = %repo.clone_url, error = %err, "couldn't open repository");
        }
    }
}
