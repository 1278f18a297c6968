//! GitHub Repository Gateway
//!
//! Lists, updates, deletes and opens the repositories of one authenticated
//! owner through the GitHub REST API.
//!
//! Every request carries the bearer credential, the GitHub JSON `Accept`
//! type and a pinned `X-GitHub-Api-Version` header.
//!
//! # Usage
//!
//! ```no_run
//! use ghrepos_gateway::{Gateway, RepoGateway};
//!
//! # async fn run() -> ghrepos_gateway::Result<()> {
//! let gateway = Gateway::new("ghp_token", "octocat")?;
//! for repo in gateway.list_repositories().await? {
//!     println!("{} ({})", repo.name, repo.visibility);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod gateway;
mod repository;

pub use error::{GatewayError, Result};
pub use gateway::{DEFAULT_BASE_URL, Gateway, PAGE_SIZE, RepoGateway};
pub use repository::{RepoUpdate, Repository, Visibility};
pub use reqwest::StatusCode;
