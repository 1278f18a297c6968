//! Session controller: the repository list, the cursor over it, and at most
//! one gateway call in flight.

use ghrepos_gateway::{GatewayError, RepoGateway, Repository};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::{Completion, Event};

/// A remote action on the repository under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Open,
    Archive,
    Unarchive,
    MakePublic,
    MakePrivate,
    Delete,
}

impl Action {
    fn done_message(self) -> &'static str {
        match self {
            Self::Open => "Repo opened",
            Self::Archive => "Repo archived",
            Self::Unarchive => "Repo unarchived",
            Self::MakePublic => "Repo made public",
            Self::MakePrivate => "Repo made private",
            Self::Delete => "Repo deleted",
        }
    }
}

/// User intent, already decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Run(Action),
    Dismiss,
    Quit,
}

/// Why the session ended. Selects the farewell message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Farewell {
    /// Next or Previous stepped past either end of the list.
    EndOfList,
    /// The owner has no repositories left.
    NoRepositories,
    UserQuit,
}

impl Farewell {
    pub fn message(self) -> &'static str {
        match self {
            Self::EndOfList => "There are no more repos. Have a nice day!",
            Self::NoRepositories => "No repositories found. Have a nice day!",
            Self::UserQuit => "Have a nice day!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Busy(Action),
    Failed(String),
    Quitting(Farewell),
}

/// Borrowed snapshot of the session for rendering.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    pub phase: &'a Phase,
    pub repos: &'a [Repository],
    pub cursor: usize,
    pub status: Option<&'a str>,
}

impl<'a> Screen<'a> {
    pub fn current(&self) -> Option<&'a Repository> {
        self.repos.get(self.cursor)
    }
}

pub struct Session<G> {
    gateway: Arc<G>,
    events: UnboundedSender<Event>,
    repos: Vec<Repository>,
    cursor: usize,
    phase: Phase,
    status: Option<&'static str>,
}

impl<G: RepoGateway + 'static> Session<G> {
    pub fn new(gateway: Arc<G>, events: UnboundedSender<Event>) -> Self {
        Self {
            gateway,
            events,
            repos: Vec::new(),
            cursor: 0,
            phase: Phase::Loading,
            status: None,
        }
    }

    /// Issues the initial fetch.
    pub fn start(&mut self) {
        self.fetch();
    }

    pub fn screen(&self) -> Screen<'_> {
        Screen {
            phase: &self.phase,
            repos: &self.repos,
            cursor: self.cursor,
            status: self.status,
        }
    }

    pub fn farewell(&self) -> Option<Farewell> {
        match self.phase {
            Phase::Quitting(farewell) => Some(farewell),
            _ => None,
        }
    }

    pub fn handle_command(&mut self, command: Command) {
        match (&self.phase, command) {
            (Phase::Quitting(_), _) => {}
            (_, Command::Quit) => self.phase = Phase::Quitting(Farewell::UserQuit),
            (Phase::Loading | Phase::Busy(_), _) => {
                tracing::debug!(?command, "ignored while a request is in flight");
            }
            (Phase::Ready, Command::Dismiss) => {}
            (Phase::Failed(_), Command::Dismiss) => {
                if self.repos.is_empty() {
                    self.fetch();
                } else {
                    self.phase = Phase::Ready;
                }
            }
            (_, Command::Next) => {
                self.status = None;
                if self.cursor + 1 < self.repos.len() {
                    self.cursor += 1;
                    self.phase = Phase::Ready;
                } else {
                    self.phase = Phase::Quitting(Farewell::EndOfList);
                }
            }
            (_, Command::Previous) => {
                self.status = None;
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.phase = Phase::Ready;
                } else {
                    self.phase = Phase::Quitting(Farewell::EndOfList);
                }
            }
            (_, Command::Run(action)) => {
                let Some(repo) = self.repos.get(self.cursor).cloned() else {
                    return;
                };
                self.status = None;
                self.phase = Phase::Busy(action);
                self.dispatch(action, repo);
            }
        }
    }

    pub fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Fetched(result) => {
                if self.phase != Phase::Loading {
                    return;
                }
                match result {
                    Ok(repos) if repos.is_empty() => {
                        self.repos = repos;
                        self.cursor = 0;
                        self.phase = Phase::Quitting(Farewell::NoRepositories);
                    }
                    Ok(repos) => {
                        self.cursor = self.cursor.min(repos.len() - 1);
                        self.repos = repos;
                        self.phase = Phase::Ready;
                    }
                    Err(err) => self.fail(err),
                }
            }
            Completion::Updated(result) => {
                let Phase::Busy(action) = self.phase else {
                    return;
                };
                match result {
                    Ok(updated) => {
                        match self.repos.iter_mut().find(|r| r.name == updated.name) {
                            Some(slot) => *slot = updated,
                            None => tracing::warn!(repo = %updated.name, "updated repository is not listed"),
                        }
                        self.succeed(action);
                    }
                    Err(err) => self.fail(err),
                }
            }
            Completion::Deleted { name, result } => {
                if self.phase != Phase::Busy(Action::Delete) {
                    return;
                }
                match result {
                    Ok(()) => {
                        // Pruned locally so a failed refresh cannot bring it back.
                        self.repos.retain(|r| r.name != name);
                        self.status = Some(Action::Delete.done_message());
                        self.cursor = self
                            .cursor
                            .saturating_sub(1)
                            .min(self.repos.len().saturating_sub(1));
                        self.fetch();
                    }
                    Err(err) => self.fail(err),
                }
            }
            Completion::Opened => {
                if let Phase::Busy(action) = self.phase {
                    self.succeed(action);
                }
            }
        }
    }

    fn succeed(&mut self, action: Action) {
        self.status = Some(action.done_message());
        self.phase = Phase::Ready;
    }

    fn fail(&mut self, err: GatewayError) {
        tracing::warn!(error = %err, "gateway call failed");
        self.phase = Phase::Failed(err.to_string());
    }

    fn fetch(&mut self) {
        self.phase = Phase::Loading;
        let gateway = Arc::clone(&self.gateway);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = gateway.list_repositories().await;
            let _ = events.send(Event::Completed(Completion::Fetched(result)));
        });
    }

    fn dispatch(&self, action: Action, repo: Repository) {
        tracing::debug!(?action, repo = %repo.name, "dispatching");
        let gateway = Arc::clone(&self.gateway);
        let events = self.events.clone();

        tokio::spawn(async move {
            let completion = match action {
                Action::Open => {
                    gateway.open(&repo).await;
                    Completion::Opened
                }
                Action::Archive => Completion::Updated(gateway.archive(&repo).await),
                Action::Unarchive => Completion::Updated(gateway.unarchive(&repo).await),
                Action::MakePublic => Completion::Updated(gateway.make_public(&repo).await),
                Action::MakePrivate => Completion::Updated(gateway.make_private(&repo).await),
                Action::Delete => Completion::Deleted {
                    result: gateway.delete(&repo).await,
                    name: repo.name,
                },
            };
            // The loop may already be gone after a quit; the result is dropped.
            let _ = events.send(Event::Completed(completion));
        });
    }
}
