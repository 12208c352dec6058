//! Per-source fetch lifecycle.
//!
//! ```text
//! Idle ──► Loading ──► Loaded(T)
//!             ▲   └──► Failed
//!             └────────── (re-fetch from Loaded or Failed)
//! ```
//!
//! `Idle` is only the pre-mount state and is never re-entered.

use serde::Serialize;

/// Tagged state of one asynchronous data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed,
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn status(&self) -> FetchStatus {
        match self {
            FetchState::Idle => FetchStatus::Idle,
            FetchState::Loading => FetchStatus::Loading,
            FetchState::Loaded(_) => FetchStatus::Loaded,
            FetchState::Failed => FetchStatus::Failed,
        }
    }
}

/// The tag of a [`FetchState`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Identifies one issued request. Tokens grow monotonically per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// One data source: its state, the last value that loaded successfully, and
/// the token of the request currently allowed to resolve it.
#[derive(Debug, Clone)]
pub struct Source<T> {
    state: FetchState<T>,
    last_good: Option<T>,
    issued: u64,
}

impl<T> Default for Source<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Idle,
            last_good: None,
            issued: 0,
        }
    }
}

impl<T: Clone> Source<T> {
    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// The freshest successfully loaded value, kept across failures.
    pub fn last_good(&self) -> Option<&T> {
        self.last_good.as_ref()
    }

    /// Move to `Loading` and issue a token that supersedes every earlier one.
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        self.state = FetchState::Loading;
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Apply a finished request. Returns `false` and leaves the source
    /// untouched when the token has been superseded.
    pub fn resolve<E>(&mut self, token: RequestToken, result: Result<T, E>) -> bool {
        if !self.is_current(token) {
            return false;
        }

        self.state = match result {
            Ok(value) => {
                self.last_good = Some(value.clone());
                FetchState::Loaded(value)
            }
            Err(_) => FetchState::Failed,
        };
        true
    }
}
