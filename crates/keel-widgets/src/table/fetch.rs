//! Remote fetch coordination.
//!
//! In remote mode the table describes the window it wants in a
//! [`FetchRequest`] and hands it to the owner in a [`FetchDataMsg`] with a
//! fresh [`RequestToken`]. The owner answers with
//! [`Table::receive_page`](super::Table::receive_page), passing the token
//! back; answers to anything but the latest request are dropped.

use std::fmt;

use keel_core::Cmd;

use serde::{Deserialize, Serialize};

use super::sort::SortRule;

/// Snapshot of the data window the table wants.
///
/// Serializes with camelCase names:
/// `{"pageIndex", "pageSize", "sortBy", "filterText", "groupBy", "showColumns"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    /// Zero-based page.
    pub page_index: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Sort sequence.
    pub sort_by: Vec<SortRule>,
    /// Committed global filter text.
    pub filter_text: String,
    /// Grouping columns.
    pub group_by: Vec<String>,
    /// Visible columns, in display order.
    pub show_columns: Vec<String>,
}

/// Identifies one request. Tokens increase monotonically per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestToken(pub u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The table wants data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchDataMsg {
    /// Id of the requesting table.
    pub table_id: u64,
    /// Token to pass back with the answer.
    pub token: RequestToken,
    /// The window wanted.
    pub request: FetchRequest,
}

/// What became of an answer handed to
/// [`Table::receive_page`](super::Table::receive_page).
#[derive(Debug)]
pub enum Received {
    /// The answer was to an outdated request and was dropped.
    Stale,
    /// The page is shown.
    Applied,
    /// The row count moved the page index, so the page in view was
    /// requested instead of showing the answer under the wrong index.
    Refetch(Cmd),
}

impl Received {
    /// Whether the answer was to the latest request.
    pub const fn is_accepted(&self) -> bool {
        !matches!(self, Self::Stale)
    }

    /// The follow-up request, if any.
    pub fn into_cmd(self) -> Option<Cmd> {
        match self {
            Self::Refetch(cmd) => Some(cmd),
            Self::Stale | Self::Applied => None,
        }
    }
}

/// Whether a request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    /// Nothing outstanding.
    #[default]
    Idle,
    /// Waiting for the answer to the latest request.
    Fetching,
}

/// Issues tokens, suppresses repeated snapshots and rejects stale answers.
#[derive(Debug, Clone, Default)]
pub struct FetchCoordinator {
    issued: u64,
    latest: Option<RequestToken>,
    last_request: Option<FetchRequest>,
    phase: FetchPhase,
}

impl FetchCoordinator {
    /// No requests issued yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub const fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// Token of the latest request.
    pub const fn latest(&self) -> Option<RequestToken> {
        self.latest
    }

    /// The latest request.
    pub const fn last_request(&self) -> Option<&FetchRequest> {
        self.last_request.as_ref()
    }

    /// Issue a token for `request` and enter [`FetchPhase::Fetching`]. A
    /// request equal to the previous one is not issued again unless `force`
    /// is set.
    pub fn issue(&mut self, request: &FetchRequest, force: bool) -> Option<RequestToken> {
        if !force && self.last_request.as_ref() == Some(request) {
            tracing::trace!("fetch snapshot unchanged; not re-emitted");
            return None;
        }
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.latest = Some(token);
        self.last_request = Some(request.clone());
        self.phase = FetchPhase::Fetching;
        tracing::debug!(%token, page = request.page_index, "fetch requested");
        Some(token)
    }

    /// Whether an answer carrying `token` may be applied. Accepting returns
    /// to [`FetchPhase::Idle`].
    pub fn accept(&mut self, token: RequestToken) -> bool {
        if self.latest != Some(token) {
            tracing::warn!(%token, latest = ?self.latest, "stale fetch response dropped");
            return false;
        }
        self.phase = FetchPhase::Idle;
        true
    }

    /// Return to idle without a token, for owners that apply data directly.
    pub const fn settle(&mut self) {
        self.phase = FetchPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let req = FetchRequest {
            page_index: 1,
            page_size: 10,
            show_columns: vec!["id".into(), "name".into()],
            ..FetchRequest::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "pageIndex": 1,
                "pageSize": 10,
                "sortBy": [],
                "filterText": "",
                "groupBy": [],
                "showColumns": ["id", "name"],
            })
        );
    }

    #[test]
    fn test_tokens_increase_and_repeats_are_suppressed() {
        let mut c = FetchCoordinator::new();
        let req = FetchRequest::default();
        let t1 = c.issue(&req, false).unwrap();
        assert!(c.issue(&req, false).is_none());
        let t2 = c.issue(&req, true).unwrap();
        assert!(t2 > t1);
        assert_eq!(c.phase(), FetchPhase::Fetching);
    }

    #[test]
    fn test_only_latest_answer_is_accepted() {
        let mut c = FetchCoordinator::new();
        let t1 = c.issue(&FetchRequest::default(), false).unwrap();
        let t2 = c
            .issue(
                &FetchRequest {
                    page_index: 1,
                    ..FetchRequest::default()
                },
                false,
            )
            .unwrap();
        assert!(!c.accept(t1));
        assert_eq!(c.phase(), FetchPhase::Fetching);
        assert!(c.accept(t2));
        assert_eq!(c.phase(), FetchPhase::Idle);
    }
}
