//! View state of the search front end.
//!
//! The whole screen is one [`Phase`] value. Outbound requests are never
//! performed here: transitions that need the network hand back a
//! [`FetchRequest`], and the caller reports its outcome through
//! [`SearchController::settle`].

use crate::search::SearchResponse;
use std::sync::Arc;

/// Identifies one outbound search so late replies can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Search,
    Images,
    Sources,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Search, Tab::Images, Tab::Sources];

    pub fn name(self) -> &'static str {
        match self {
            Tab::Search => "search",
            Tab::Images => "images",
            Tab::Sources => "sources",
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "search" | "1" => Ok(Tab::Search),
            "images" | "2" => Ok(Tab::Images),
            "sources" | "3" => Ok(Tab::Sources),
            other => Err(format!("unknown tab: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Loaded {
        response: Arc<SearchResponse>,
        tab: Tab,
    },
    /// `retry` is set while a retry of the same query is in flight.
    Failed {
        message: String,
        retry: Option<RequestId>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    PreSearch { input: String },
    Searching { query: String, request: RequestId },
    Results { query: String, view: ResultsView },
}

impl Default for Phase {
    fn default() -> Self {
        Phase::PreSearch {
            input: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied,
    /// The outcome belonged to a request the screen no longer waits for.
    Ignored,
}

#[derive(Debug, Default)]
pub struct SearchController {
    phase: Phase,
    next_request: u64,
    retry_count: u32,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Text of the input box before submission, the submitted query after.
    pub fn query(&self) -> &str {
        match &self.phase {
            Phase::PreSearch { input } => input,
            Phase::Searching { query, .. } | Phase::Results { query, .. } => query,
        }
    }

    pub fn response(&self) -> Option<&SearchResponse> {
        match &self.phase {
            Phase::Results {
                view: ResultsView::Loaded { response, .. },
                ..
            } => Some(response.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Results {
                view: ResultsView::Failed { message, .. },
                ..
            } => Some(message),
            _ => None,
        }
    }

    pub fn active_tab(&self) -> Option<Tab> {
        match &self.phase {
            Phase::Results {
                view: ResultsView::Loaded { tab, .. },
                ..
            } => Some(*tab),
            _ => None,
        }
    }

    /// The request whose outcome the current phase is waiting on.
    pub fn pending(&self) -> Option<RequestId> {
        match &self.phase {
            Phase::Searching { request, .. } => Some(*request),
            Phase::Results {
                view: ResultsView::Failed { retry, .. },
                ..
            } => *retry,
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending().is_some()
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Replaces the input text. Only the pre-search form is editable.
    pub fn edit_query(&mut self, text: &str) -> bool {
        match &mut self.phase {
            Phase::PreSearch { input } => {
                *input = text.to_string();
                true
            }
            _ => false,
        }
    }

    /// Submits the form. Blank input is ignored and issues nothing.
    pub fn submit(&mut self) -> Option<FetchRequest> {
        let query = match &self.phase {
            Phase::PreSearch { input } if !input.trim().is_empty() => input.trim().to_string(),
            _ => return None,
        };
        let id = self.next_id();
        self.phase = Phase::Searching {
            query: query.clone(),
            request: id,
        };
        Some(FetchRequest { id, query })
    }

    /// Re-sends the last submitted query after a failure. The error stays on
    /// screen until the retry settles.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        let failed = matches!(
            &self.phase,
            Phase::Results {
                view: ResultsView::Failed { retry: None, .. },
                ..
            }
        );
        if !failed {
            return None;
        }
        let id = self.next_id();
        match &mut self.phase {
            Phase::Results {
                query,
                view: ResultsView::Failed { retry, .. },
            } => {
                *retry = Some(id);
                self.retry_count += 1;
                Some(FetchRequest {
                    id,
                    query: query.clone(),
                })
            }
            _ => None,
        }
    }

    /// Back to an empty form, dropping any stored response and abandoning
    /// whatever request is still in flight.
    pub fn new_search(&mut self) {
        self.phase = Phase::default();
    }

    /// Switches the visible tab of a loaded response. Never issues a request.
    pub fn select_tab(&mut self, selected: Tab) -> bool {
        match &mut self.phase {
            Phase::Results {
                view: ResultsView::Loaded { tab, .. },
                ..
            } => {
                *tab = selected;
                true
            }
            _ => false,
        }
    }

    pub fn settle(&mut self, id: RequestId, outcome: Result<SearchResponse, String>) -> Settled {
        if self.pending() != Some(id) {
            return Settled::Ignored;
        }
        let query = self.query().to_string();
        let view = match outcome {
            Ok(response) => ResultsView::Loaded {
                response: Arc::new(response),
                tab: Tab::default(),
            },
            Err(message) => ResultsView::Failed {
                message,
                retry: None,
            },
        };
        self.phase = Phase::Results { query, view };
        Settled::Applied
    }

    fn next_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(query: &str, results: usize, images: usize) -> SearchResponse {
        let results: Vec<_> = (0..results)
            .map(|i| {
                json!({
                    "title": format!("Result {}", i),
                    "url": format!("https://example.com/{}", i),
                })
            })
            .collect();
        let images: Vec<_> = (0..images)
            .map(|i| format!("https://img.example.com/{}.png", i))
            .collect();
        serde_json::from_value(json!({
            "success": true,
            "query": query,
            "ai_overview": "Paris is the capital of France.",
            "image_urls": images,
            "results": results,
        }))
        .unwrap()
    }

    fn submitted(query: &str) -> (SearchController, FetchRequest) {
        let mut controller = SearchController::new();
        controller.edit_query(query);
        let request = controller.submit().unwrap();
        (controller, request)
    }

    #[test]
    fn blank_submission_is_ignored() {
        let mut controller = SearchController::new();
        assert_eq!(controller.submit(), None);
        controller.edit_query("   \t ");
        assert_eq!(controller.submit(), None);
        assert_eq!(
            controller.phase(),
            &Phase::PreSearch {
                input: "   \t ".to_string()
            }
        );
    }

    #[test]
    fn submission_trims_and_starts_searching() {
        let (controller, request) = submitted("  capital of France ");
        assert_eq!(request.query, "capital of France");
        assert_eq!(
            controller.phase(),
            &Phase::Searching {
                query: "capital of France".to_string(),
                request: request.id,
            }
        );
        assert!(controller.is_loading());
    }

    #[test]
    fn success_lands_on_search_tab() {
        let (mut controller, request) = submitted("capital of France");
        let outcome = response("capital of France", 3, 5);
        assert_eq!(controller.settle(request.id, Ok(outcome.clone())), Settled::Applied);

        assert_eq!(controller.active_tab(), Some(Tab::Search));
        assert_eq!(controller.response(), Some(&outcome));
        assert!(!controller.is_loading());
    }

    #[test]
    fn tab_switching_keeps_the_same_response() {
        let (mut controller, request) = submitted("capital of France");
        controller.settle(request.id, Ok(response("capital of France", 3, 5)));
        let stored = controller.response().cloned();

        for tab in [Tab::Images, Tab::Sources, Tab::Search, Tab::Sources] {
            assert!(controller.select_tab(tab));
            assert_eq!(controller.active_tab(), Some(tab));
            assert_eq!(controller.response().cloned(), stored);
            assert_eq!(controller.pending(), None);
        }
    }

    #[test]
    fn tabs_are_inert_outside_loaded_results() {
        let (mut controller, request) = submitted("q");
        assert!(!controller.select_tab(Tab::Images));
        controller.settle(request.id, Err("boom".to_string()));
        assert!(!controller.select_tab(Tab::Images));
    }

    #[test]
    fn failure_shows_message_and_retry_resends_same_query() {
        let (mut controller, request) = submitted("capital of France");
        controller.settle(request.id, Err("401 unauthorized".to_string()));
        assert_eq!(controller.error(), Some("401 unauthorized"));

        let retry = controller.retry().unwrap();
        assert_eq!(retry.query, request.query);
        assert_ne!(retry.id, request.id);
        assert_eq!(controller.error(), Some("401 unauthorized"));
        assert!(controller.is_loading());
        assert_eq!(controller.retry(), None);
        assert_eq!(controller.retry_count(), 1);

        controller.settle(retry.id, Err("401 unauthorized".to_string()));
        assert_eq!(controller.error(), Some("401 unauthorized"));
        assert!(!controller.is_loading());

        let again = controller.retry().unwrap();
        controller.settle(again.id, Ok(response("capital of France", 1, 0)));
        assert_eq!(controller.active_tab(), Some(Tab::Search));
        assert_eq!(controller.retry_count(), 2);
    }

    #[test]
    fn retry_needs_a_failure() {
        let mut controller = SearchController::new();
        assert_eq!(controller.retry(), None);
        controller.edit_query("q");
        let request = controller.submit().unwrap();
        assert_eq!(controller.retry(), None);
        controller.settle(request.id, Ok(response("q", 0, 0)));
        assert_eq!(controller.retry(), None);
    }

    #[test]
    fn new_search_while_searching_discards_late_reply() {
        let (mut controller, request) = submitted("capital of France");
        controller.new_search();
        assert_eq!(controller.phase(), &Phase::default());
        assert_eq!(controller.query(), "");

        assert_eq!(
            controller.settle(request.id, Ok(response("capital of France", 3, 5))),
            Settled::Ignored
        );
        assert_eq!(controller.phase(), &Phase::default());
    }

    #[test]
    fn stale_reply_cannot_overwrite_a_newer_search() {
        let (mut controller, first) = submitted("first");
        controller.new_search();
        controller.edit_query("second");
        let second = controller.submit().unwrap();

        assert_eq!(controller.settle(first.id, Err("late".to_string())), Settled::Ignored);
        assert_eq!(controller.query(), "second");
        assert!(controller.is_loading());

        assert_eq!(controller.settle(second.id, Ok(response("second", 1, 1))), Settled::Applied);
        assert_eq!(controller.response().map(|r| r.query.as_str()), Some("second"));
    }

    #[test]
    fn new_search_from_results_clears_everything() {
        let (mut controller, request) = submitted("q");
        controller.settle(request.id, Ok(response("q", 2, 2)));
        controller.new_search();
        assert_eq!(controller.response(), None);
        assert_eq!(controller.query(), "");
        assert!(controller.edit_query("next"));
    }

    #[test]
    fn tab_names_parse() {
        assert_eq!("Images".parse::<Tab>(), Ok(Tab::Images));
        assert_eq!("3".parse::<Tab>(), Ok(Tab::Sources));
        assert!("videos".parse::<Tab>().is_err());
    }
}
