//! Routes and the state carried between views.
//!
//! The host owns the real router; this module only models what the widgets
//! read from it: which form to open, which service to filter by, and which
//! branch to select.

use crate::form::{FormFields, FormKind, FormSchema};
use serde::{Deserialize, Serialize};

/// State passed along with a navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
    pub form: Option<FormKind>,
    /// Title of the service the events view should show.
    pub service: Option<String>,
    /// Answers to pre-fill on the destination form.
    pub prefill: Option<FormFields>,
}

impl NavState {
    pub fn open_form(kind: FormKind) -> Self {
        Self {
            form: Some(kind),
            ..Self::default()
        }
    }

    pub fn for_service(title: impl Into<String>) -> Self {
        Self {
            service: Some(title.into()),
            ..Self::default()
        }
    }

    /// Enrollment answers handed off to the trial booking form.
    pub fn join_handoff(join: &FormFields) -> Self {
        Self {
            form: Some(FormKind::Trial),
            service: None,
            prefill: Some(FormFields::join_prefill(join, &FormSchema::trial())),
        }
    }
}

/// A parsed location plus its carried state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    view: String,
    query: Vec<(String, String)>,
    state: NavState,
}

impl Route {
    /// Parse `"/branches?branch=palladam"`. Query values are taken verbatim.
    ///
    /// ```rust
    /// use choreo::navigation::{NavState, Route};
    ///
    /// let route = Route::parse("/branches?branch=palladam", NavState::default());
    /// assert_eq!(route.view(), "branches");
    /// assert_eq!(route.branch(), Some("palladam"));
    /// ```
    pub fn parse(location: &str, state: NavState) -> Self {
        let location = location.trim().trim_start_matches('/');
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, query),
            None => (location, ""),
        };

        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();

        Self {
            view: path.trim_end_matches('/').to_string(),
            query,
            state,
        }
    }

    /// Path without the leading slash; `""` for the home view.
    pub fn view(&self) -> &str {
        &self.view
    }

    /// First value of `key`.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Form to open; trial unless the navigation asked for another.
    pub fn form_kind(&self) -> FormKind {
        self.state.form.unwrap_or_default()
    }

    pub fn branch(&self) -> Option<&str> {
        self.query("branch").filter(|b| !b.is_empty())
    }

    pub fn service(&self) -> Option<&str> {
        self.state.service.as_deref()
    }

    pub fn prefill(&self) -> Option<&FormFields> {
        self.state.prefill.as_ref()
    }
}

/// The routing collaborator.
pub trait Navigator {
    fn navigate(&mut self, location: &str, state: NavState) -> &Route;

    fn current(&self) -> Option<&Route>;
}

/// In-memory history, for tests and non-browser hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigator {
    history: Vec<Route>,
}

impl MemoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to the previous route, if there is one.
    pub fn back(&mut self) -> Option<&Route> {
        if self.history.len() > 1 {
            self.history.pop();
        }
        self.history.last()
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }
}

impl Navigator for MemoryNavigator {
    fn navigate(&mut self, location: &str, state: NavState) -> &Route {
        self.history.push(Route::parse(location, state));
        &self.history[self.history.len() - 1]
    }

    fn current(&self) -> Option<&Route> {
        self.history.last()
    }
}

/// Items whose title matches the service carried by `route`, or every item
/// when none was carried.
pub fn filter_by_service<'a, T>(
    items: &'a [T],
    route: &Route,
    title: impl Fn(&T) -> &str,
) -> Vec<&'a T> {
    match route.service() {
        Some(service) => items.iter().filter(|item| title(item) == service).collect(),
        None => items.iter().collect(),
    }
}
