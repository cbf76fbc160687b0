//! Incoming request view.
//!
//! Transports translate their native request type into a [`Request`]:
//! method, raw path, raw query string, and the path variables extracted by
//! the pattern match.

use crate::route::Method;

/// Path variables captured by a pattern match, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    /// Create an empty set of parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a captured variable.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Look up a variable by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether no variables were captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Query flags understood by the handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Set when a `pretty` key is present, with or without a value.
    pub pretty: bool,
}

impl QueryParams {
    /// Parse a raw query string (without the leading `?`).
    pub fn parse(query: Option<&str>) -> Self {
        let pretty = query
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).any(|(key, _)| key == "pretty"))
            .unwrap_or(false);
        Self { pretty }
    }
}

/// A request as seen by handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Request method.
    pub method: Method,
    /// Raw request path, always starting with `/`.
    pub path: String,
    /// Raw query string, without the leading `?`.
    pub query: Option<String>,
    /// Variables captured by the matched pattern.
    pub params: PathParams,
}

impl Request {
    /// Create a request for `path`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            params: PathParams::new(),
        }
    }

    /// Create a `GET` request from a target such as `/routes?pretty`.
    pub fn get(target: &str) -> Self {
        Self::from_target(Method::Get, target)
    }

    /// Split a request target into path and query.
    pub fn from_target(method: Method, target: &str) -> Self {
        match target.split_once('?') {
            Some((path, query)) => Self::new(method, path).with_query(Some(query)),
            None => Self::new(method, target),
        }
    }

    /// Set the raw query string.
    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.query = query.map(str::to_owned);
        self
    }

    /// Add a captured path variable.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push(key, value);
        self
    }

    /// Replace all captured path variables.
    pub fn with_params(mut self, params: PathParams) -> Self {
        self.params = params;
        self
    }

    /// Look up a captured path variable.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    /// Parsed query flags.
    pub fn query_params(&self) -> QueryParams {
        QueryParams::parse(self.query.as_deref())
    }

    /// Path segments after trimming leading and trailing slashes.
    ///
    /// The root path yields a single empty segment.
    pub fn segments(&self) -> Vec<&str> {
        self.path.trim_matches('/').split('/').collect()
    }
}
