use http::{HeaderMap, Method};

/// Request shape the route stack matches against.
///
/// Only the method and the path take part in matching. Query parameters and
/// headers are carried so that callers adapting richer request types do not
/// lose them on the way in.
#[derive(Debug, Clone)]
pub struct StackRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
}

impl StackRequest {
    /// Create a request for `method` and `path` (path without query string)
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decoded query parameters in request order
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Get a query parameter by name (last occurrence wins)
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
