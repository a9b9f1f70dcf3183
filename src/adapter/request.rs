use http::Request;
use treebridge_stack::StackRequest;

/// Convert an incoming request into the stack's request shape
///
/// Carries the method, the path, the decoded query parameters and the
/// headers. The body is never looked at.
#[must_use]
pub fn to_stack_request<B>(request: &Request<B>) -> StackRequest {
    let uri = request.uri();
    let query = uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
        .unwrap_or_default();

    StackRequest::new(request.method().clone(), uri.path())
        .with_query(query)
        .with_headers(request.headers().clone())
}
