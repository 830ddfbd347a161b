//! A narrow, read-only view of an inbound HTTP request.
//!
//! The verifiers only need the query parameters, a header or two, and the raw
//! body. [`SignedRequest`] exposes exactly that, so any host framework can be
//! adapted. Implementations are provided for `http::request::Parts`,
//! `http::Request<B>` and the framework-free [`RequestView`].

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};

use crate::params::QueryParams;

/// Read access to the parts of a request that carry a Shopify signature.
pub trait SignedRequest {
    /// The parsed query parameters. Returns an owned copy; verifiers may
    /// modify it freely without touching the request.
    fn query_params(&self) -> QueryParams;

    /// The first value of a header, looked up case-insensitively.
    ///
    /// Returns `None` if the header is absent or not visible ASCII.
    fn header(&self, name: &str) -> Option<&str>;

    /// The raw, unparsed body, if the representation carries one.
    fn body(&self) -> Option<&[u8]>;
}

impl SignedRequest for http::request::Parts {
    fn query_params(&self) -> QueryParams {
        self.uri.query().map(QueryParams::parse).unwrap_or_default()
    }

    fn header(&self, name: &str) -> Option<&str> {
        header_str(&self.headers, name)
    }

    fn body(&self) -> Option<&[u8]> {
        None
    }
}

impl<B: AsRef<[u8]>> SignedRequest for http::Request<B> {
    fn query_params(&self) -> QueryParams {
        self.uri().query().map(QueryParams::parse).unwrap_or_default()
    }

    fn header(&self, name: &str) -> Option<&str> {
        header_str(self.headers(), name)
    }

    fn body(&self) -> Option<&[u8]> {
        Some(http::Request::body(self).as_ref())
    }
}

/// A request representation independent of any HTTP framework.
///
/// # Examples
///
/// ```
/// use shopsign_auth::{RequestView, SignedRequest};
///
/// let request = RequestView::new()
///     .with_query("shop=x.myshopify.com&code=abc")
///     .with_body("{}");
/// assert_eq!(request.query_params().first("code"), Some("abc"));
/// assert_eq!(request.body(), Some(&b"{}"[..]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestView {
    query: QueryParams,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl RequestView {
    /// Create an empty request view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query parameters from a raw query string.
    #[must_use]
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = QueryParams::parse(query);
        self
    }

    /// Set already-parsed query parameters.
    #[must_use]
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.query = params;
        self
    }

    /// Add a header value.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Set the raw body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

impl SignedRequest for RequestView {
    fn query_params(&self) -> QueryParams {
        self.query.clone()
    }

    fn header(&self, name: &str) -> Option<&str> {
        header_str(&self.headers, name)
    }

    fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok()
}
