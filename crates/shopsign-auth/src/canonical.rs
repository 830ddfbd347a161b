//! Canonical signing strings for query-signed requests.
//!
//! Shopify signs query parameters in two different shapes:
//!
//! ```text
//! OAuth:     code=abc&shop=x.myshopify.com
//! App proxy: path_prefix=/apps/fooshop=x.myshopify.comtimestamp=1317327555
//! ```
//!
//! The OAuth form is an ordinary encoded query string with keys sorted. The
//! app proxy form sorts keys, joins the decoded values of each key with `,`
//! and concatenates the `key=value` groups with no separator at all. Both are
//! fixed by the partner and must be reproduced byte for byte, including any
//! decoded bytes that are not UTF-8.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};

use crate::params::QueryParams;

/// Characters left unescaped in a query component: `A-Z a-z 0-9 - _ . ~`.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode parameters as a query string with keys in byte order.
///
/// Each value becomes its own `key=value` pair, values of one key keep their
/// arrival order, and pairs are joined with `&`.
///
/// # Examples
///
/// ```
/// use shopsign_auth::QueryParams;
/// use shopsign_auth::canonical::encode_query;
///
/// let params = QueryParams::parse("shop=x.myshopify.com&code=abc&state=a+b");
/// assert_eq!(encode_query(&params), "code=abc&shop=x.myshopify.com&state=a+b");
/// ```
#[must_use]
pub fn encode_query(params: &QueryParams) -> String {
    params
        .iter()
        .flat_map(|(key, values)| {
            let key = escape_query_component(key);
            values
                .iter()
                .map(move |value| format!("{key}={}", escape_query_component(value)))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Concatenate sorted `key=v1,v2` groups with no delimiter between groups.
///
/// Keys and values are the decoded bytes, not re-encoded.
///
/// # Examples
///
/// ```
/// use shopsign_auth::QueryParams;
/// use shopsign_auth::canonical::join_sorted;
///
/// let params = QueryParams::parse("shop=x.myshopify.com&path_prefix=%2Fa&ids=2&ids=1");
/// assert_eq!(join_sorted(&params), b"ids=2,1path_prefix=/ashop=x.myshopify.com");
/// ```
#[must_use]
pub fn join_sorted(params: &QueryParams) -> Vec<u8> {
    let mut joined = Vec::new();
    for (key, values) in params.iter() {
        joined.extend_from_slice(key);
        joined.push(b'=');
        joined.extend_from_slice(&values.join(&b","[..]));
    }
    joined
}

/// Escape a single query component.
///
/// Spaces become `+`; every byte outside the unreserved set becomes `%XX`.
fn escape_query_component(component: &[u8]) -> String {
    component
        .split(|&b| b == b' ')
        .map(|part| percent_encode(part, QUERY_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("+")
}
