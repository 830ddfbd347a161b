//! Parsed query string parameters.
//!
//! [`QueryParams`] maps each key to every value it was given, in the order the
//! values appeared on the wire. Keys and values are kept as the decoded bytes,
//! whether or not they are UTF-8, so every pair that reaches the signing string
//! is exactly what was received. Keys iterate in byte order, which is the order
//! both canonical forms in [`crate::canonical`] require.

use std::collections::BTreeMap;

use percent_encoding::percent_decode;

/// Query string parameters: key to ordered list of values, as decoded bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<Vec<u8>, Vec<Vec<u8>>>);

impl QueryParams {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw (still percent-encoded) query string.
    ///
    /// Pairs are separated by `&`; the key and value are split on the first
    /// `=`, and a pair without `=` has an empty value. `+` decodes to a space.
    /// Empty pairs are skipped, as are pairs containing `;` and pairs with a
    /// malformed `%` escape. Escapes that decode to non-UTF-8 bytes are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use shopsign_auth::QueryParams;
    ///
    /// let params = QueryParams::parse("shop=x.myshopify.com&ids=1&ids=2&q=a+b%21&raw=%FF");
    /// assert_eq!(params.first("shop"), Some("x.myshopify.com"));
    /// assert_eq!(params.get_all("ids"), [b"1".to_vec(), b"2".to_vec()]);
    /// assert_eq!(params.first("q"), Some("a b!"));
    /// assert_eq!(params.first_bytes("raw"), Some(&b"\xFF"[..]));
    /// ```
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        for pair in query.split('&').filter(|s| !s.is_empty()) {
            if pair.contains(';') {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if let (Some(key), Some(value)) = (unescape(key), unescape(value)) {
                params.append(key, value);
            }
        }
        params
    }

    /// Append a value to a key, after any values it already has.
    pub fn append(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// The first value of `key` as raw bytes, if present.
    #[must_use]
    pub fn first_bytes(&self, key: &str) -> Option<&[u8]> {
        self.0.get(key.as_bytes())?.first().map(Vec::as_slice)
    }

    /// The first value of `key` as text; `None` if absent or not UTF-8.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        std::str::from_utf8(self.first_bytes(key)?).ok()
    }

    /// All values of `key` in arrival order; empty if the key is absent.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[Vec<u8>] {
        self.0
            .get(key.as_bytes())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key.as_bytes())
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy of these parameters with every occurrence of `key` removed.
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        let mut copy = self.clone();
        copy.0.remove(key.as_bytes());
        copy
    }

    /// Iterate over keys in byte order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[Vec<u8>])> {
        self.0.iter().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }
}

impl<K: Into<Vec<u8>>, V: Into<Vec<u8>>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

/// Decode one query component, or `None` if an escape is malformed.
fn unescape(raw: &str) -> Option<Vec<u8>> {
    let bytes = raw.as_bytes();
    let well_formed = bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'%')
        .all(|(i, _)| {
            bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit)
        });
    if !well_formed {
        return None;
    }

    let spaced: Vec<u8> = bytes
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    Some(percent_decode(&spaced).collect())
}
