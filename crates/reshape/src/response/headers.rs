//! Ordered, case-insensitive header collection.

use hyper::http::{HeaderName, HeaderValue};
use hyper::HeaderMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Response headers in insertion order.
///
/// Names are stored as [`HeaderName`], which normalizes to lowercase, so
/// lookups are case-insensitive. A name may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header, keeping any existing values for the same name.
    pub fn append(&mut self, name: HeaderName, value: HeaderValue) {
        self.entries.push((name, value));
    }

    /// Append a header from strings. Invalid names or values are skipped.
    pub fn append_str(&mut self, name: &str, value: &str) -> bool {
        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => {
                self.append(name, value);
                true
            }
            _ => false,
        }
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Every value for `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a HeaderValue> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().map(|(name, value)| (name, value))
    }

    /// Convert to a hyper [`HeaderMap`].
    ///
    /// `HeaderMap` groups values by name, so only the order of values within
    /// one name survives the conversion.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            map.append(name.clone(), value.clone());
        }
        map
    }
}

/// Entries come out grouped by name, in `HeaderMap` iteration order.
impl From<&HeaderMap> for Headers {
    fn from(map: &HeaderMap) -> Self {
        let entries = map
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Self { entries }
    }
}

impl From<HeaderMap> for Headers {
    fn from(map: HeaderMap) -> Self {
        Self::from(&map)
    }
}

impl FromIterator<(HeaderName, HeaderValue)> for Headers {
    fn from_iter<I: IntoIterator<Item = (HeaderName, HeaderValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let pairs: Vec<(&str, String)> = self
            .entries
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        pairs.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Headers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs: Vec<(String, String)> = Vec::deserialize(deserializer)?;
        let mut headers = Headers::new();
        for (name, value) in pairs {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| D::Error::custom(format!("invalid header name '{name}': {e}")))?;
            let value = HeaderValue::try_from(value.as_str()).map_err(|e| {
                D::Error::custom(format!("invalid header value for '{name}': {e}"))
            })?;
            headers.append(name, value);
        }
        Ok(headers)
    }
}
