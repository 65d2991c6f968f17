//! KMS encryption context.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};

/// Authenticated, non-secret metadata bound to KMS ciphertext.
///
/// Parsed once per invocation and shared by every KMS call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecryptionContext(BTreeMap<String, String>);

impl DecryptionContext {
    /// Parse `NAME=VALUE` pairs. Values may contain `=`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Usage` if a pair has no `=`.
    pub fn parse<S: AsRef<str>>(pairs: &[S]) -> Result<Self> {
        let mut map = BTreeMap::new();
        for pair in pairs {
            let (name, value) = pair.as_ref().split_once('=').ok_or_else(|| {
                Error::Usage("context must be provided in NAME=VALUE format".to_string())
            })?;
            map.insert(name.to_string(), value.to_string());
        }
        Ok(Self(map))
    }

    /// Parse a comma separated list of `NAME=VALUE` pairs, as found in the
    /// environment. Empty items are ignored.
    pub fn parse_list(list: &str) -> Result<Self> {
        let pairs: Vec<&str> = list.split(',').filter(|p| !p.is_empty()).collect();
        Self::parse(&pairs)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Map for the SDK request builders; `None` when empty.
    pub fn to_request(&self) -> Option<HashMap<String, String>> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.clone().into_iter().collect())
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DecryptionContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
