//! Staged environments.
//!
//! An [`Environment`] is an ordered list of variables built in memory and
//! handed to the child process. Nothing here touches the live process
//! environment table.

use std::ffi::{OsStr, OsString};
use std::fmt;

use zeroize::Zeroizing;

/// Ordered `NAME -> VALUE` assignments with zeroized values.
///
/// Variables that are not valid UTF-8 are kept in a separate opaque list.
/// They are never secrets and only exist to be handed to the child.
#[derive(Default, Clone)]
pub struct Environment {
    vars: Vec<(String, Zeroizing<String>)>,
    opaque: Vec<(OsString, OsString)>,
}

/// Decrypted assignments produced by the driver.
pub type OutgoingEnvironment = Environment;

/// Full environment of the process to exec.
pub type ChildEnvironment = Environment;

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, replacing an existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Zeroizing<String>>) {
        let name = name.into();
        let value = value.into();
        self.opaque.retain(|(n, _)| n.as_os_str() != OsStr::new(&name));
        match self.vars.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.vars.push((name, value)),
        }
    }

    /// Apply every assignment of `other` on top of this environment.
    pub fn merge(&mut self, other: Environment) {
        for (name, value) in other.opaque {
            self.set_opaque(name, value);
        }
        for (name, value) in other.vars {
            self.set(name, value);
        }
    }

    /// Add a variable that is not valid UTF-8, replacing any value of the
    /// same name.
    pub fn set_opaque(&mut self, name: OsString, value: OsString) {
        if let Some(name) = name.to_str() {
            self.vars.retain(|(n, _)| n != name);
        }
        match self.opaque.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.opaque.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of `name` from either list.
    pub fn get_os(&self, name: &str) -> Option<&OsStr> {
        self.get(name).map(OsStr::new).or_else(|| {
            self.opaque
                .iter()
                .find(|(n, _)| n.as_os_str() == OsStr::new(name))
                .map(|(_, v)| v.as_os_str())
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_os(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.len();
        self.vars.retain(|(n, _)| n != name);
        self.opaque.retain(|(n, _)| n.as_os_str() != OsStr::new(name));
        self.len() != before
    }

    pub fn len(&self) -> usize {
        self.vars.len() + self.opaque.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|(n, _)| n.as_str())
    }

    /// UTF-8 variables only.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Every variable, opaque ones last.
    pub fn iter_os(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars
            .iter()
            .map(|(n, v)| (OsStr::new(n.as_str()), OsStr::new(v.as_str())))
            .chain(self.opaque.iter().map(|(n, v)| (n.as_os_str(), v.as_os_str())))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        for (name, value) in iter {
            let value: String = value.into();
            env.set(name, value);
        }
        env
    }
}

// Names only; values may be decrypted secrets.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.names())
            .entries(self.opaque.iter().map(|(n, _)| n))
            .finish()
    }
}
