//! Passwd and group database parsing.
//!
//! Reads the colon separated `/etc/passwd` and `/etc/group` formats.
//! Blank lines, comments, and malformed records are skipped.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::PrivilegeTarget;
use crate::core::constants;

/// One `/etc/passwd` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswdEntry {
    pub name: String,
    pub uid: u32,
    pub gid: u32,
    pub home: String,
}

/// One `/etc/group` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub name: String,
    pub gid: u32,
    pub members: Vec<String>,
}

/// Parse passwd records: `name:password:uid:gid:gecos:home:shell`.
pub fn parse_passwd(contents: &str) -> Vec<PasswdEntry> {
    records(contents)
        .filter_map(|fields| {
            if fields.len() < 6 {
                return None;
            }
            Some(PasswdEntry {
                name: fields[0].to_string(),
                uid: fields[2].parse().ok()?,
                gid: fields[3].parse().ok()?,
                home: fields[5].to_string(),
            })
        })
        .collect()
}

/// Parse group records: `name:password:gid:member,member`.
pub fn parse_group(contents: &str) -> Vec<GroupEntry> {
    records(contents)
        .filter_map(|fields| {
            if fields.len() < 3 {
                return None;
            }
            let members = fields
                .get(3)
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|m| !m.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            Some(GroupEntry {
                name: fields[0].to_string(),
                gid: fields[2].parse().ok()?,
                members,
            })
        })
        .collect()
}

fn records(contents: &str) -> impl Iterator<Item = Vec<&str>> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.split(':').collect())
}

/// Why a user could not be resolved.
#[derive(Error, Debug)]
pub enum LookupError {
    /// A database file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No passwd record and the name is not numeric.
    #[error("no matching entries in passwd file")]
    UnknownUser,
}

/// User and group databases.
#[derive(Debug, Clone)]
pub struct UserDatabase {
    passwd: PathBuf,
    group: PathBuf,
}

impl Default for UserDatabase {
    fn default() -> Self {
        Self::new(constants::PASSWD_FILE, constants::GROUP_FILE)
    }
}

impl UserDatabase {
    pub fn new(passwd: impl Into<PathBuf>, group: impl Into<PathBuf>) -> Self {
        Self {
            passwd: passwd.into(),
            group: group.into(),
        }
    }

    /// Resolve `user`, a login name or a numeric uid.
    ///
    /// A numeric uid with no passwd record resolves to that uid with
    /// `fallback_gid` and home `/`. Supplementary groups are the groups that
    /// list the user's name as a member, in file order.
    pub fn resolve(&self, user: &str, fallback_gid: u32) -> Result<PrivilegeTarget, LookupError> {
        let passwd = parse_passwd(&read(&self.passwd)?);
        let numeric = user.parse::<u32>().ok();

        let record = passwd
            .into_iter()
            .find(|p| p.name == user || Some(p.uid) == numeric);

        let (name, uid, gid, home) = match (record, numeric) {
            (Some(p), _) => (Some(p.name), p.uid, p.gid, p.home),
            (None, Some(uid)) => (None, uid, fallback_gid, "/".to_string()),
            (None, None) => return Err(LookupError::UnknownUser),
        };

        let mut supplementary_gids = Vec::new();
        if let Some(name) = &name {
            for group in parse_group(&read(&self.group)?) {
                if group.members.iter().any(|m| m == name)
                    && !supplementary_gids.contains(&group.gid)
                {
                    supplementary_gids.push(group.gid);
                }
            }
        }

        debug!(user, uid, gid, groups = supplementary_gids.len(), "resolved user");
        Ok(PrivilegeTarget {
            uid,
            gid,
            supplementary_gids,
            home: PathBuf::from(home),
        })
    }
}

fn read(path: &Path) -> Result<String, LookupError> {
    std::fs::read_to_string(path).map_err(|source| LookupError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}
