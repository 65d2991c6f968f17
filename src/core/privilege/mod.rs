//! Privilege dropping.
//!
//! Switches the process to another user before exec. Credentials are
//! lowered in a fixed order: supplementary groups, primary gid, then uid.
//! Once the uid is unprivileged the OS refuses further group changes, and a
//! failure at any step aborts the invocation. Nothing is rolled back.

use std::io;
use std::path::PathBuf;

use tracing::debug;

use super::constants;
use super::env::ChildEnvironment;
use crate::error::{Error, Result};

pub mod passwd;

pub use passwd::{LookupError, UserDatabase};

/// Credentials of the user to switch to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegeTarget {
    pub uid: u32,
    pub gid: u32,
    pub supplementary_gids: Vec<u32>,
    pub home: PathBuf,
}

/// Process credential primitives.
pub trait Credentials {
    fn set_groups(&mut self, gids: &[u32]) -> io::Result<()>;
    fn set_gid(&mut self, gid: u32) -> io::Result<()>;
    fn set_uid(&mut self, uid: u32) -> io::Result<()>;
    /// Current real gid, used for numeric users without a passwd record.
    fn current_gid(&self) -> u32;
}

/// The calling process's credentials.
#[derive(Debug, Default)]
pub struct ProcessCredentials;

impl Credentials for ProcessCredentials {
    #[cfg(not(target_vendor = "apple"))]
    fn set_groups(&mut self, gids: &[u32]) -> io::Result<()> {
        let gids: Vec<_> = gids.iter().map(|g| nix::unistd::Gid::from_raw(*g)).collect();
        nix::unistd::setgroups(&gids).map_err(io::Error::from)
    }

    #[cfg(target_vendor = "apple")]
    fn set_groups(&mut self, gids: &[u32]) -> io::Result<()> {
        let gids: Vec<libc::gid_t> = gids.to_vec();
        let count = group_count(gids.len())?;
        // SAFETY: the pointer and length describe a live, initialized buffer.
        let rc = unsafe { libc::setgroups(count, gids.as_ptr()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    fn set_gid(&mut self, gid: u32) -> io::Result<()> {
        nix::unistd::setgid(nix::unistd::Gid::from_raw(gid)).map_err(io::Error::from)
    }

    fn set_uid(&mut self, uid: u32) -> io::Result<()> {
        nix::unistd::setuid(nix::unistd::Uid::from_raw(uid)).map_err(io::Error::from)
    }

    fn current_gid(&self) -> u32 {
        nix::unistd::getgid().as_raw()
    }
}

/// Group list length as the C `int` taken by `setgroups(2)`.
#[cfg(any(target_vendor = "apple", test))]
fn group_count(len: usize) -> io::Result<libc::c_int> {
    libc::c_int::try_from(len).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("too many supplementary groups: {}", len),
        )
    })
}

/// Switch to `user` and default `HOME` in `env`.
///
/// `HOME` is set to the target's home directory only when `env` has no
/// `HOME`; callers that want the target's home must remove it first.
///
/// # Errors
///
/// Returns `Error::UserResolution` before touching any credential if the
/// user is unknown or the databases are unreadable, and `Error::Privilege`
/// if the OS refuses a credential change.
pub fn drop_privileges<C: Credentials>(
    user: &str,
    database: &UserDatabase,
    credentials: &mut C,
    env: &mut ChildEnvironment,
) -> Result<PrivilegeTarget> {
    let target = database
        .resolve(user, credentials.current_gid())
        .map_err(|source| Error::UserResolution {
            user: user.to_string(),
            source,
        })?;

    debug!(
        uid = target.uid,
        gid = target.gid,
        groups = ?target.supplementary_gids,
        "dropping privileges"
    );

    let fail = |step: &'static str| {
        move |source: io::Error| Error::Privilege {
            user: user.to_string(),
            step,
            source,
        }
    };
    credentials
        .set_groups(&target.supplementary_gids)
        .map_err(fail("setgroups"))?;
    credentials.set_gid(target.gid).map_err(fail("setgid"))?;
    credentials.set_uid(target.uid).map_err(fail("setuid"))?;

    if !env.contains(constants::HOME) {
        env.set(constants::HOME, target.home.display().to_string());
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Groups(Vec<u32>),
        Gid(u32),
        Uid(u32),
    }

    /// Records credential calls; optionally refuses one step.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        refuse: Option<&'static str>,
    }

    impl Recorder {
        fn check(&self, step: &'static str) -> io::Result<()> {
            if self.refuse == Some(step) {
                Err(io::Error::from(io::ErrorKind::PermissionDenied))
            } else {
                Ok(())
            }
        }
    }

    impl Credentials for Recorder {
        fn set_groups(&mut self, gids: &[u32]) -> io::Result<()> {
            self.calls.push(Call::Groups(gids.to_vec()));
            self.check("setgroups")
        }

        fn set_gid(&mut self, gid: u32) -> io::Result<()> {
            self.calls.push(Call::Gid(gid));
            self.check("setgid")
        }

        fn set_uid(&mut self, uid: u32) -> io::Result<()> {
            self.calls.push(Call::Uid(uid));
            self.check("setuid")
        }

        fn current_gid(&self) -> u32 {
            7
        }
    }

    fn database() -> (tempfile::TempDir, UserDatabase) {
        let dir = tempfile::tempdir().unwrap();
        let passwd = dir.path().join("passwd");
        let group = dir.path().join("group");
        std::fs::write(&passwd, "app:x:1000:1001:App:/home/app:/bin/sh\n").unwrap();
        std::fs::write(&group, "app:x:1001:\nwheel:x:10:root,app\n").unwrap();
        (dir, UserDatabase::new(passwd, group))
    }

    #[test]
    fn test_unknown_user_makes_no_calls() {
        let (_dir, db) = database();
        let mut recorder = Recorder::default();
        let mut env = ChildEnvironment::new();

        let err = drop_privileges("nonexistent-user", &db, &mut recorder, &mut env).unwrap_err();

        assert!(matches!(err, Error::UserResolution { .. }));
        assert!(recorder.calls.is_empty());
        assert!(env.is_empty());
    }

    #[test]
    fn test_call_order() {
        let (_dir, db) = database();
        let mut recorder = Recorder::default();
        let mut env = ChildEnvironment::new();

        drop_privileges("app", &db, &mut recorder, &mut env).unwrap();

        assert_eq!(
            recorder.calls,
            vec![Call::Groups(vec![10]), Call::Gid(1001), Call::Uid(1000)]
        );
    }

    #[test]
    fn test_home_defaulted_when_absent() {
        let (_dir, db) = database();
        let mut env = ChildEnvironment::new();

        drop_privileges("app", &db, &mut Recorder::default(), &mut env).unwrap();

        assert_eq!(env.get("HOME"), Some("/home/app"));
    }

    #[test]
    fn test_home_left_untouched_when_present() {
        let (_dir, db) = database();
        let mut env: ChildEnvironment = [("HOME", "/root")].into_iter().collect();

        drop_privileges("app", &db, &mut Recorder::default(), &mut env).unwrap();

        assert_eq!(env.get("HOME"), Some("/root"));
    }

    #[test]
    fn test_failure_stops_sequence() {
        let (_dir, db) = database();
        let mut recorder = Recorder {
            refuse: Some("setgid"),
            ..Recorder::default()
        };
        let mut env = ChildEnvironment::new();

        let err = drop_privileges("app", &db, &mut recorder, &mut env).unwrap_err();

        match err {
            Error::Privilege { step, .. } => assert_eq!(step, "setgid"),
            other => panic!("expected privilege error, got {:?}", other),
        }
        assert_eq!(recorder.calls, vec![Call::Groups(vec![10]), Call::Gid(1001)]);
        assert!(!env.contains("HOME"));
    }

    #[test]
    fn test_group_count_bounds() {
        assert_eq!(group_count(3).unwrap(), 3);
        let err = group_count(usize::MAX).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_numeric_user_uses_current_gid() {
        let (_dir, db) = database();
        let mut recorder = Recorder::default();
        let mut env = ChildEnvironment::new();

        let target = drop_privileges("5000", &db, &mut recorder, &mut env).unwrap();

        assert_eq!(target.gid, 7);
        assert_eq!(
            recorder.calls,
            vec![Call::Groups(vec![]), Call::Gid(7), Call::Uid(5000)]
        );
        assert_eq!(env.get("HOME"), Some("/"));
    }
}
