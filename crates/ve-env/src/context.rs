//! Injectable process environment

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::{OsStr, OsString};

/// Well-known variable names
pub mod vars {
    /// Marker naming the root of the active environment
    pub const VIRTUAL_ENV: &str = "VIRTUAL_ENV";
    /// Executable search path
    pub const PATH: &str = "PATH";
    /// Executable extensions tried on Windows
    pub const PATHEXT: &str = "PATHEXT";
    /// Interpreter home; corrupts a virtual environment when set
    pub const PYTHONHOME: &str = "PYTHONHOME";
    /// Interpreter module search path
    pub const PYTHONPATH: &str = "PYTHONPATH";
}

/// An owned snapshot of environment variables.
///
/// Bootstrap logic reads and edits this value instead of the real process
/// environment. Changes reach the process only through
/// [`EnvironmentContext::apply_to_process`], and reach child processes
/// through [`EnvironmentContext::vars`]. Names and values are kept as raw
/// OS strings, so nothing captured from the process is lost.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentContext {
    vars: BTreeMap<OsString, OsString>,
    removed: BTreeSet<OsString>,
}

impl EnvironmentContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    /// Build a context from explicit key/value pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            removed: BTreeSet::new(),
        }
    }

    /// Look up a variable whose value is valid Unicode.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_os(name).and_then(OsStr::to_str)
    }

    /// Look up a variable as a raw OS string.
    pub fn get_os(&self, name: &str) -> Option<&OsStr> {
        self.key_for(name)
            .and_then(|key| self.vars.get(key))
            .map(OsString::as_os_str)
    }

    /// Check whether a variable is set.
    pub fn contains(&self, name: &str) -> bool {
        self.key_for(name).is_some()
    }

    /// Set a variable, replacing any previous value.
    pub fn set(&mut self, name: &str, value: impl Into<OsString>) {
        let key = self
            .key_for(name)
            .map(OsStr::to_os_string)
            .unwrap_or_else(|| OsString::from(name));
        self.removed.remove(&key);
        self.vars.insert(key, value.into());
    }

    /// Remove a variable, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<OsString> {
        let key = self.key_for(name)?.to_os_string();
        let previous = self.vars.remove(&key);
        self.removed.insert(key);
        previous
    }

    /// Iterate over all variables in key order.
    pub fn vars(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// Drop `PYTHONHOME`, which would make the environment's interpreter
    /// load the wrong standard library.
    ///
    /// Returns the discarded value so callers can report it.
    pub fn discard_python_home(&mut self) -> Option<OsString> {
        let previous = self.remove(vars::PYTHONHOME)?;
        tracing::warn!(
            value = %previous.to_string_lossy(),
            "ignoring the value of the PYTHONHOME environment variable! \
             This value can corrupt the virtual python installation."
        );
        Some(previous)
    }

    /// Write this context back into the real process environment.
    ///
    /// Only variables that were removed through this context, or whose
    /// value differs from the process, are touched.
    ///
    /// Must only be called while no other thread reads or writes the
    /// environment; the bootstrap entry points run before any threads start.
    pub fn apply_to_process(&self) {
        for key in &self.removed {
            if std::env::var_os(key).is_some() {
                tracing::debug!(key = %key.to_string_lossy(), "unset");
                // SAFETY: single-threaded bootstrap, see doc comment above.
                unsafe { std::env::remove_var(key) };
            }
        }
        for (key, value) in &self.vars {
            if std::env::var_os(key).as_ref() != Some(value) {
                tracing::debug!(
                    key = %key.to_string_lossy(),
                    value = %value.to_string_lossy(),
                    "set"
                );
                // SAFETY: single-threaded bootstrap, see doc comment above.
                unsafe { std::env::set_var(key, value) };
            }
        }
    }

    /// Resolve the stored spelling of a variable name.
    ///
    /// Windows treats names case-insensitively (`Path` vs `PATH`).
    fn key_for(&self, name: &str) -> Option<&OsStr> {
        if cfg!(windows) {
            self.vars
                .keys()
                .find(|k| k.eq_ignore_ascii_case(name))
                .map(OsString::as_os_str)
        } else {
            self.vars
                .get_key_value(OsStr::new(name))
                .map(|(k, _)| k.as_os_str())
        }
    }
}
