//! Lexical path resolution and search-path handling

use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

/// Separator between entries of a `PATH`-style variable on this host.
pub const SEARCH_PATH_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Resolve `path` against `cwd` and drop `.` and `..` components.
///
/// Purely lexical: symlinks are not followed and the path does not need
/// to exist. A `..` at the root stays at the root.
pub fn absolutize(path: impl AsRef<Path>, cwd: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.as_ref().join(path)
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(
                    resolved.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    resolved.pop();
                }
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

/// Check whether `dir` is one of the entries of a search-path value.
///
/// Entries are compared as whole paths, so `/opt/env/bin` does not match
/// `/opt/env/bin2`.
pub fn search_path_contains(search_path: impl AsRef<OsStr>, dir: &Path) -> bool {
    std::env::split_paths(search_path.as_ref()).any(|entry| entry == dir)
}

/// Put `dir` in front of a search-path value.
///
/// Existing entries keep their order and bytes. An empty or missing value
/// yields `dir` alone.
pub fn prepend_search_path(search_path: Option<&OsStr>, dir: &Path) -> OsString {
    let mut updated = OsString::from(dir);
    if let Some(rest) = search_path.filter(|rest| !rest.is_empty()) {
        updated.push(SEARCH_PATH_SEPARATOR.to_string());
        updated.push(rest);
    }
    updated
}

/// Locate `program` on a search path, the way a shell would.
///
/// On Windows the extensions from `PATHEXT` (or the usual defaults) are
/// tried. On Unix only files with an execute bit count.
pub fn find_on_search_path(
    program: &str,
    search_path: impl AsRef<OsStr>,
    pathext: Option<&str>,
) -> Option<PathBuf> {
    let extensions: Vec<String> = if cfg!(windows) {
        pathext
            .unwrap_or(".COM;.EXE;.BAT;.CMD")
            .split(';')
            .map(|s| s.to_ascii_lowercase())
            .collect()
    } else {
        vec![String::new()]
    };

    for dir in std::env::split_paths(search_path.as_ref()) {
        for ext in &extensions {
            let candidate = if ext.is_empty() || program.to_ascii_lowercase().ends_with(ext) {
                dir.join(program)
            } else {
                dir.join(format!("{}{}", program, ext))
            };
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Whether `path` is a file this host would run.
pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}
