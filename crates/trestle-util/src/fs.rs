use std::path::{Component, Path, PathBuf};

/// Walk up from `start` looking for a file named `filename`.
/// Returns the path to the directory containing the file, or `None`.
pub fn find_ancestor_with(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Fold `.` and `..` components of a path without touching the filesystem.
///
/// `..` at the root of an absolute path is dropped, matching how the OS
/// resolves `/..`. Leading `..` components of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Make `path` absolute against `base` (or the current directory when `base`
/// is `None`) and normalize it lexically.
///
/// Returns `None` for an empty path, or when no absolute anchor is available.
pub fn absolutize(path: &Path, base: Option<&Path>) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        return None;
    }
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let anchor = match base {
            Some(b) => b.to_path_buf(),
            None => std::env::current_dir().ok()?,
        };
        if !anchor.is_absolute() {
            return None;
        }
        anchor.join(path)
    };
    Some(normalize(&joined))
}

/// Returns `true` if `path` is `root` or lies below it, comparing
/// normalized components.
pub fn is_within(path: &Path, root: &Path) -> bool {
    normalize(path).starts_with(normalize(root))
}
