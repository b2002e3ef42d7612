//! Lexical path helpers for project-relative include directories.
//!
//! Vivado can only create a project in its own working directory, so paths
//! the build hands us (relative to the workspace root) are re-rooted by
//! prefixing `..` once per directory level. These helpers never touch the
//! filesystem and always use `/` separators, since the output is TCL.

/// `..` repeated `depth` times, joined by `/`. Empty for depth 0.
pub fn parent_prefix(depth: usize) -> String {
    vec![".."; depth].join("/")
}

/// Join `prefix` and `path` and clean the result lexically.
///
/// The prefix applies to absolute paths too: `/opt/inc` under `..` becomes
/// `../opt/inc`.
pub fn join_prefixed(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        return clean(path);
    }
    clean(&format!("{prefix}/{path}"))
}

/// Directory portion of `path` after cleaning; `.` when there is none.
pub fn dir_of(path: &str) -> String {
    let cleaned = clean(path);
    match cleaned.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => cleaned[..idx].to_string(),
        None => ".".to_string(),
    }
}

/// Shortest lexically equivalent form of `path`: collapses repeated
/// separators, drops `.` elements and resolves `..` against preceding
/// elements where possible.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last().copied() {
                Some(last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }
    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}
