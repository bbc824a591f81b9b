//! Path normalization.
//!
//! Every path is normalized before it is used as a comparison key, a
//! prefix-match subject, or an exclusion subject. Normalization is purely
//! lexical: it never touches the filesystem and never resolves symlinks.

/// Separator used in snapshot paths
pub const SEPARATOR: char = '/';

/// Lexically clean `path`.
///
/// Collapses repeated separators, drops `.` segments, resolves `..` against
/// the preceding segment (`..` at the root is dropped), and removes any
/// trailing separator except for the root itself. An empty result is `.`.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with(SEPARATOR);
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("{}{}", SEPARATOR, joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Normalize `path` for comparison.
///
/// The result carries exactly one trailing separator iff `is_dir` is true.
/// Idempotent: `normalize(&normalize(p, d), d) == normalize(p, d)`.
pub fn normalize(path: &str, is_dir: bool) -> String {
    let mut cleaned = clean(path);
    if is_dir && !cleaned.ends_with(SEPARATOR) {
        cleaned.push(SEPARATOR);
    }
    cleaned
}
