//! Path normalization, relative resolution and shortcut indirection.
//!
//! # Path Convention
//!
//! - Root: `"/"`
//! - Drive: `"/C:"`
//! - Nested: `"/C:/Users/Guest"`
//! - Always one leading slash, no trailing slash, no empty segments
//!
//! Shortcuts are logical aliases (soft symlinks) such as `/My Computer/C:`.
//! They are resolved at lookup time and never written into an item's path.

/// Path separator.
pub const SEPARATOR: char = '/';

/// Root path.
pub const ROOT: &str = "/";

/// Logical aliases and the canonical path they point at.
pub const SHORTCUTS: &[(&str, &str)] = &[
    ("/My Computer", "/"),
    ("/My Computer/C:", "/C:/"),
    ("/My Documents", "/C:/Users/Guest/Documents"),
    ("/Desktop", "/C:/Users/Guest/Desktop"),
    ("/Control Panel", "/C:/Windows/System32"),
];

/// Prefix lengths (in segments) probed when the full path is not a shortcut.
/// Longest first, so `/My Computer/C:` wins over `/My Computer`.
const SHORTCUT_PREFIX_SEGMENTS: [usize; 2] = [2, 1];

/// Normalize a path: drop empty segments and rejoin with one leading slash.
///
/// `.` and `..` are not interpreted here; see [`resolve`].
pub fn normalize(path: &str) -> String {
    let segments: Vec<&str> = segments(path).collect();
    join_segments(&segments)
}

/// Resolve `target` against `current`.
///
/// Absolute targets are normalized directly. Relative targets are applied
/// segment by segment: `.` is a no-op, `..` pops the last segment and never
/// goes above the root.
pub fn resolve(current: &str, target: &str) -> String {
    if target.starts_with(SEPARATOR) {
        return normalize(target);
    }

    let mut parts: Vec<&str> = segments(current).collect();
    for part in segments(target) {
        match part {
            "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }

    join_segments(&parts)
}

/// Map a logical alias to its canonical target.
///
/// The full path is tried first, then its 2- and 1-segment prefixes; on a
/// prefix match the unmatched remainder is appended to the alias target.
/// Paths that are not shortcuts come back unchanged.
pub fn resolve_shortcut(path: &str) -> String {
    if let Some(target) = lookup_shortcut(path) {
        return target.to_string();
    }

    let parts: Vec<&str> = segments(path).collect();
    for len in SHORTCUT_PREFIX_SEGMENTS {
        if parts.len() <= len {
            continue;
        }
        let prefix = join_segments(&parts[..len]);
        if let Some(base) = lookup_shortcut(&prefix) {
            let remainder = parts[len..].join("/");
            return if base.ends_with(SEPARATOR) {
                format!("{}{}", base, remainder)
            } else {
                format!("{}/{}", base, remainder)
            };
        }
    }

    path.to_string()
}

/// [`resolve`] followed by [`resolve_shortcut`] and a final normalization.
///
/// This is the form every lookup site uses.
pub fn resolve_with_shortcuts(current: &str, target: &str) -> String {
    let resolved = resolve(current, target);
    normalize(&resolve_shortcut(&resolved))
}

/// Parent of a normalized path; the root is its own parent.
pub fn parent_path(path: &str) -> String {
    let parts: Vec<&str> = segments(path).collect();
    match parts.split_last() {
        Some((_, parent)) => join_segments(parent),
        None => ROOT.to_string(),
    }
}

/// Last segment of a path (empty for the root).
pub fn file_name(path: &str) -> &str {
    segments(path).last().unwrap_or("")
}

/// Join a child name onto a parent path.
pub fn join(parent: &str, name: &str) -> String {
    if parent == ROOT || parent.is_empty() {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent.trim_end_matches(SEPARATOR), name)
    }
}

/// Check if a path is the root.
pub fn is_root(path: &str) -> bool {
    segments(path).next().is_none()
}

/// Render a path the way the prompt shows it: `/C:/Users` → `C:\Users`.
pub fn to_display(path: &str) -> String {
    let parts: Vec<&str> = segments(path).collect();
    match parts.as_slice() {
        [] => "\\".to_string(),
        [drive] => format!("{}\\", drive),
        _ => parts.join("\\"),
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty())
}

fn join_segments(parts: &[&str]) -> String {
    format!("/{}", parts.join("/"))
}

fn lookup_shortcut(path: &str) -> Option<&'static str> {
    SHORTCUTS
        .iter()
        .find(|(alias, _)| *alias == path)
        .map(|(_, target)| *target)
}
