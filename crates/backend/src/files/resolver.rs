//! Adapter and path resolution.
//!
//! The UI addresses directories with an adapter name plus a raw path that
//! may be empty or carry a `scheme://` prefix from its navigation and search
//! widgets. These helpers turn that pair into an absolute store path and
//! provide the small string path utilities the rest of the Finder uses.

/// Marker left by the UI's address bar when it jumps to an absolute path.
const ABSOLUTE_SCHEME_MARKER: &str = ":///";

/// Marker of a bare `adapter://` reference.
const SCHEME_MARKER: &str = "://";

/// Resolve the raw UI path for `adapter` into an absolute store path.
///
/// - empty → `/<adapter>`
/// - contains `:///` → `/` followed by everything after the marker
/// - contains `://` with nothing after it → `/<adapter>`
/// - anything else is returned unchanged
pub fn resolve_path(adapter: &str, raw: &str) -> String {
    if raw.is_empty() {
        return format!("/{adapter}");
    }

    if let Some((_, rest)) = raw.split_once(ABSOLUTE_SCHEME_MARKER) {
        return format!("/{rest}");
    }

    if let Some((_, rest)) = raw.split_once(SCHEME_MARKER) {
        if rest.is_empty() {
            return format!("/{adapter}");
        }
    }

    raw.to_string()
}

/// Whether listings of `path` get synthetic `.` and `..` entries.
///
/// A path with exactly one `/` (`/home`, `/data`) is a storage root and has
/// nowhere to go up to.
pub fn needs_navigation_entries(path: &str) -> bool {
    path.matches('/').count() != 1
}

/// Parent of `path`: everything before the last `/`, `/` for top-level
/// paths and `.` when there is no separator at all.
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => ".",
    }
}

/// Final segment of `path`, ignoring trailing separators.
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Join a directory and a child name with exactly one `/` between them.
pub fn join(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    format!("{dir}/{name}")
}

/// Extension of a basename: the text after its last `.`, or empty.
pub fn extension(basename: &str) -> &str {
    basename
        .rfind('.')
        .map(|idx| &basename[idx + 1..])
        .unwrap_or("")
}
