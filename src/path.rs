//! Canonicalization of caller-supplied document paths.
//!
//! Every path that reaches the resolver goes through [`normalize_path`] first,
//! and [`has_traversal`] is checked before the filesystem is touched.

/// Normalize a caller-supplied path into a comparable form.
///
/// - `\` becomes `/`
/// - leading `./` and `/` are stripped (repeatedly)
/// - runs of `/` collapse to one
/// - one trailing `/` is stripped
///
/// The document root itself normalizes to the empty string.
///
/// Examples:
/// - `./a//b/` → `a/b`
/// - `\docs\guide.md` → `docs/guide.md`
/// - `/` → ``
pub fn normalize_path(raw: &str) -> String {
    let forward = raw.replace('\\', "/");

    let mut rest = forward.as_str();
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
        } else {
            break;
        }
    }

    let mut normalized = String::with_capacity(rest.len());
    for ch in rest.chars() {
        if ch == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(ch);
    }

    if normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}

/// Returns true if any `/`-delimited segment is exactly `..`.
///
/// Expects a path already passed through [`normalize_path`].
pub fn has_traversal(normalized: &str) -> bool {
    normalized.split('/').any(|segment| segment == "..")
}

/// Join display segments with `/`, dropping empty segments.
pub fn join_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Final `/`-delimited segment of a normalized path.
pub fn last_segment(normalized: &str) -> &str {
    normalized.rsplit('/').next().unwrap_or(normalized)
}
