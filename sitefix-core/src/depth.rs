// Directory depth and relative prefixes

use std::path::{Component, Path};

/// Organizational directory that does not count towards depth.
pub const PAGES_SEGMENT: &str = "pages";

pub const PARENT_TOKEN: &str = "../";

/// Directory subtree whose files link to each other as siblings. Files
/// nested further down count as part of it.
pub const CONFERENCE_SUBTREE: &[&str] = &["conferences", "techmun"];

const ENUMERATED_PREFIXES: [&str; 5] = ["", "../", "../../", "../../../", "../../../../"];

/// Number of directories between the site root and `path`, not counting
/// `pages`. `path` is relative to the site root.
pub fn compute_depth(path: &Path) -> usize {
    directory_segments(path).len()
}

/// The `../` chain that leads from `depth` back to the site root.
pub fn relative_prefix(depth: usize) -> String {
    match ENUMERATED_PREFIXES.get(depth) {
        Some(prefix) => prefix.to_string(),
        None => PARENT_TOKEN.repeat(depth),
    }
}

fn directory_segments(path: &Path) -> Vec<&str> {
    let Some(dir) = path.parent() else {
        return Vec::new();
    };

    dir.components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_str().unwrap_or("?")),
            _ => None,
        })
        .filter(|segment| *segment != PAGES_SEGMENT)
        .collect()
}

/// Where a file sits in the site tree, as far as link rewriting cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteLocation {
    pub depth: usize,
    /// File lives inside the conference subtree, where legacy links point
    /// at sibling pages.
    pub conference_local: bool,
}

impl SiteLocation {
    pub fn new(depth: usize, conference_local: bool) -> Self {
        Self {
            depth,
            conference_local,
        }
    }

    pub fn of(path: &Path) -> Self {
        let segments = directory_segments(path);
        Self {
            depth: segments.len(),
            conference_local: segments
                .windows(CONFERENCE_SUBTREE.len())
                .any(|window| window == CONFERENCE_SUBTREE),
        }
    }

    pub fn prefix(&self) -> String {
        relative_prefix(self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_past_enumerated_range() {
        assert_eq!(compute_depth(Path::new("a/b/c/d/e/f.html")), 5);
        assert_eq!(relative_prefix(5), "../../../../../");
    }
}
