// Pure content rewriting, no filesystem access

use crate::depth::SiteLocation;
use crate::navigation::{NavigationMap, has_unambiguous_legacy_links};
use regex::Regex;
use std::sync::LazyLock;

static ASSET_REF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(href|src)="assets/"#).unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub asset_replacements: usize,
    pub link_replacements: usize,
}

impl Rewrite {
    pub fn replacements(&self) -> usize {
        self.asset_replacements + self.link_replacements
    }
}

/// Prefix every `href="assets/` and `src="assets/` with `prefix`.
pub fn prefix_assets(content: &str, prefix: &str) -> (String, usize) {
    if prefix.is_empty() {
        return (content.to_string(), 0);
    }

    let count = ASSET_REF.find_iter(content).count();
    let rewritten = ASSET_REF.replace_all(content, |caps: &regex::Captures| {
        format!("{}=\"{}assets/", &caps[1], prefix)
    });
    (rewritten.into_owned(), count)
}

/// Make asset and navigation references correct for `location`.
///
/// Safe to run on its own output. Prefixed assets no longer match the asset
/// pattern, and in a migrated conference page the bare sibling links are
/// left alone.
pub fn rewrite_content(content: &str, location: &SiteLocation) -> Rewrite {
    let map = NavigationMap::builder(location.depth)
        .conference_local(location.conference_local)
        .keep_sibling_links(!is_legacy_page(content))
        .build();
    rewrite_with_map(content, &map)
}

pub fn rewrite_with_map(content: &str, map: &NavigationMap) -> Rewrite {
    let (content, asset_replacements) = prefix_assets(content, map.prefix());
    let (content, link_replacements) = map.apply(&content);

    Rewrite {
        content,
        asset_replacements,
        link_replacements,
    }
}

/// A page that still has unprefixed assets or legacy navigation links has
/// not been through [`rewrite_content`] yet.
pub fn is_legacy_page(content: &str) -> bool {
    ASSET_REF.is_match(content) || has_unambiguous_legacy_links(content)
}
