// Legacy page names and their canonical locations

use crate::depth::relative_prefix;

/// A page that moved during the reorganization.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    /// Flat filename used before the move
    pub legacy: &'static str,
    /// Location relative to the site root
    pub canonical: &'static str,
    /// Filename used by pages that sit next to it in the conference subtree
    pub sibling: Option<&'static str>,
    /// Template variable holding the link to this page
    pub template_var: &'static str,
}

pub const ROUTES: &[Route] = &[
    Route {
        legacy: "index.html",
        canonical: "index.html",
        sibling: None,
        template_var: "HOME_LINK",
    },
    Route {
        legacy: "Leadership.html",
        canonical: "pages/about/leadership.html",
        sibling: None,
        template_var: "LEADERSHIP_LINK",
    },
    Route {
        legacy: "Calendar.html",
        canonical: "pages/events/calendar.html",
        sibling: None,
        template_var: "CALENDAR_LINK",
    },
    Route {
        legacy: "Forms.html",
        canonical: "pages/events/forms.html",
        sibling: None,
        template_var: "FORMS_LINK",
    },
    Route {
        legacy: "Awards.html",
        canonical: "pages/about/awards.html",
        sibling: None,
        template_var: "AWARDS_LINK",
    },
    Route {
        legacy: "Invitation.html",
        canonical: "pages/conferences/techmun/invitation.html",
        sibling: Some("invitation.html"),
        template_var: "INVITATION_LINK",
    },
    Route {
        legacy: "Registration.html",
        canonical: "pages/conferences/techmun/registration.html",
        sibling: Some("registration.html"),
        template_var: "REGISTRATION_LINK",
    },
    Route {
        legacy: "Directors.html",
        canonical: "pages/conferences/techmun/directors.html",
        sibling: Some("directors.html"),
        template_var: "DIRECTORS_LINK",
    },
    Route {
        legacy: "Committees.html",
        canonical: "pages/conferences/techmun/committees.html",
        sibling: Some("committees.html"),
        template_var: "COMMITTEES_LINK",
    },
    Route {
        legacy: "Schedule.html",
        canonical: "pages/conferences/techmun/schedule.html",
        sibling: Some("schedule.html"),
        template_var: "SCHEDULE_LINK",
    },
    Route {
        legacy: "Position_Papers.html",
        canonical: "pages/conferences/techmun/position-papers.html",
        sibling: Some("position-papers.html"),
        template_var: "POSITION_PAPERS_LINK",
    },
    Route {
        legacy: "Conference_Policies.html",
        canonical: "pages/conferences/techmun/conference-policies.html",
        sibling: Some("conference-policies.html"),
        template_var: "CONFERENCE_POLICIES_LINK",
    },
    Route {
        legacy: "Guest_Speakers.html",
        canonical: "pages/conferences/techmun/guest-speakers.html",
        sibling: Some("guest-speakers.html"),
        template_var: "GUEST_SPEAKERS_LINK",
    },
    Route {
        legacy: "TECHMUN.html",
        canonical: "pages/conferences/techmun/index.html",
        sibling: Some("index.html"),
        template_var: "TECHMUN_LINK",
    },
];

fn href(target: &str) -> String {
    format!("href=\"{}\"", target)
}

/// True when `name` is both a legacy filename and a sibling target. Inside
/// the conference subtree a bare reference to it can be either.
pub fn collides_with_sibling(name: &str) -> bool {
    ROUTES.iter().any(|route| route.sibling == Some(name))
}

/// Whether `content` still holds a legacy navigation link that cannot also
/// be a rewritten sibling link.
pub fn has_unambiguous_legacy_links(content: &str) -> bool {
    ROUTES
        .iter()
        .filter(|route| !collides_with_sibling(route.legacy))
        .any(|route| content.contains(&href(route.legacy)))
}

/// Ordered literal replacements for one file's navigation links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationMap {
    prefix: String,
    entries: Vec<(String, String)>,
}

impl NavigationMap {
    pub fn builder(depth: usize) -> NavigationMapBuilder {
        NavigationMapBuilder::new(depth)
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn get(&self, old: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == old)
            .map(|(_, new)| new.as_str())
    }

    /// Replace every entry in one left-to-right pass.
    ///
    /// Replacement text is never scanned again, so an entry whose output is
    /// another entry's key (`TECHMUN.html` -> `index.html`) does not chain.
    /// Returns the new content and the number of replacements made.
    pub fn apply(&self, content: &str) -> (String, usize) {
        let mut out = String::with_capacity(content.len());
        let mut rest = content;
        let mut count = 0;

        loop {
            let next = self
                .entries
                .iter()
                .filter_map(|(old, new)| rest.find(old.as_str()).map(|pos| (pos, old, new)))
                .min_by_key(|(pos, _, _)| *pos);

            let Some((pos, old, new)) = next else {
                break;
            };

            out.push_str(&rest[..pos]);
            out.push_str(new);
            rest = &rest[pos + old.len()..];
            if old != new {
                count += 1;
            }
        }

        out.push_str(rest);
        (out, count)
    }
}

pub struct NavigationMapBuilder {
    depth: usize,
    conference_local: bool,
    keep_sibling_links: bool,
    extra: Vec<(String, String)>,
}

impl NavigationMapBuilder {
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            conference_local: false,
            keep_sibling_links: false,
            extra: Vec::new(),
        }
    }

    /// Point conference pages at their siblings instead of the canonical
    /// paths.
    pub fn conference_local(mut self, conference_local: bool) -> Self {
        self.conference_local = conference_local;
        self
    }

    /// Leave references such as `href="index.html"` alone in conference
    /// pages. Set this once the page has been migrated, since such a link
    /// then names the sibling page rather than the legacy one.
    pub fn keep_sibling_links(mut self, keep: bool) -> Self {
        self.keep_sibling_links = keep;
        self
    }

    /// Append a literal replacement after the built-in routes.
    pub fn entry(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.extra.push((old.into(), new.into()));
        self
    }

    pub fn build(self) -> NavigationMap {
        let prefix = relative_prefix(self.depth);

        let skip_colliding = self.conference_local && self.keep_sibling_links;

        let mut entries: Vec<(String, String)> = ROUTES
            .iter()
            .filter(|route| !(skip_colliding && collides_with_sibling(route.legacy)))
            .map(|route| {
                let target = match route.sibling {
                    Some(sibling) if self.conference_local => sibling.to_string(),
                    _ => format!("{}{}", prefix, route.canonical),
                };
                (href(route.legacy), href(&target))
            })
            .collect();

        entries.extend(self.extra.into_iter().filter(|(old, _)| !old.is_empty()));

        NavigationMap { prefix, entries }
    }
}
