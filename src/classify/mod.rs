//! Classifier: maps a record to a [`Category`].
//!
//! Classification is an ordered cascade of rules. The record's ecosystem
//! selects which rule tables apply (an exhaustive `match`, so a new
//! [`Ecosystem`] variant cannot be forgotten), and the first rule whose
//! predicate holds decides the category. Nothing but `ecosystem`,
//! `raw_type`, `title` and `project` is consulted.
//!
//! # Example
//!
//! ```rust
//! use contrib_timeline::classify::Classifier;
//! use contrib_timeline::core::{Category, ContributionRecord, Ecosystem};
//!
//! let classifier = Classifier::default();
//! let record = ContributionRecord::new("meta-1", Ecosystem::Wikimedia, "edit", "2024-01-01")
//!     .with_title("Talk:Foo");
//! assert_eq!(classifier.classify(&record), Category::Discussion);
//! assert_eq!(classifier.explain(&record), Some("talk-namespace"));
//! ```

pub mod patterns;

use crate::core::{Category, ContributionRecord, Ecosystem};

/// Projects whose language subpages count as translation work by default.
pub const DEFAULT_TRANSLATION_PROJECTS: &[&str] = &["translatewiki.net"];

/// Code-hosting subtypes that are conversation rather than code.
const DISCUSSION_SUBTYPES: &[&str] = &["review", "code-review", "comment", "issue-comment", "issue"];

type Predicate = fn(&Classifier, &ContributionRecord) -> bool;

/// One step of the cascade.
pub struct Rule {
    pub name: &'static str,
    pub category: Category,
    matches: Predicate,
}

impl Rule {
    pub fn applies(&self, classifier: &Classifier, record: &ContributionRecord) -> bool {
        (self.matches)(classifier, record)
    }
}

const CODE_HOSTING_RULES: &[Rule] = &[
    Rule {
        name: "code-hosting-discussion",
        category: Category::Discussion,
        matches: is_discussion_subtype,
    },
    Rule {
        name: "code-hosting-activity",
        category: Category::Code,
        matches: always,
    },
];

const MAP_RULES: &[Rule] = &[Rule {
    name: "map-changeset",
    category: Category::MapEdit,
    matches: is_changeset,
}];

const WIKI_RULES: &[Rule] = &[
    Rule {
        name: "talk-namespace",
        category: Category::Discussion,
        matches: is_talk,
    },
    Rule {
        name: "translation-subpage",
        category: Category::Translation,
        matches: is_translation,
    },
    Rule {
        name: "code-namespace",
        category: Category::Code,
        matches: is_wiki_code,
    },
    Rule {
        name: "wiki-edit",
        category: Category::WikiEdit,
        matches: always,
    },
];

const CODE_HOSTING_CHAIN: &[&[Rule]] = &[CODE_HOSTING_RULES];
// Map ecosystems often host a companion wiki, so non-changesets fall through.
const MAP_CHAIN: &[&[Rule]] = &[MAP_RULES, WIKI_RULES];
const WIKI_CHAIN: &[&[Rule]] = &[WIKI_RULES];

/// Pure, total record classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    translation_projects: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSLATION_PROJECTS.iter().copied())
    }
}

impl Classifier {
    pub fn new<I, S>(translation_projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            translation_projects: translation_projects.into_iter().map(Into::into).collect(),
        }
    }

    /// Category of `record`. Falls back to [`Category::Uncategorized`].
    pub fn classify(&self, record: &ContributionRecord) -> Category {
        self.matching_rule(record)
            .map_or(Category::Uncategorized, |rule| rule.category)
    }

    /// Name of the rule that decided the category, if any.
    pub fn explain(&self, record: &ContributionRecord) -> Option<&'static str> {
        self.matching_rule(record).map(|rule| rule.name)
    }

    /// Rules consulted for `ecosystem`, in priority order.
    pub fn rules_for(ecosystem: &Ecosystem) -> impl Iterator<Item = &'static Rule> {
        let chain = match ecosystem {
            Ecosystem::GitHub => CODE_HOSTING_CHAIN,
            Ecosystem::OpenStreetMap => MAP_CHAIN,
            Ecosystem::Wikimedia
            | Ecosystem::ExplainXkcd
            | Ecosystem::Fandom
            | Ecosystem::Unknown(_) => WIKI_CHAIN,
        };
        chain.iter().copied().flatten()
    }

    fn matching_rule(&self, record: &ContributionRecord) -> Option<&'static Rule> {
        Self::rules_for(&record.ecosystem).find(|rule| rule.applies(self, record))
    }

    fn is_translation_project(&self, project: &str) -> bool {
        let project = project.trim();
        self.translation_projects
            .iter()
            .any(|p| p.eq_ignore_ascii_case(project))
    }
}

fn is_discussion_subtype(_: &Classifier, record: &ContributionRecord) -> bool {
    let subtype = record.raw_type.trim();
    DISCUSSION_SUBTYPES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(subtype))
}

fn is_changeset(_: &Classifier, record: &ContributionRecord) -> bool {
    record.raw_type.trim().eq_ignore_ascii_case("changeset")
}

fn is_talk(_: &Classifier, record: &ContributionRecord) -> bool {
    patterns::is_talk_page(&record.title)
}

fn is_translation(classifier: &Classifier, record: &ContributionRecord) -> bool {
    classifier.is_translation_project(&record.project)
        && patterns::is_language_subpage(&record.title)
        && !patterns::is_documentation_subpage(&record.title)
}

fn is_wiki_code(_: &Classifier, record: &ContributionRecord) -> bool {
    patterns::is_code_page(&record.title) && !patterns::is_documentation_subpage(&record.title)
}

fn always(_: &Classifier, _: &ContributionRecord) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wiki(title: &str) -> ContributionRecord {
        ContributionRecord::new("w", Ecosystem::Wikimedia, "edit", "2024-01-01T00:00:00Z")
            .with_title(title)
            .with_project("Meta-Wiki")
    }

    fn github(raw_type: &str, title: &str) -> ContributionRecord {
        ContributionRecord::new("g", Ecosystem::GitHub, raw_type, "2024-01-02")
            .with_title(title)
            .with_project("octo/repo")
    }

    fn translatewiki(title: &str) -> ContributionRecord {
        ContributionRecord::new("t", Ecosystem::Wikimedia, "edit", "2024-01-01")
            .with_title(title)
            .with_project("translatewiki.net")
    }

    #[test]
    fn test_code_hosting_subtypes() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify(&github("pr", "Opened PR: Fix bug")), Category::Code);
        assert_eq!(classifier.classify(&github("commit", "Fix typo")), Category::Code);
        assert_eq!(classifier.classify(&github("repo", "Created repository")), Category::Code);
        assert_eq!(classifier.classify(&github("review", "Reviewed PR: X")), Category::Discussion);
        assert_eq!(classifier.classify(&github("comment", "Commented on: X")), Category::Discussion);
        assert_eq!(classifier.classify(&github("issue", "Opened issue: X")), Category::Discussion);
        assert_eq!(classifier.classify(&github("code-review", "X")), Category::Discussion);
    }

    #[test]
    fn test_code_hosting_ignores_title_heuristics() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify(&github("commit", "Talk:Foo")), Category::Code);
    }

    #[test]
    fn test_code_hosting_without_subtype_is_code() {
        let classifier = Classifier::default();
        let record = github("", "Something");
        assert_eq!(classifier.classify(&record), Category::Code);
        assert_eq!(classifier.explain(&record), Some("code-hosting-activity"));
    }

    #[test]
    fn test_map_changeset_and_companion_wiki() {
        let classifier = Classifier::default();
        let changeset = ContributionRecord::new("o", Ecosystem::OpenStreetMap, "changeset", "2024-01-01")
            .with_title("Add bus stops");
        let wiki_edit = ContributionRecord::new("o", Ecosystem::OpenStreetMap, "edit", "2024-01-01")
            .with_title("Talk:Key:highway");

        assert_eq!(classifier.classify(&changeset), Category::MapEdit);
        assert_eq!(classifier.classify(&wiki_edit), Category::Discussion);
    }

    #[test]
    fn test_talk_wins_over_code_namespace() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify(&wiki("Talk:Foo")), Category::Discussion);
        assert_eq!(classifier.classify(&wiki("Template talk:Infobox")), Category::Discussion);
    }

    #[test]
    fn test_documentation_subpage_is_not_code() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify(&wiki("Module:Bar/qqq")), Category::WikiEdit);
        assert_eq!(classifier.classify(&wiki("Template:Infobox/doc")), Category::WikiEdit);
        assert_eq!(classifier.classify(&wiki("Module:Bar")), Category::Code);
        assert_eq!(classifier.classify(&wiki("MediaWiki:Gadget.js")), Category::Code);
    }

    #[test]
    fn test_translation_requires_translation_project() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify(&translatewiki("MediaWiki:Foo/pt-br")), Category::Translation);
        assert_eq!(classifier.classify(&translatewiki("Intro/de")), Category::Translation);
        assert_eq!(classifier.classify(&translatewiki("MediaWiki:Foo/qqq")), Category::WikiEdit);
        assert_eq!(classifier.classify(&wiki("Intro/de")), Category::WikiEdit);
    }

    #[test]
    fn test_custom_translation_projects() {
        let classifier = Classifier::new(["Meta-Wiki"]);
        assert_eq!(classifier.classify(&wiki("Help:Intro/fr")), Category::Translation);
        assert_eq!(
            Classifier::new(Vec::<String>::new()).classify(&translatewiki("Intro/de")),
            Category::WikiEdit
        );
    }

    #[test]
    fn test_unknown_ecosystem_uses_wiki_heuristics() {
        let classifier = Classifier::default();
        let record = ContributionRecord::new("x", Ecosystem::Unknown("miraheze".into()), "edit", "2024")
            .with_title("Module:Sandbox");
        assert_eq!(classifier.classify(&record), Category::Code);
        assert_eq!(classifier.explain(&record), Some("code-namespace"));
    }

    #[test]
    fn test_rule_order_is_exposed() {
        let names: Vec<_> = Classifier::rules_for(&Ecosystem::OpenStreetMap)
            .map(|rule| rule.name)
            .collect();
        assert_eq!(
            names,
            vec!["map-changeset", "talk-namespace", "translation-subpage", "code-namespace", "wiki-edit"]
        );
    }
}
