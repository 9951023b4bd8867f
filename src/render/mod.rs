//! Renderer: turns a [`Bucketing`] into a self-contained XHTML document.
//!
//! Rendering is pure. The page is assembled from an embedded template;
//! every piece of record or config text is escaped before insertion.

pub mod date;
pub mod escape;
pub mod filter;

pub use escape::escape_html;
pub use filter::{FilterControl, FilterDimension, FilterModel, FilterState};

use crate::bucket::{Bucket, BucketKey, Bucketing, WindowPolicy};
use crate::config::TimelineConfig;
use crate::core::ClassifiedEntry;
use chrono::{DateTime, SecondsFormat, Utc};

const TEMPLATE: &str = include_str!("templates/timeline.xhtml");
const STYLE: &str = include_str!("templates/style.css");

/// The rendered page. Writing it anywhere is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDocument {
    content: String,
    pub record_count: usize,
    pub section_count: usize,
}

impl StaticDocument {
    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_string(self) -> String {
        self.content
    }
}

/// How dates are shown next to each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// `02 Jan 2024`
    Calendar,
    /// ISO week plus full timestamp
    Weekly,
}

impl RenderMode {
    pub fn for_policy(policy: WindowPolicy) -> Self {
        match policy {
            WindowPolicy::Year => Self::Calendar,
            WindowPolicy::MonthLookback { .. } => Self::Weekly,
        }
    }
}

pub struct Renderer<'a> {
    config: &'a TimelineConfig,
    template: &'static str,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a TimelineConfig) -> Self {
        Self {
            config,
            template: TEMPLATE,
        }
    }

    pub fn render(&self, bucketing: &Bucketing, generated_at: DateTime<Utc>) -> StaticDocument {
        let mode = RenderMode::for_policy(bucketing.policy);
        let filters = FilterModel::from_config(self.config, &bucketing.tallies);
        let site = &self.config.site;

        let stylesheet_link = site
            .stylesheet
            .as_deref()
            .map(|href| {
                format!(
                    "  <link rel=\"stylesheet\" type=\"text/css\" href=\"{}\" />",
                    escape_html(href)
                )
            })
            .unwrap_or_default();

        // Record text goes in last so it is never scanned for placeholders.
        let content = self
            .template
            .replace("{{{LANG}}}", &escape_html(&site.lang))
            .replace("{{{TITLE}}}", &escape_html(&site.title))
            .replace("{{{SUBTITLE}}}", &escape_html(&site.subtitle))
            .replace("{{{STYLE}}}", STYLE.trim_end())
            .replace("{{{FILTER_STYLE}}}", &indent(&filters.stylesheet(), 4))
            .replace("{{{STYLESHEET_LINK}}}", &stylesheet_link)
            .replace("{{{ECOSYSTEM_FILTERS}}}", &render_filters(&filters.ecosystems))
            .replace("{{{CATEGORY_FILTERS}}}", &render_filters(&filters.categories))
            .replace("{{{NAVIGATION}}}", &render_navigation(bucketing))
            .replace("{{{FOOTER}}}", &self.render_footer(&filters, bucketing, generated_at))
            .replace("{{{SECTIONS}}}", &self.render_sections(bucketing, mode));

        StaticDocument {
            content,
            record_count: bucketing.tallies.total,
            section_count: bucketing.buckets.len(),
        }
    }

    fn render_sections(&self, bucketing: &Bucketing, mode: RenderMode) -> String {
        if bucketing.is_empty() {
            return "    <p class=\"empty\">No contributions to show.</p>".to_string();
        }
        bucketing
            .buckets
            .iter()
            .map(|bucket| self.render_section(bucket, mode))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn render_section(&self, bucket: &Bucket, mode: RenderMode) -> String {
        let items = bucket
            .entries
            .iter()
            .map(|entry| self.render_entry(entry, mode))
            .collect::<Vec<_>>()
            .join("\n");

        let bucket_nav = match bucket.key {
            BucketKey::Year(_) => String::new(),
            BucketKey::Month { .. } => render_bucket_links(bucket),
        };

        format!(
            "    <section id=\"{anchor}\">\n      <h2>{heading} <small>({count})</small></h2>\n{bucket_nav}      <ul class=\"timeline\">\n{items}\n      </ul>\n    </section>",
            anchor = bucket.key.anchor(),
            heading = bucket_heading(&bucket.key),
            count = bucket.count(),
        )
    }

    fn render_entry(&self, entry: &ClassifiedEntry, mode: RenderMode) -> String {
        let record = entry.record();
        let at = entry.at();
        let datetime = at.to_rfc3339_opts(SecondsFormat::Secs, true);
        let date = match mode {
            RenderMode::Calendar => date::format_day(&at),
            RenderMode::Weekly => {
                let (week, full) = date::format_week_pair(&at);
                format!("<span class=\"week\">{week}</span> <span class=\"timestamp\">{full}</span>")
            }
        };

        format!(
            "        <li data-ecosystem=\"{ecosystem}\" data-category=\"{category}\">\n          <time datetime=\"{datetime}\">{date}</time>\n          <img class=\"icon\" src=\"{icon}\" alt=\"\" width=\"16\" height=\"16\" />\n          <a href=\"{url}\" target=\"_blank\" rel=\"noopener\">{title}</a>\n          <small class=\"project\">{project}</small>\n        </li>",
            ecosystem = entry.display_ecosystem.key(),
            category = entry.category.key(),
            icon = escape_html(&self.config.icons.url_for(record)),
            url = escape_html(&record.url),
            title = escape_html(&record.title),
            project = escape_html(&record.project),
        )
    }

    fn render_footer(
        &self,
        filters: &FilterModel,
        bucketing: &Bucketing,
        generated_at: DateTime<Utc>,
    ) -> String {
        let summary = |controls: &[FilterControl]| {
            controls
                .iter()
                .map(|c| format!("{} {}", c.count, escape_html(&c.label)))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut lines = vec![
            format!("    <p>Total: {} contributions</p>", bucketing.tallies.total),
            format!("    <p>By ecosystem: {}</p>", summary(&filters.ecosystems)),
            format!("    <p>By category: {}</p>", summary(&filters.categories)),
            format!(
                "    <p>Last updated: <time datetime=\"{}\">{}</time></p>",
                generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                date::format_day(&generated_at)
            ),
        ];
        if bucketing.discarded > 0 {
            lines.push(format!(
                "    <p>{} older contributions are outside the time window.</p>",
                bucketing.discarded
            ));
        }
        if let Some(source) = &self.config.site.source_url {
            lines.push(format!(
                "    <p><a href=\"{}\">Source code</a></p>",
                escape_html(source)
            ));
        }
        lines.join("\n")
    }
}

/// Render `bucketing` with `config`, stamping the page with `generated_at`.
pub fn render(
    bucketing: &Bucketing,
    config: &TimelineConfig,
    generated_at: DateTime<Utc>,
) -> StaticDocument {
    Renderer::new(config).render(bucketing, generated_at)
}

fn render_filters(controls: &[FilterControl]) -> String {
    controls
        .iter()
        .map(|control| {
            format!(
                "        <label><input type=\"checkbox\" name=\"{name}\" value=\"{key}\"{checked} /> {label}</label>",
                name = control.dimension.input_name(),
                key = escape_html(&control.key),
                checked = if control.active { " checked=\"checked\"" } else { "" },
                label = escape_html(&control.label),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Jump list for year buckets. Month buckets carry their own links.
fn render_navigation(bucketing: &Bucketing) -> String {
    if !matches!(bucketing.policy, WindowPolicy::Year) || bucketing.is_empty() {
        return String::new();
    }
    let links = bucketing
        .buckets
        .iter()
        .map(|bucket| format!("<a href=\"#{}\">{}</a>", bucket.key.anchor(), bucket.key))
        .collect::<Vec<_>>()
        .join(" ");
    format!("\n    <nav class=\"year-nav\">\n      <strong>Jump to:</strong>\n      {links}\n    </nav>")
}

fn render_bucket_links(bucket: &Bucket) -> String {
    let mut links = Vec::with_capacity(3);
    if let Some(previous) = bucket.previous {
        links.push(format!(
            "<a href=\"#{}\" rel=\"prev\">Newer: {}</a>",
            previous.anchor(),
            bucket_heading(&previous)
        ));
    }
    links.push("<a href=\"#top\">Back to top</a>".to_string());
    if let Some(next) = bucket.next {
        links.push(format!(
            "<a href=\"#{}\" rel=\"next\">Older: {}</a>",
            next.anchor(),
            bucket_heading(&next)
        ));
    }
    format!("      <nav class=\"bucket-nav\">{}</nav>\n", links.join(" "))
}

fn bucket_heading(key: &BucketKey) -> String {
    match *key {
        BucketKey::Year(year) => year.to_string(),
        BucketKey::Month { year, month } => date::format_month_heading(year, month),
    }
}

fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
