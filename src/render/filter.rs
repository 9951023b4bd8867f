//! Filter model for the rendered timeline.
//!
//! Each known ecosystem and category gets a checkbox, active by default. A
//! record is visible iff its ecosystem control is active AND its category
//! control is active. [`FilterState::is_visible`] states that rule as a pure
//! function; [`FilterModel::stylesheet`] expresses the same rule as CSS so
//! the page needs no script.

use crate::bucket::Tallies;
use crate::config::TimelineConfig;
use crate::core::Category;
use std::collections::BTreeSet;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterDimension {
    Ecosystem,
    Category,
}

impl FilterDimension {
    /// `name` of the checkbox inputs.
    pub fn input_name(self) -> &'static str {
        match self {
            Self::Ecosystem => "ecosystem",
            Self::Category => "category",
        }
    }

    /// Data attribute carried by each record element.
    pub fn data_attribute(self) -> &'static str {
        match self {
            Self::Ecosystem => "data-ecosystem",
            Self::Category => "data-category",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControl {
    pub dimension: FilterDimension,
    pub key: String,
    pub label: String,
    pub count: usize,
    pub active: bool,
}

/// All controls of the page, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterModel {
    pub ecosystems: Vec<FilterControl>,
    pub categories: Vec<FilterControl>,
}

impl FilterModel {
    pub fn from_config(config: &TimelineConfig, tallies: &Tallies) -> Self {
        let ecosystems = config
            .display_ecosystems()
            .iter()
            .map(|ecosystem| FilterControl {
                dimension: FilterDimension::Ecosystem,
                key: ecosystem.key().to_string(),
                label: config.ecosystem_label(ecosystem),
                count: tallies.ecosystem(ecosystem.key()),
                active: true,
            })
            .collect();

        let categories = Category::ALL
            .into_iter()
            .map(|category| FilterControl {
                dimension: FilterDimension::Category,
                key: category.key().to_string(),
                label: config.category_label(category),
                count: tallies.category(category),
                active: true,
            })
            .collect();

        Self {
            ecosystems,
            categories,
        }
    }

    pub fn controls(&self) -> impl Iterator<Item = &FilterControl> {
        self.ecosystems.iter().chain(self.categories.iter())
    }

    /// Current activation of every control.
    pub fn state(&self) -> FilterState {
        let mut state = FilterState::default();
        for control in self.controls() {
            state.set(control.dimension, &control.key, control.active);
        }
        state
    }

    /// CSS hiding records whose ecosystem or category input is unchecked.
    pub fn stylesheet(&self) -> String {
        let mut css = String::new();
        for control in self.controls() {
            let name = control.dimension.input_name();
            let attribute = control.dimension.data_attribute();
            let _ = writeln!(
                css,
                "body:has(input[name=\"{name}\"][value=\"{key}\"]:not(:checked)) li[{attribute}=\"{key}\"] {{ display: none; }}",
                key = control.key,
            );
        }
        css
    }
}

/// Which controls are switched off. Everything else is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    inactive: BTreeSet<(FilterDimension, String)>,
}

impl FilterState {
    pub fn set(&mut self, dimension: FilterDimension, key: &str, active: bool) {
        if active {
            self.inactive.remove(&(dimension, key.to_string()));
        } else {
            self.inactive.insert((dimension, key.to_string()));
        }
    }

    pub fn is_active(&self, dimension: FilterDimension, key: &str) -> bool {
        !self.inactive.contains(&(dimension, key.to_string()))
    }

    pub fn is_visible(&self, ecosystem_key: &str, category: Category) -> bool {
        self.is_active(FilterDimension::Ecosystem, ecosystem_key)
            && self.is_active(FilterDimension::Category, category.key())
    }
}
