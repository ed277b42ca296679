//! Derived event views: sort, search and category filtering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::event::Event;
use crate::ids::Id;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Keep store order.
    #[default]
    None,
    Newest,
    Oldest,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(SortOrder::None),
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            other => Err(format!(
                "Unknown sort order '{}'. Expected newest or oldest",
                other
            )),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SortOrder::None => write!(f, "none"),
            SortOrder::Newest => write!(f, "newest"),
            SortOrder::Oldest => write!(f, "oldest"),
        }
    }
}

/// Transient filter inputs for one view. Neutral by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    selected_category_ids: Vec<Id>,
    pub sort_order: SortOrder,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_category_ids(&self) -> &[Id] {
        &self.selected_category_ids
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    /// Select or deselect a category. Idempotent in both directions.
    pub fn toggle_category(&mut self, id: Id, selected: bool) {
        let present = self.selected_category_ids.contains(&id);
        if selected && !present {
            self.selected_category_ids.push(id);
        } else if !selected && present {
            self.selected_category_ids.retain(|c| c != &id);
        }
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search_term.is_empty()
            || self.sort_order != SortOrder::None
            || !self.selected_category_ids.is_empty()
    }

    /// Reset every criterion at once.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        derive(events, self)
    }
}

/// Compute the filtered view. Sorting runs over the full set before any
/// narrowing; the source slice is never touched.
pub fn derive(events: &[Event], criteria: &FilterCriteria) -> Vec<Event> {
    let mut filtered = events.to_vec();

    // `sort_by` is stable, so equal start times keep their input order.
    match criteria.sort_order {
        SortOrder::None => {}
        SortOrder::Newest => filtered.sort_by(|a, b| b.start_time.cmp(&a.start_time)),
        SortOrder::Oldest => filtered.sort_by(|a, b| a.start_time.cmp(&b.start_time)),
    }

    if !criteria.search_term.is_empty() {
        let needle = criteria.search_term.to_lowercase();
        filtered.retain(|event| matches_search(event, &needle));
    }

    if !criteria.selected_category_ids.is_empty() {
        filtered.retain(|event| {
            criteria
                .selected_category_ids
                .iter()
                .any(|selected| event.category_ids.contains(selected))
        });
    }

    filtered
}

fn matches_search(event: &Event, needle: &str) -> bool {
    let contains = |field: Option<&str>| {
        field.is_some_and(|text| text.to_lowercase().contains(needle))
    };

    contains(Some(&event.title))
        || contains(event.description.as_deref())
        || contains(event.location.as_deref())
}
