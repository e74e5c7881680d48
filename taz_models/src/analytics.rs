use std::{
    collections::{BTreeMap, BTreeSet},
    sync::LazyLock,
};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub static ANALYTICS_EVENT_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z][a-z0-9_]{0,39}$").unwrap());

/// Name of a tracked event. GA4 only accepts alphanumeric snake case names
/// with at most 40 characters.
#[nutype(
    sanitize(trim),
    validate(regex = ANALYTICS_EVENT_NAME_REGEX),
    derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct AnalyticsEventName(String);

macro_rules! event_names {
    ($($ident:ident = $name:literal;)*) => {
        $(
            pub static $ident: LazyLock<AnalyticsEventName> =
                LazyLock::new(|| $name.try_into().unwrap());
        )*
    };
}

event_names! {
    PAGE_VIEW = "page_view";
    CTA_CLICK = "cta_click";
    FORM_SUBMIT = "form_submit";
    FORM_ERROR = "form_error";
    SECTION_SCROLL = "section_scroll";
    EXTERNAL_LINK_CLICK = "external_link_click";
    TIME_ON_PAGE = "time_on_page";
    BUTTON_CLICK = "button_click";
    SCROLL_DEPTH = "scroll_depth";
}

/// A named event with a flat mapping of scalar parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub name: AnalyticsEventName,
    pub params: BTreeMap<String, Value>,
}

impl AnalyticsEvent {
    pub fn new(name: AnalyticsEventName) -> Self {
        Self {
            name,
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn page_view(page_path: &str, page_title: &str) -> Self {
        Self::new(PAGE_VIEW.clone())
            .with_param("page_path", page_path)
            .with_param("page_title", page_title)
    }

    /// Click on a call to action, `location` being the section that contains
    /// it (hero, services, ...).
    pub fn cta_click(cta_name: &str, location: &str) -> Self {
        Self::new(CTA_CLICK.clone())
            .with_param("cta_name", cta_name)
            .with_param("cta_location", location)
    }

    /// Successful form submission. Only the number of fields is reported,
    /// never their contents.
    pub fn form_submit(form_name: &str, field_count: usize) -> Self {
        Self::new(FORM_SUBMIT.clone())
            .with_param("form_name", form_name)
            .with_param("form_fields", field_count)
    }

    pub fn form_error(form_name: &str, error_field: &str, error_message: &str) -> Self {
        Self::new(FORM_ERROR.clone())
            .with_param("form_name", form_name)
            .with_param("error_field", error_field)
            .with_param("error_message", error_message)
    }

    pub fn section_scroll(section_name: &str) -> Self {
        Self::new(SECTION_SCROLL.clone()).with_param("section_name", section_name)
    }

    pub fn external_link_click(link_url: &str, link_text: &str) -> Self {
        Self::new(EXTERNAL_LINK_CLICK.clone())
            .with_param("link_url", link_url)
            .with_param("link_text", link_text)
    }

    pub fn time_on_page(seconds: f64) -> Self {
        Self::new(TIME_ON_PAGE.clone()).with_param("time_seconds", seconds.round() as u64)
    }

    pub fn button_click(button_name: &str, location: &str) -> Self {
        Self::new(BUTTON_CLICK.clone())
            .with_param("button_name", button_name)
            .with_param("button_location", location)
    }

    pub fn scroll_depth(percentage: u32) -> Self {
        Self::new(SCROLL_DEPTH.clone()).with_param("scroll_percentage", percentage)
    }
}

/// Reports how far a page has been scrolled in steps of 25%, each step at
/// most once.
#[derive(Debug, Clone, Default)]
pub struct ScrollDepthTracker {
    reported: BTreeSet<u32>,
}

impl ScrollDepthTracker {
    pub const STEP: u32 = 25;

    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the current scroll position and return the event to track, if
    /// a new step has been reached.
    pub fn observe(&mut self, current_scroll: f64, total_height: f64) -> Option<AnalyticsEvent> {
        if total_height <= 0.0 || current_scroll <= 0.0 {
            return None;
        }

        let percentage = ((current_scroll / total_height) * 100.0).round().min(100.0) as u32;
        let step = percentage / Self::STEP * Self::STEP;

        (step > 0 && self.reported.insert(step)).then(|| AnalyticsEvent::scroll_depth(step))
    }

    pub fn reset(&mut self) {
        self.reported.clear();
    }
}
