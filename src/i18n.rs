//! Locale dictionaries for the search page
//!
//! Two dictionaries are compiled into the binary. Any locale tag other than
//! `en-US` falls back to French.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::{FlightLookupError, Result};

const FR_DICTIONARY: &str = include_str!("../dictionaries/fr.json");
const EN_US_DICTIONARY: &str = include_str!("../dictionaries/en.json");

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "fr")]
    Fr,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::EnUs, Locale::Fr];

    /// Resolve a locale tag, defaulting to French
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "en-US" => Locale::EnUs,
            _ => Locale::Fr,
        }
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::EnUs => "en-US",
        }
    }

    /// Short label for the language switcher
    #[must_use]
    pub fn short_label(self) -> &'static str {
        match self {
            Locale::Fr => "FR",
            Locale::EnUs => "EN",
        }
    }

    fn source(self) -> &'static str {
        match self {
            Locale::Fr => FR_DICTIONARY,
            Locale::EnUs => EN_US_DICTIONARY,
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// UI strings for one locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dictionary {
    pub title: String,
    pub search_placeholder: String,
    pub search_button: String,
    pub searching: String,
    pub departure: String,
    pub arrival: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub error_fetch: String,
    pub error_not_found: String,
}

impl Dictionary {
    /// Load the dictionary for a locale
    pub fn load(locale: Locale) -> Result<Self> {
        serde_json::from_str(locale.source()).map_err(|e| {
            FlightLookupError::config(format!("Invalid dictionary for '{locale}': {e}"))
        })
    }
}

/// Build the path for the same page in another locale.
///
/// The first path segment equal to `current` (compared after percent-decoding)
/// is replaced by the target tag; every other segment is kept in place. Paths without a locale segment get
/// the target tag prefixed.
#[must_use]
pub fn switch_locale_path(path: &str, current: &str, target: Locale) -> String {
    let mut segments: Vec<&str> = path.split('/').collect();

    if let Some(segment) = segments
        .iter_mut()
        .skip(1)
        .find(|segment| !current.is_empty() && segment_matches(segment, current))
    {
        *segment = target.tag();
        return segments.join("/");
    }

    let rest = path.trim_start_matches('/');
    if rest.is_empty() {
        format!("/{}", target.tag())
    } else {
        format!("/{}/{}", target.tag(), rest)
    }
}

fn segment_matches(segment: &str, tag: &str) -> bool {
    segment == tag || urlencoding::decode(segment).is_ok_and(|decoded| decoded == tag)
}
