//! Normalization of scraped recipe records into the fixed schema served to
//! the filter view.
//!
//! Everything here is pure and does no I/O: duration strings become integer
//! minutes, free-text tags are canonicalized against a synonym table, and
//! ingredient lines are reduced to letters and spaces. The `standardize`
//! pass applies all of it to the records loaded from the raw stores.

pub mod synonyms;

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{NormalizedRecipe, RecipeRecord};

static DAYS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*day").unwrap());
static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*hour").unwrap());
static MINUTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*minute").unwrap());
static NON_LETTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z\s]").unwrap());

/// A table of canonical names and the raw synonyms that map to each.
pub type SynonymTable = [(&'static str, &'static [&'static str])];

/// What to do with a record whose category text maps to no canonical entry.
/// The caller states this explicitly rather than inferring it from an absent
/// mapping result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Drop the whole record
    Drop,
    /// Keep the record with an empty category list
    Blank,
}

/// Convert a free-text duration like "2 days 3 hours 15 minutes" into total
/// minutes. Each unit is optional and matched independently. Returns `None`
/// for absent input and when no unit with a leading number was found at all;
/// an explicitly stated "0 minutes" still comes back as `Some(0)`.
pub fn duration_to_minutes(text: Option<&str>) -> Option<u32> {
    let text = text?.to_lowercase();
    let mut total: u32 = 0;
    let mut matched = false;

    for (re, factor) in [(&DAYS_RE, 1440u32), (&HOURS_RE, 60), (&MINUTES_RE, 1)] {
        if let Some(caps) = re.captures(&text)
            && let Ok(count) = caps[1].parse::<u32>()
        {
            total += count * factor;
            matched = true;
        }
    }

    matched.then_some(total)
}

/// Strip everything that is not an ASCII letter or whitespace, then trim.
/// "2 cups Soy Sauce!" becomes "cups Soy Sauce".
pub fn clean_ingredient_text(text: &str) -> String {
    NON_LETTER_RE.replace_all(text, "").trim().to_string()
}

/// Map a comma-separated string of raw tags to their canonical names.
/// Tokens with no synonym match are discarded; survivors are deduplicated
/// preserving first occurrence and rejoined with ", ". Returns `None` when
/// nothing matched.
pub fn map_to_canonical(entry: &str, table: &SynonymTable) -> Option<String> {
    let reverse: HashMap<&str, &str> = table
        .iter()
        .flat_map(|(canonical, synonyms)| synonyms.iter().map(move |s| (*s, *canonical)))
        .collect();

    let mut seen = BTreeSet::new();
    let mut mapped = Vec::new();
    for token in entry.split(',') {
        if let Some(canonical) = reverse.get(token.trim())
            && seen.insert(*canonical)
        {
            mapped.push(*canonical);
        }
    }

    if mapped.is_empty() {
        None
    } else {
        Some(mapped.join(", "))
    }
}

/// Flatten a sequence-valued field across records into the set of distinct
/// trimmed values.
pub fn unique_values<R>(records: &[R], field: impl Fn(&R) -> &[String]) -> BTreeSet<String> {
    records
        .iter()
        .flat_map(|record| field(record).iter())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

fn attribute_containing<'a>(record: &'a RecipeRecord, needle: &str) -> Option<&'a str> {
    record
        .attributes
        .iter()
        .find(|(key, _)| key.to_lowercase().contains(needle))
        .map(|(_, value)| value.as_str())
}

fn split_canonical(mapped: &str) -> Vec<String> {
    mapped.split(',').map(|s| s.trim().to_string()).collect()
}

fn apply_category(
    raw: Option<&str>,
    table: &SynonymTable,
    on_missing: Disposition,
) -> Option<Vec<String>> {
    match raw.and_then(|text| map_to_canonical(text, table)) {
        Some(mapped) => Some(split_canonical(&mapped)),
        None => match on_missing {
            Disposition::Drop => None,
            Disposition::Blank => Some(Vec::new()),
        },
    }
}

/// Re-key scraped records into the fixed filter-view schema. The time, cuisine
/// and course attributes are located by label substring since each site names
/// them slightly differently. Records with no recognizable cuisine are
/// dropped; a missing course is kept blank.
pub fn standardize(
    records: &[RecipeRecord],
    cuisines: &SynonymTable,
    courses: &SynonymTable,
) -> Vec<NormalizedRecipe> {
    records
        .iter()
        .filter_map(|record| {
            let cuisine =
                apply_category(attribute_containing(record, "cuisine"), cuisines, Disposition::Drop)?;
            let course =
                apply_category(attribute_containing(record, "course"), courses, Disposition::Blank)
                    .unwrap_or_default();

            Some(NormalizedRecipe {
                title: record.title.clone(),
                link: record.link.clone(),
                image_url: record.image_url.clone(),
                description: record.description.clone().unwrap_or_default(),
                total_time_minutes: duration_to_minutes(attribute_containing(record, "time")),
                cuisine,
                course,
                normalised_ingredients: record
                    .ingredients
                    .iter()
                    .map(|line| clean_ingredient_text(line))
                    .filter(|cleaned| !cleaned.is_empty())
                    .collect(),
            })
        })
        .collect()
}
