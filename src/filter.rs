//! Pantry-driven filtering over the normalized recipe table.
//!
//! This is the data contract the interactive view consumes: a pure
//! request/response function with no session state. The UI adapter (here the
//! `recommend` subcommand) owns widget state and calls in with explicit
//! criteria.

use std::collections::BTreeSet;

use crate::models::NormalizedRecipe;

/// One query from the filter view. Selections are any-overlap matches: a
/// recipe passes when at least one of its cuisines/courses is selected, so an
/// empty selection matches nothing.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    pub cuisines: Vec<String>,
    pub courses: Vec<String>,
    /// Inclusive upper bound; recipes with no known duration never satisfy it
    pub max_time_minutes: u32,
    /// Ingredients on hand
    pub pantry: BTreeSet<String>,
    /// Upper bound for the partial-match set
    pub max_missing: usize,
}

/// Split `recipes` into (everything on hand, missing up to `max_missing`).
///
/// Both sets satisfy the cuisine/course/time predicates. The first contains
/// recipes whose ingredients are a subset of the pantry; the second those
/// missing strictly between 1 and `max_missing` ingredients inclusive, so it
/// is empty when `max_missing` is 0.
pub fn filter_recipes<'a>(
    recipes: &'a [NormalizedRecipe],
    criteria: &FilterCriteria,
) -> (Vec<&'a NormalizedRecipe>, Vec<&'a NormalizedRecipe>) {
    let mut full = Vec::new();
    let mut partial = Vec::new();

    for recipe in recipes {
        if !matches_selection(&recipe.cuisine, &criteria.cuisines)
            || !matches_selection(&recipe.course, &criteria.courses)
            || !recipe
                .total_time_minutes
                .is_some_and(|minutes| minutes <= criteria.max_time_minutes)
        {
            continue;
        }

        let missing = missing_ingredients(recipe, &criteria.pantry).len();
        if missing == 0 {
            full.push(recipe);
        } else if missing <= criteria.max_missing {
            partial.push(recipe);
        }
    }

    (full, partial)
}

/// Ingredients of `recipe` not present in the pantry, in recipe order.
pub fn missing_ingredients<'a>(
    recipe: &'a NormalizedRecipe,
    pantry: &BTreeSet<String>,
) -> Vec<&'a str> {
    recipe
        .normalised_ingredients
        .iter()
        .filter(|ingredient| !pantry.contains(ingredient.as_str()))
        .map(|ingredient| ingredient.as_str())
        .collect()
}

fn matches_selection(values: &[String], selected: &[String]) -> bool {
    selected.iter().any(|choice| values.contains(choice))
}
