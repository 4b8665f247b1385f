//! Default synonym tables for the source blogs.
//!
//! Raw tag values vary per site ("Main Course" vs "Main Dish" vs "Dinner");
//! these tables fold them onto the canonical names the filter view exposes.
//! Tags with no entry here are dropped by the mapping.

use super::SynonymTable;

pub const CUISINES: &SynonymTable = &[
    ("Japanese", &["Japanese", "japanese"]),
    ("Korean", &["Korean", "korean"]),
    ("Thai", &["Thai", "thai"]),
    (
        "Chinese",
        &["Chinese", "chinese", "Cantonese", "Sichuan", "Taiwanese"],
    ),
    (
        "Indian",
        &["Indian", "indian", "North Indian", "South Indian", "Indo-Chinese"],
    ),
];

pub const COURSES: &SynonymTable = &[
    (
        "Main Course",
        &["Main Course", "Main Dish", "Main", "Dinner", "Entree", "Lunch"],
    ),
    (
        "Appetizer",
        &["Appetizer", "Appetizers", "Starter", "Snack", "Snacks"],
    ),
    ("Side Dish", &["Side Dish", "Side", "Sides", "Side dish"]),
    ("Dessert", &["Dessert", "Desserts", "Sweets"]),
    ("Soup", &["Soup", "Soups", "Stew", "Soup or Stew"]),
    ("Salad", &["Salad", "Salads"]),
    ("Breakfast", &["Breakfast", "Brunch"]),
    ("Drinks", &["Drinks", "Beverage", "Beverages"]),
    ("Condiment", &["Condiment", "Condiments", "Sauce", "Sauces"]),
];
