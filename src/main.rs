use std::collections::BTreeSet;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::error;

mod config;
mod database;
mod filter;
mod models;
mod normalize;
mod pipeline;
mod scraper;
mod sites;
mod urls;

use database::Database;
use filter::{FilterCriteria, filter_recipes, missing_ingredients};
use normalize::unique_values;
use pipeline::{Pipeline, STANDARDISED_DB_URL};

/// Ingredients most kitchens have on hand; the default pantry for
/// `recommend` when none is given.
const COMMON_INGREDIENTS: [&str; 15] = [
    "Salt",
    "Soy Sauce",
    "Sugar",
    "Water",
    "Garlic",
    "Ginger",
    "Oil",
    "Black Pepper",
    "Rice",
    "Butter",
    "White Pepper",
    "Chili Powder",
    "Cumin",
    "Chili Pepper Flakes",
    "Garam Masala",
];

#[derive(Parser)]
#[command(name = "recipe-finder")]
#[command(about = "Scrape food blogs into a normalized recipe table and filter it by pantry")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape one or more source blogs into their raw stores
    Scrape {
        /// Site names to scrape (see `sites`)
        site_names: Vec<String>,
        /// Scrape every configured site
        #[arg(short, long)]
        all: bool,
    },
    /// Rebuild the standardized recipe table from all raw stores
    Normalize,
    /// Filter the standardized table against a pantry
    Recommend {
        /// Cuisines to include (default: all found in the table)
        #[arg(long = "cuisine")]
        cuisines: Vec<String>,
        /// Courses to include (default: all found in the table)
        #[arg(long = "course")]
        courses: Vec<String>,
        /// Maximum total time in minutes, inclusive
        #[arg(long, default_value_t = 10_000)]
        max_time: u32,
        /// Ingredients on hand (default: a common pantry)
        #[arg(long = "pantry")]
        pantry: Vec<String>,
        /// How many ingredients a partial match may be missing
        #[arg(long, default_value_t = 0)]
        max_missing: usize,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List configured source blogs
    Sites,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape { site_names, all } => scrape(site_names, all).await,
        Commands::Normalize => {
            let pipeline = Pipeline::new()?;
            pipeline.normalize(&sites::all(), STANDARDISED_DB_URL).await
        }
        Commands::Recommend {
            cuisines,
            courses,
            max_time,
            pantry,
            max_missing,
            json,
        } => recommend(cuisines, courses, max_time, pantry, max_missing, json).await,
        Commands::Sites => {
            for site in sites::all() {
                println!("{:10} {}", site.name, site.listing_url);
            }
            Ok(())
        }
    }
}

async fn scrape(site_names: Vec<String>, all: bool) -> Result<()> {
    let selected = if all {
        sites::all()
    } else {
        if site_names.is_empty() {
            bail!("no sites given; pass site names or --all (see `recipe-finder sites`)");
        }
        let mut selected = Vec::new();
        for name in &site_names {
            match sites::by_name(name) {
                Some(site) => selected.push(site),
                None => bail!("unknown site {name:?}; run `recipe-finder sites`"),
            }
        }
        selected
    };

    let pipeline = Pipeline::new()?;
    for site in &selected {
        if let Err(e) = pipeline.run(site).await {
            error!("Scrape of {} failed: {:#}", site.name, e);
        }
    }
    Ok(())
}

async fn recommend(
    cuisines: Vec<String>,
    courses: Vec<String>,
    max_time: u32,
    pantry: Vec<String>,
    max_missing: usize,
    json: bool,
) -> Result<()> {
    let db = Database::open(STANDARDISED_DB_URL).await?;
    if !db.has_recipes().await? {
        bail!("no standardized recipes found; run `recipe-finder scrape` and `normalize` first");
    }
    let recipes = db.load_normalized().await?;

    // Empty selections widen to everything the table offers; an empty
    // pantry falls back to the staples list.
    let criteria = FilterCriteria {
        cuisines: if cuisines.is_empty() {
            unique_values(&recipes, |r| r.cuisine.as_slice()).into_iter().collect()
        } else {
            cuisines
        },
        courses: if courses.is_empty() {
            unique_values(&recipes, |r| r.course.as_slice()).into_iter().collect()
        } else {
            courses
        },
        max_time_minutes: max_time,
        pantry: if pantry.is_empty() {
            COMMON_INGREDIENTS.iter().map(|s| s.to_string()).collect()
        } else {
            pantry.into_iter().collect::<BTreeSet<_>>()
        },
        max_missing,
    };

    let (available, partial) = filter_recipes(&recipes, &criteria);

    if json {
        let out = serde_json::json!({
            "all_ingredients_available": available,
            "missing_ingredients": partial,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Recipes with all ingredients available ({}):", available.len());
    for recipe in &available {
        print_recipe(recipe);
    }

    if criteria.max_missing > 0 {
        println!();
        println!("Recipes with missing ingredients ({}):", partial.len());
        for recipe in &partial {
            print_recipe(recipe);
            println!(
                "    missing: {}",
                missing_ingredients(recipe, &criteria.pantry).join(", ")
            );
        }
    }
    Ok(())
}

fn print_recipe(recipe: &models::NormalizedRecipe) {
    let minutes = recipe
        .total_time_minutes
        .map_or_else(|| "?".to_string(), |m| m.to_string());
    println!(
        "  {} [{} min] {}",
        recipe.title,
        minutes,
        recipe.link.as_deref().unwrap_or("-")
    );
}
