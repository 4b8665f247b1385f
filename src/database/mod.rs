//! Sqlite row-stores for scraped and normalized recipes.
//!
//! Each source blog gets its own database whose `recipes` table carries the
//! fixed columns plus whatever attribute labels that run discovered, so the
//! schema follows the page content. Replacement is a populate-then-rename
//! swap inside one transaction, so a concurrent reader never observes a
//! missing table.

use std::collections::BTreeSet;

use anyhow::Result;
use chrono::Utc;
use sqlx::{Column, Row, Sqlite, SqlitePool, migrate::MigrateDatabase};
use tracing::info;

use crate::models::{NormalizedRecipe, RecipeRecord};

const RAW_FIXED_COLUMNS: [&str; 7] = [
    "title",
    "link",
    "image_url",
    "description",
    "ingredients",
    "instructions",
    "scraped_at",
];

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn open(db_url: &str) -> Result<Self> {
        // Sqlite won't create missing parent directories itself
        if let Some(path) = db_url.strip_prefix("sqlite:")
            && let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
            info!("Creating database {}", db_url);
            Sqlite::create_database(db_url).await?;
        }

        let pool = SqlitePool::connect(db_url).await?;
        Ok(Self { pool })
    }

    pub async fn has_recipes(&self) -> Result<bool> {
        let row =
            sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'recipes'")
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.is_some())
    }

    /// Replace the raw `recipes` table with this run's records. Columns are
    /// the fixed set plus the union of attribute labels across `records`.
    pub async fn replace_raw(&self, records: &[RecipeRecord]) -> Result<()> {
        let attr_keys: BTreeSet<&str> = records
            .iter()
            .flat_map(|record| record.attributes.keys().map(String::as_str))
            .collect();

        let mut columns: Vec<String> =
            RAW_FIXED_COLUMNS.iter().map(|name| quote_ident(name)).collect();
        columns.extend(attr_keys.iter().map(|key| quote_ident(key)));

        sqlx::query("DROP TABLE IF EXISTS recipes_new")
            .execute(&self.pool)
            .await?;
        let create = format!(
            "CREATE TABLE recipes_new ({})",
            columns
                .iter()
                .map(|name| format!("{name} TEXT"))
                .collect::<Vec<_>>()
                .join(", ")
        );
        sqlx::query(&create).execute(&self.pool).await?;

        let insert = format!(
            "INSERT INTO recipes_new ({}) VALUES ({})",
            columns.join(", "),
            vec!["?"; columns.len()].join(", ")
        );
        let scraped_at = Utc::now();

        for record in records {
            let mut query = sqlx::query(&insert)
                .bind(&record.title)
                .bind(record.link.as_deref())
                .bind(record.image_url.as_deref())
                .bind(record.description.as_deref())
                .bind(record.ingredients.join("; "))
                .bind(record.instructions.as_deref())
                .bind(scraped_at);
            for key in &attr_keys {
                query = query.bind(record.attributes.get(*key).map(String::as_str));
            }
            query.execute(&self.pool).await?;
        }

        self.swap_in().await?;
        info!("Stored {} raw recipes", records.len());
        Ok(())
    }

    /// Load the raw table back into records, reversing the column layout of
    /// [`Self::replace_raw`]: unknown columns become attributes.
    pub async fn load_raw(&self) -> Result<Vec<RecipeRecord>> {
        let rows = sqlx::query("SELECT * FROM recipes")
            .fetch_all(&self.pool)
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut record = RecipeRecord::default();
            for column in row.columns() {
                let value: Option<String> = row.try_get(column.ordinal())?;
                match column.name() {
                    "title" => record.title = value.unwrap_or_default(),
                    "link" => record.link = value,
                    "image_url" => record.image_url = value,
                    "description" => record.description = value,
                    "ingredients" => {
                        record.ingredients = value.map(|joined| split_list(&joined, ';')).unwrap_or_default();
                    }
                    "instructions" => record.instructions = value,
                    "scraped_at" => {}
                    name => {
                        if let Some(value) = value {
                            record.attributes.insert(name.to_string(), value);
                        }
                    }
                }
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Replace the normalized `recipes` table (fixed schema).
    pub async fn replace_normalized(&self, recipes: &[NormalizedRecipe]) -> Result<()> {
        sqlx::query("DROP TABLE IF EXISTS recipes_new")
            .execute(&self.pool)
            .await?;
        sqlx::query(
            r"
            CREATE TABLE recipes_new (
                title TEXT NOT NULL,
                link TEXT,
                image_url TEXT,
                description TEXT NOT NULL,
                total_time_minutes INTEGER,
                cuisine TEXT NOT NULL,
                course TEXT NOT NULL,
                normalised_ingredients TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        for recipe in recipes {
            sqlx::query(
                r"
                INSERT INTO recipes_new
                    (title, link, image_url, description, total_time_minutes,
                     cuisine, course, normalised_ingredients)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(&recipe.title)
            .bind(recipe.link.as_deref())
            .bind(recipe.image_url.as_deref())
            .bind(&recipe.description)
            .bind(recipe.total_time_minutes.map(i64::from))
            .bind(recipe.cuisine.join(", "))
            .bind(recipe.course.join(", "))
            .bind(recipe.normalised_ingredients.join("; "))
            .execute(&self.pool)
            .await?;
        }

        self.swap_in().await?;
        info!("Stored {} normalized recipes", recipes.len());
        Ok(())
    }

    pub async fn load_normalized(&self) -> Result<Vec<NormalizedRecipe>> {
        let rows = sqlx::query(
            r"
            SELECT title, link, image_url, description, total_time_minutes,
                   cuisine, course, normalised_ingredients
            FROM recipes
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in &rows {
            recipes.push(NormalizedRecipe {
                title: row.try_get(0)?,
                link: row.try_get(1)?,
                image_url: row.try_get(2)?,
                description: row.try_get(3)?,
                total_time_minutes: row.try_get::<Option<i64>, _>(4)?.map(|m| m as u32),
                cuisine: split_list(row.try_get::<&str, _>(5)?, ','),
                course: split_list(row.try_get::<&str, _>(6)?, ','),
                normalised_ingredients: split_list(row.try_get::<&str, _>(7)?, ';'),
            });
        }

        Ok(recipes)
    }

    /// Drop the old table and rename the populated one in a single
    /// transaction, so the `recipes` table never disappears for readers.
    async fn swap_in(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DROP TABLE IF EXISTS recipes")
            .execute(&mut *tx)
            .await?;
        sqlx::query("ALTER TABLE recipes_new RENAME TO recipes")
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn split_list(joined: &str, separator: char) -> Vec<String> {
    joined
        .split(separator)
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_db() -> Database {
        // A single connection so every query sees the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        Database { pool }
    }

    fn record(title: &str, attributes: &[(&str, &str)]) -> RecipeRecord {
        RecipeRecord {
            title: title.to_string(),
            link: Some(format!("https://example.com/{title}/")),
            image_url: None,
            description: Some("desc".to_string()),
            ingredients: vec!["rice noodles".to_string(), "eggs".to_string()],
            instructions: Some("cook".to_string()),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[tokio::test]
    async fn raw_round_trip_keeps_dynamic_attribute_columns() {
        let db = memory_db().await;
        let records = vec![
            record("pad-thai", &[("Cuisine", "Thai"), ("Total Time", "45 minutes")]),
            record("tom-yum", &[("Course", "Soup")]),
        ];
        db.replace_raw(&records).await.unwrap();

        let loaded = db.load_raw().await.unwrap();
        assert_eq!(loaded.len(), 2);

        let pad_thai = loaded.iter().find(|r| r.title == "pad-thai").unwrap();
        assert_eq!(pad_thai.attributes.get("Cuisine").map(String::as_str), Some("Thai"));
        assert_eq!(
            pad_thai.attributes.get("Total Time").map(String::as_str),
            Some("45 minutes")
        );
        // The union column "Course" was NULL for this record, so it must not
        // resurface as an attribute
        assert!(!pad_thai.attributes.contains_key("Course"));
        assert_eq!(pad_thai.ingredients, vec!["rice noodles", "eggs"]);

        let tom_yum = loaded.iter().find(|r| r.title == "tom-yum").unwrap();
        assert_eq!(tom_yum.attributes.get("Course").map(String::as_str), Some("Soup"));
        assert!(!tom_yum.attributes.contains_key("Cuisine"));
    }

    #[tokio::test]
    async fn replace_raw_swaps_out_previous_contents() {
        let db = memory_db().await;
        db.replace_raw(&[record("old", &[])]).await.unwrap();
        db.replace_raw(&[record("new-a", &[]), record("new-b", &[])])
            .await
            .unwrap();

        let loaded = db.load_raw().await.unwrap();
        let titles: Vec<&str> = loaded.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles.len(), 2);
        assert!(titles.contains(&"new-a") && titles.contains(&"new-b"));
        assert!(db.has_recipes().await.unwrap());
    }

    #[tokio::test]
    async fn has_recipes_is_false_before_first_run() {
        let db = memory_db().await;
        assert!(!db.has_recipes().await.unwrap());
    }

    #[tokio::test]
    async fn normalized_round_trip() {
        let db = memory_db().await;
        let recipes = vec![
            NormalizedRecipe {
                title: "Pad Thai".to_string(),
                link: Some("https://example.com/pad-thai/".to_string()),
                image_url: Some("https://example.com/pad-thai.jpg".to_string()),
                description: "Street noodles".to_string(),
                total_time_minutes: Some(45),
                cuisine: vec!["Thai".to_string()],
                course: vec!["Main Course".to_string()],
                normalised_ingredients: vec!["rice noodles".to_string(), "eggs".to_string()],
            },
            NormalizedRecipe {
                title: "Mystery Stew".to_string(),
                link: None,
                image_url: None,
                description: String::new(),
                total_time_minutes: None,
                cuisine: vec!["Korean".to_string(), "Thai".to_string()],
                course: Vec::new(),
                normalised_ingredients: Vec::new(),
            },
        ];
        db.replace_normalized(&recipes).await.unwrap();

        let loaded = db.load_normalized().await.unwrap();
        assert_eq!(loaded.len(), 2);

        let pad_thai = loaded.iter().find(|r| r.title == "Pad Thai").unwrap();
        assert_eq!(pad_thai.total_time_minutes, Some(45));
        assert_eq!(pad_thai.cuisine, vec!["Thai"]);
        assert_eq!(pad_thai.normalised_ingredients, vec!["rice noodles", "eggs"]);

        let stew = loaded.iter().find(|r| r.title == "Mystery Stew").unwrap();
        assert_eq!(stew.total_time_minutes, None);
        assert_eq!(stew.cuisine, vec!["Korean", "Thai"]);
        assert!(stew.course.is_empty());
        assert!(stew.normalised_ingredients.is_empty());
    }
}
