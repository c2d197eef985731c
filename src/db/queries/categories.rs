use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use sqlx::{Executor, Sqlite, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// Categories keyed by id, the shape the listing endpoints return.
pub fn categories_by_id(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

pub async fn get_all_categories<'e, E>(executor: E) -> sqlx::Result<Vec<Category>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_category<'e, E>(executor: E, id: i64, kind: &str) -> sqlx::Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = sqlx::query(
        r#"
        INSERT INTO categories (id, type) VALUES (?1, ?2)
        "#,
    )
    .bind(id)
    .bind(kind)
    .execute(executor)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_category<'e, E>(executor: E, category: &Category) -> sqlx::Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        UPDATE categories SET type = ?1 WHERE categories.id = ?2
        "#,
    )
    .bind(&category.kind)
    .bind(category.id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn delete_category<'e, E>(executor: E, id: i64) -> sqlx::Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        DELETE FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Makes the table match `categories`: unknown ids are removed, known ones
/// renamed, new ones inserted with the id they carry. Runs in one
/// transaction, a failing step leaves the table as it was.
pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    let existing_ids: HashSet<i64> = get_all_categories(&mut *tx)
        .await?
        .iter()
        .map(|c| c.id)
        .collect();
    let new_ids: HashSet<i64> = categories.iter().map(|c| c.id).collect();
    for id in existing_ids.difference(&new_ids) {
        delete_category(&mut *tx, *id).await?;
    }
    for category in categories {
        if existing_ids.contains(&category.id) {
            update_category(&mut *tx, &category).await?;
        } else {
            create_category(&mut *tx, category.id, &category.kind).await?;
        }
    }
    tx.commit().await
}
