use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::ResumeRow;

pub async fn load_resume(pool: &PgPool, user_id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Replaces the user's resume with `content` (and the form it came from, if any).
///
/// Whole-record upsert, no partial patch. Saves are not de-duplicated: two saves
/// in flight for the same user race, and whichever statement commits last wins.
pub async fn save_resume(
    pool: &PgPool,
    user_id: Uuid,
    content: &str,
    form: Option<Value>,
) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, user_id, content, form)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id) DO UPDATE
            SET content = EXCLUDED.content,
                form = EXCLUDED.form,
                updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(content)
    .bind(form)
    .fetch_one(pool)
    .await
}
