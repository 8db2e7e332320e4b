use super::model::{Article, NewArticle};
use crate::types::{StoreError, StoreResult};
use sqlx::PgPool;

const ARTICLE_COLUMNS: &str =
    "id, title, source, author, published_at, url_to_image, description, content, url";

// 一覧取得のページング条件
// skipは0以上、limitは1以上であること（デフォルトは0 / 10）
#[derive(Debug, Clone)]
pub struct ArticlePage {
    pub skip: i64,
    pub limit: i64,
}

impl Default for ArticlePage {
    fn default() -> Self {
        Self { skip: 0, limit: 10 }
    }
}

impl ArticlePage {
    /// ページング条件を検証する
    fn validate(&self) -> StoreResult<()> {
        if self.skip < 0 {
            return Err(StoreError::validation("skip", "0以上を指定してください"));
        }
        if self.limit < 1 {
            return Err(StoreError::validation("limit", "1以上を指定してください"));
        }
        Ok(())
    }
}

/// 検証済みの記事をデータベースに保存し、採番されたidを含む記事を返す。
/// urlの重複は許容する（同一記事の二重保存は仕様上の許容事項）。
pub async fn store_article(new_article: &NewArticle, pool: &PgPool) -> StoreResult<Article> {
    let sql = format!(
        r#"
        INSERT INTO saved_articles
            (title, source, author, published_at, url_to_image, description, content, url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {}
        "#,
        ARTICLE_COLUMNS
    );

    sqlx::query_as::<_, Article>(&sql)
        .bind(&new_article.title)
        .bind(&new_article.source)
        .bind(&new_article.author)
        .bind(new_article.published_at)
        .bind(&new_article.url_to_image)
        .bind(&new_article.description)
        .bind(&new_article.content)
        .bind(&new_article.url)
        .fetch_one(pool)
        .await
        .map_err(|e| StoreError::database("記事の保存", e))
}

/// 保存済み記事を挿入順（id昇順）でページング取得する。
/// 範囲外のskipに対しては空のリストを返す。
pub async fn list_articles(page: &ArticlePage, pool: &PgPool) -> StoreResult<Vec<Article>> {
    page.validate()?;

    let sql = format!(
        "SELECT {} FROM saved_articles ORDER BY id OFFSET $1 LIMIT $2",
        ARTICLE_COLUMNS
    );

    sqlx::query_as::<_, Article>(&sql)
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(pool)
        .await
        .map_err(|e| StoreError::database("記事一覧の取得", e))
}

/// 指定されたidの記事を削除する。
/// 該当記事が存在しない場合は `StoreError::NotFound` を返す。
pub async fn delete_article(id: i64, pool: &PgPool) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM saved_articles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| StoreError::database("記事の削除", e))?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found(id));
    }
    Ok(())
}
