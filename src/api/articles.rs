use crate::domain::article::{delete_article, list_articles, store_article, ArticleDraft, ArticlePage};
use crate::types::StoreError;
use actix_web::{web, HttpResponse, Scope};
use log::error;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

/// 記事ストアのルーティング定義
///
/// | メソッド | パス            | 応答                          |
/// |----------|-----------------|-------------------------------|
/// | POST     | /articles/      | 保存済み記事 (200 / 422)      |
/// | GET      | /articles/      | 記事一覧 (200 / 422)          |
/// | DELETE   | /articles/{id}  | 削除メッセージ (200 / 404)    |
pub fn configure_routes() -> Scope {
    web::scope("/articles")
        .route("/", web::post().to(create))
        .route("/", web::get().to(list))
        .route("/{id}", web::delete().to(remove))
}

// GET /articles/ のクエリパラメータ（省略時はskip=0, limit=10）
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
}

fn default_limit() -> i64 {
    10
}

/// StoreErrorをHTTPステータスコードに写像する
fn error_response(error: &StoreError) -> HttpResponse {
    let body = json!({ "detail": error.to_string() });
    match error {
        StoreError::Validation { .. } => HttpResponse::UnprocessableEntity().json(body),
        StoreError::NotFound { .. } => HttpResponse::NotFound().json(body),
        StoreError::Database { .. } => {
            error!("{}", error);
            HttpResponse::ServiceUnavailable().json(body)
        }
    }
}

/// POST /articles/ - 記事ドラフトを検証して保存する
async fn create(pool: web::Data<PgPool>, payload: web::Json<ArticleDraft>) -> HttpResponse {
    let new_article = match payload.into_inner().validate() {
        Ok(new_article) => new_article,
        Err(e) => return error_response(&e),
    };

    match store_article(&new_article, pool.get_ref()).await {
        Ok(article) => HttpResponse::Ok().json(article),
        Err(e) => error_response(&e),
    }
}

/// GET /articles/?skip=&limit= - 保存済み記事を挿入順でページング取得する
async fn list(pool: web::Data<PgPool>, query: web::Query<ListQuery>) -> HttpResponse {
    let page = ArticlePage {
        skip: query.skip,
        limit: query.limit,
    };

    match list_articles(&page, pool.get_ref()).await {
        Ok(articles) => HttpResponse::Ok().json(articles),
        Err(e) => error_response(&e),
    }
}

/// DELETE /articles/{id} - 保存済み記事を削除する
async fn remove(pool: web::Data<PgPool>, path: web::Path<i64>) -> HttpResponse {
    match delete_article(path.into_inner(), pool.get_ref()).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "記事を削除しました" })),
        Err(e) => error_response(&e),
    }
}
