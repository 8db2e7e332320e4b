//! 記事ストアのHTTP表面
//!
//! ルーティングとハンドラはarticles.rsに、リクエスト解析失敗時の
//! ステータスコード調整はこのモジュールに置く。

pub mod articles;

use actix_web::{web, HttpResponse};

/// JSONボディの解析失敗を422で返す
/// （actix既定の400ではなく、元のAPI契約に合わせる）
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::UnprocessableEntity().json(serde_json::json!({ "detail": detail })),
        )
        .into()
    })
}

/// クエリパラメータの解析失敗も同様に422で返す
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::UnprocessableEntity().json(serde_json::json!({ "detail": detail })),
        )
        .into()
    })
}
