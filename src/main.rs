use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use newsclip::api;
use newsclip::infra::db::setup_database;
use std::env;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 環境変数を読み込み（.envファイルがあれば使用）
    let _ = dotenvy::dotenv();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    // プールはここで明示的に構築し、シャットダウン時に明示的に閉じる
    let pool = setup_database().await?;

    let host = env::var("STORE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("STORE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    info!("記事ストアサーバーを起動します: http://{}:{}", host, port);

    let data = web::Data::new(pool.clone());
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(api::json_config())
            .app_data(api::query_config())
            .service(api::articles::configure_routes())
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    pool.close().await;
    info!("記事ストアサーバーを停止しました");
    Ok(())
}
