use anyhow::{Context, Result};
use newsclip::app::dashboard::{
    execute_headlines, execute_remove, execute_save, execute_saved_list, execute_topic_search,
};
use newsclip::domain::article::ArticlePage;
use newsclip::domain::settings::DashboardSettings;
use newsclip::infra::api::newsapi::ReqwestNewsApiClient;
use newsclip::infra::api::store::ReqwestStoreClient;
use std::env;

// ダッシュボード設定ファイル（存在しない場合は既定値を使用）
const SETTINGS_FILE: &str = "dashboard.yaml";

fn print_usage() {
    println!("使い方: dashboard <コマンド>");
    println!("  search [トピック]       トピック検索");
    println!("  headlines              トップヘッドライン");
    println!("  save <トピック> <番号>   検索結果のN件目を保存");
    println!("  saved [skip] [limit]   保存済み記事一覧");
    println!("  remove <id>            保存済み記事を削除");
    println!();
    println!("環境変数: NEWSAPI_KEY (必須), STORE_URL (既定: http://127.0.0.1:8000)");
}

#[tokio::main]
async fn main() -> Result<()> {
    // 環境変数を読み込み（.envファイルがあれば使用）
    let _ = dotenvy::dotenv();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    let settings = DashboardSettings::load_or_default(SETTINGS_FILE);
    let store_client = ReqwestStoreClient::from_env();

    match command.as_str() {
        "search" => {
            let news_client = ReqwestNewsApiClient::from_env()?;
            let topic = args.get(1).map(String::as_str);
            execute_topic_search(&news_client, &settings, topic).await?;
        }
        "headlines" => {
            let news_client = ReqwestNewsApiClient::from_env()?;
            execute_headlines(&news_client, &settings).await?;
        }
        "save" => {
            let (Some(topic), Some(index)) = (args.get(1), args.get(2)) else {
                print_usage();
                return Ok(());
            };
            let index: usize = index
                .parse()
                .with_context(|| format!("記事番号の解析に失敗: {}", index))?;
            let news_client = ReqwestNewsApiClient::from_env()?;
            execute_save(&news_client, &store_client, &settings, Some(topic), index).await?;
        }
        "saved" => {
            let page = ArticlePage {
                skip: args.get(1).and_then(|v| v.parse().ok()).unwrap_or(0),
                limit: args.get(2).and_then(|v| v.parse().ok()).unwrap_or(10),
            };
            execute_saved_list(&store_client, &page).await?;
        }
        "remove" => {
            let Some(id) = args.get(1) else {
                print_usage();
                return Ok(());
            };
            let id: i64 = id
                .parse()
                .with_context(|| format!("記事idの解析に失敗: {}", id))?;
            execute_remove(&store_client, id).await?;
        }
        unknown => {
            eprintln!("不明なコマンド: {}", unknown);
            print_usage();
        }
    }

    Ok(())
}
