use crate::domain::article::{Article, ArticlePage};
use crate::domain::newsapi::{displayable_articles, NewsApiArticle};
use crate::domain::settings::DashboardSettings;
use crate::infra::api::newsapi::NewsApiClient;
use crate::infra::api::store::ArticleStoreApi;
use anyhow::{Context, Result};

/// トピック検索ワークフロー
///
/// 1. 設定と引数から検索クエリを組み立て
/// 2. NewsAPIのトピック検索を実行
/// 3. 表示可能な記事を番号付きで描画
pub async fn execute_topic_search<N: NewsApiClient>(
    news_client: &N,
    settings: &DashboardSettings,
    topic: Option<&str>,
) -> Result<Vec<NewsApiArticle>> {
    let query = settings.search_query(topic);
    println!("=== トピック検索開始: {} ===", query.topic);

    let response = news_client
        .everything(&query)
        .await
        .context("トピック検索に失敗")?;

    let articles: Vec<NewsApiArticle> = displayable_articles(&response.articles)
        .into_iter()
        .cloned()
        .collect();

    render_external_articles(&articles);

    println!("=== トピック検索完了: {}件 ===", articles.len());
    Ok(articles)
}

/// トップヘッドラインワークフロー
pub async fn execute_headlines<N: NewsApiClient>(
    news_client: &N,
    settings: &DashboardSettings,
) -> Result<Vec<NewsApiArticle>> {
    let query = settings.headlines_query();
    println!(
        "=== トップヘッドライン開始: {} / {} ===",
        query.category, query.country
    );

    let response = news_client
        .top_headlines(&query)
        .await
        .context("トップヘッドラインの取得に失敗")?;

    let articles: Vec<NewsApiArticle> = displayable_articles(&response.articles)
        .into_iter()
        .cloned()
        .collect();

    render_external_articles(&articles);

    println!("=== トップヘッドライン完了: {}件 ===", articles.len());
    Ok(articles)
}

/// 記事保存ワークフロー
///
/// トピック検索を再実行し、結果のindex番目（1始まり）の記事を
/// ストアの入力形状に写像して保存する。保存の成否は通知として表示し、
/// ストア側の失敗でワークフロー自体は失敗させない。
pub async fn execute_save<N: NewsApiClient, S: ArticleStoreApi>(
    news_client: &N,
    store_client: &S,
    settings: &DashboardSettings,
    topic: Option<&str>,
    index: usize,
) -> Result<()> {
    let query = settings.search_query(topic);
    println!("=== 記事保存開始: {} の {}件目 ===", query.topic, index);

    let response = news_client
        .everything(&query)
        .await
        .context("トピック検索に失敗")?;
    let articles: Vec<NewsApiArticle> = displayable_articles(&response.articles)
        .into_iter()
        .cloned()
        .collect();

    if index == 0 || index > articles.len() {
        anyhow::bail!(
            "記事番号が範囲外です: {} (検索結果は{}件)",
            index,
            articles.len()
        );
    }

    let draft = articles[index - 1].to_draft();
    match store_client.save_article(&draft).await {
        Ok(article) => {
            println!("✅ 記事を保存しました: {}", article.summary_line());
        }
        Err(e) => {
            eprintln!("❌ 記事の保存に失敗しました: {:#}", e);
        }
    }

    Ok(())
}

/// 保存済み記事一覧ワークフロー
pub async fn execute_saved_list<S: ArticleStoreApi>(
    store_client: &S,
    page: &ArticlePage,
) -> Result<Vec<Article>> {
    println!("=== 保存済み記事一覧 (skip={}, limit={}) ===", page.skip, page.limit);

    let articles = store_client
        .saved_articles(page)
        .await
        .context("保存済み記事の取得に失敗")?;

    if articles.is_empty() {
        println!("保存済み記事はありません");
    }
    for article in &articles {
        render_saved_article(article);
    }

    println!("=== 保存済み記事一覧完了: {}件 ===", articles.len());
    Ok(articles)
}

/// 記事削除ワークフロー
///
/// 削除の成否は通知として表示する。存在しないidでもワークフロー自体は
/// 失敗させない（通知のみ）。
pub async fn execute_remove<S: ArticleStoreApi>(store_client: &S, id: i64) -> Result<()> {
    println!("=== 記事削除: id={} ===", id);

    match store_client.remove_article(id).await {
        Ok(message) => {
            println!("✅ {}", message);
        }
        Err(e) => {
            eprintln!("❌ 記事の削除に失敗しました: {:#}", e);
        }
    }

    Ok(())
}

/// 検索結果の記事を番号付きで描画する
fn render_external_articles(articles: &[NewsApiArticle]) {
    for (i, article) in articles.iter().enumerate() {
        println!("--- [{}] {} ---", i + 1, article.title.as_deref().unwrap_or("(無題)"));
        if let Some(name) = &article.source.name {
            println!("  🔗 ソース: {}", name);
        }
        if let Some(author) = &article.author {
            println!("  📝 著者: {}", author);
        }
        if let Some(published_at) = &article.published_at {
            println!("  🗓️ 公開日時: {}", published_at);
        }
        if let Some(description) = &article.description {
            println!("  {}", description);
        }
        if let Some(url) = &article.url {
            println!("  URL: {}", url);
        }
    }
}

/// 保存済み記事を描画する（削除に使うidを先頭に表示）
fn render_saved_article(article: &Article) {
    println!("--- {} ---", article.summary_line());
    if let Some(author) = &article.author {
        println!("  📝 著者: {}", author);
    }
    if let Some(published_at) = &article.published_at {
        println!("  🗓️ 公開日時: {}", published_at);
    }
    if let Some(description) = &article.description {
        println!("  {}", description);
    }
    println!("  URL: {}", article.url);
}
