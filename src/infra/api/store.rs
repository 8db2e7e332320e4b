use crate::domain::article::{Article, ArticleDraft, ArticlePage};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Mutex;
use std::time::Duration;

// 記事ストアサーバーの既定URL
const DEFAULT_STORE_URL: &str = "http://127.0.0.1:8000";

// リクエストのタイムアウト（秒）
const REQUEST_TIMEOUT_SECS: u64 = 10;

// エラーレスポンスのボディ形状
#[derive(Debug, Deserialize)]
struct DetailResponse {
    detail: String,
}

// 削除成功レスポンスのボディ形状
#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

/// 記事ストアサービスのクライアント抽象化トレイト
///
/// ダッシュボードはこのトレイト越しに記事の保存・取得・削除を行う。
/// テスト時にはインメモリのモック実装をDIする。
#[async_trait]
pub trait ArticleStoreApi {
    /// 記事ドラフトをストアに保存し、採番済みの記事を返す
    async fn save_article(&self, draft: &ArticleDraft) -> Result<Article>;

    /// 保存済み記事をページング取得する
    async fn saved_articles(&self, page: &ArticlePage) -> Result<Vec<Article>>;

    /// 保存済み記事をidで削除し、サーバーのメッセージを返す
    async fn remove_article(&self, id: i64) -> Result<String>;
}

/// `reqwest` を使用した本番用の記事ストアクライアント実装
pub struct ReqwestStoreClient {
    client: Client,
    base_url: String,
}

impl ReqwestStoreClient {
    /// ベースURLを指定してクライアントを作成
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 環境変数STORE_URLからクライアントを作成（未設定時はローカル既定値）
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("STORE_URL").unwrap_or_else(|_| DEFAULT_STORE_URL.to_string());
        Self::new(&base_url)
    }

    /// エラーレスポンスのボディからdetailメッセージを取り出す
    async fn error_detail(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<DetailResponse>().await {
            Ok(body) => format!("{} - {}", status, body.detail),
            Err(_) => status.to_string(),
        }
    }
}

#[async_trait]
impl ArticleStoreApi for ReqwestStoreClient {
    async fn save_article(&self, draft: &ArticleDraft) -> Result<Article> {
        let url = format!("{}/articles/", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(draft)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await
            .with_context(|| format!("記事ストアへのリクエスト送信に失敗: {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "記事の保存に失敗しました: {}",
                Self::error_detail(response).await
            );
        }

        response
            .json::<Article>()
            .await
            .context("保存済み記事レスポンスの解析に失敗")
    }

    async fn saved_articles(&self, page: &ArticlePage) -> Result<Vec<Article>> {
        let url = format!("{}/articles/", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("skip", page.skip), ("limit", page.limit)])
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await
            .with_context(|| format!("記事ストアへのリクエスト送信に失敗: {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "保存済み記事の取得に失敗しました: {}",
                Self::error_detail(response).await
            );
        }

        response
            .json::<Vec<Article>>()
            .await
            .context("保存済み記事一覧レスポンスの解析に失敗")
    }

    async fn remove_article(&self, id: i64) -> Result<String> {
        let url = format!("{}/articles/{}", self.base_url, id);
        let response = self
            .client
            .delete(&url)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await
            .with_context(|| format!("記事ストアへのリクエスト送信に失敗: {}", url))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                anyhow::bail!("記事が見つかりません: id={}", id)
            }
            status if !status.is_success() => {
                anyhow::bail!(
                    "記事の削除に失敗しました: {}",
                    Self::error_detail(response).await
                );
            }
            _ => {}
        }

        let body: MessageResponse = response
            .json()
            .await
            .context("削除レスポンスの解析に失敗")?;
        Ok(body.message)
    }
}

/// テスト用のインメモリ記事ストアクライアント
///
/// 実際のHTTP通信を行わず、プロセス内のVecに対して保存・取得・削除を
/// 行う。id採番と削除時のNotFoundを本物のストアと同じ規則で模倣する。
pub struct MockStoreClient {
    state: Mutex<MockStoreState>,
    /// falseの場合は全操作がエラーを返す（ストア停止の模倣）
    pub should_succeed: bool,
}

struct MockStoreState {
    articles: Vec<Article>,
    next_id: i64,
}

impl MockStoreClient {
    /// 空のモックストアを作成
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockStoreState {
                articles: Vec::new(),
                next_id: 1,
            }),
            should_succeed: true,
        }
    }

    /// 常にエラーを返すモックストアを作成
    pub fn new_unavailable() -> Self {
        Self {
            state: Mutex::new(MockStoreState {
                articles: Vec::new(),
                next_id: 1,
            }),
            should_succeed: false,
        }
    }

    /// 保存済み記事のスナップショットを取得（テストのアサーション用）
    pub fn snapshot(&self) -> Vec<Article> {
        self.state.lock().unwrap().articles.clone()
    }
}

impl Default for MockStoreClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleStoreApi for MockStoreClient {
    async fn save_article(&self, draft: &ArticleDraft) -> Result<Article> {
        if !self.should_succeed {
            anyhow::bail!("モックストアエラー: ストアに接続できません");
        }

        // 本物のストアと同様に検証してから保存する
        let new_article = draft
            .clone()
            .validate()
            .map_err(|e| anyhow::anyhow!("記事の保存に失敗しました: {}", e))?;

        let mut state = self.state.lock().unwrap();
        let article = Article {
            id: state.next_id,
            title: new_article.title,
            source: new_article.source,
            author: new_article.author,
            published_at: new_article.published_at,
            url_to_image: new_article.url_to_image,
            description: new_article.description,
            content: new_article.content,
            url: new_article.url,
        };
        state.next_id += 1;
        state.articles.push(article.clone());
        Ok(article)
    }

    async fn saved_articles(&self, page: &ArticlePage) -> Result<Vec<Article>> {
        if !self.should_succeed {
            anyhow::bail!("モックストアエラー: ストアに接続できません");
        }

        let state = self.state.lock().unwrap();
        Ok(state
            .articles
            .iter()
            .skip(page.skip.max(0) as usize)
            .take(page.limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn remove_article(&self, id: i64) -> Result<String> {
        if !self.should_succeed {
            anyhow::bail!("モックストアエラー: ストアに接続できません");
        }

        let mut state = self.state.lock().unwrap();
        let before = state.articles.len();
        state.articles.retain(|a| a.id != id);
        if state.articles.len() == before {
            anyhow::bail!("記事が見つかりません: id={}", id);
        }
        Ok("記事を削除しました".to_string())
    }
}
