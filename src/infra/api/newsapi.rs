use crate::domain::newsapi::{HeadlinesQuery, NewsApiResponse, SearchQuery};
use crate::types::ConfigError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::env;
use std::time::Duration;

// NewsAPIの本番エンドポイント
const NEWSAPI_BASE_URL: &str = "https://newsapi.org";

// リクエストのタイムアウト（秒）
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// NewsAPIクライアントの抽象化トレイト
///
/// このトレイトは、実際のNewsAPI通信とモック実装の両方を
/// 統一的に扱えるようにするためのインターフェースです。
#[async_trait]
pub trait NewsApiClient {
    /// トピック検索（/v2/everything）を実行する
    async fn everything(&self, query: &SearchQuery) -> Result<NewsApiResponse>;

    /// トップヘッドライン取得（/v2/top-headlines）を実行する
    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<NewsApiResponse>;
}

/// `reqwest` を使用した本番用のNewsAPIクライアント実装
pub struct ReqwestNewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ReqwestNewsApiClient {
    /// APIキーを指定してクライアントを作成
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, NEWSAPI_BASE_URL)
    }

    /// ベースURLを指定してクライアントを作成（モックサーバーテスト用）
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 環境変数NEWSAPI_KEYからクライアントを作成
    pub fn from_env() -> Result<Self> {
        let api_key =
            env::var("NEWSAPI_KEY").map_err(|_| ConfigError::missing_env_var("NEWSAPI_KEY"))?;
        Ok(Self::new(&api_key))
    }

    /// クエリパラメータを付与してGETし、レスポンスを解析する
    async fn fetch(&self, path: &str, params: &[(&str, String)]) -> Result<NewsApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(params)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await
            .with_context(|| format!("NewsAPIへのリクエスト送信に失敗: {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("NewsAPIがエラーを返しました: {} - {}", status, body);
        }

        response
            .json::<NewsApiResponse>()
            .await
            .context("NewsAPIレスポンスの解析に失敗")
    }
}

#[async_trait]
impl NewsApiClient for ReqwestNewsApiClient {
    async fn everything(&self, query: &SearchQuery) -> Result<NewsApiResponse> {
        let mut params: Vec<(&str, String)> = vec![
            ("q", query.topic.clone()),
            ("language", query.language.clone()),
            ("sortBy", query.sort_by.as_str().to_string()),
            ("pageSize", query.page_size.to_string()),
        ];
        if let Some(from) = query.from {
            params.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = query.to {
            params.push(("to", to.format("%Y-%m-%d").to_string()));
        }

        self.fetch("/v2/everything", &params).await
    }

    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<NewsApiResponse> {
        let params: Vec<(&str, String)> = vec![
            ("category", query.category.clone()),
            ("country", query.country.clone()),
            ("language", query.language.clone()),
            ("pageSize", query.page_size.to_string()),
        ];

        self.fetch("/v2/top-headlines", &params).await
    }
}

/// テスト用のモックNewsAPIクライアント
///
/// この実装はテスト時にDIされ、実際のHTTPリクエストを行わずに
/// 定義済みのレスポンスやエラーを返します。
pub struct MockNewsApiClient {
    /// モック時に返すレスポンス内容
    pub mock_response: NewsApiResponse,
    /// モック時に返すステータス（成功/失敗の制御）
    pub should_succeed: bool,
    /// エラー時に返すメッセージ
    pub error_message: Option<String>,
}

impl MockNewsApiClient {
    /// 指定された記事リストを返すモッククライアントを作成
    pub fn new_success(articles: Vec<crate::domain::newsapi::NewsApiArticle>) -> Self {
        Self {
            mock_response: NewsApiResponse {
                status: "ok".to_string(),
                total_results: articles.len() as i64,
                articles,
            },
            should_succeed: true,
            error_message: None,
        }
    }

    /// エラーを返すモッククライアントを作成
    pub fn new_error(error_message: &str) -> Self {
        Self {
            mock_response: NewsApiResponse::default(),
            should_succeed: false,
            error_message: Some(error_message.to_string()),
        }
    }

    fn respond(&self) -> Result<NewsApiResponse> {
        if self.should_succeed {
            Ok(self.mock_response.clone())
        } else {
            let error_msg = self
                .error_message
                .as_deref()
                .unwrap_or("Mock NewsAPI error");
            Err(anyhow::anyhow!("モックNewsAPIエラー: {}", error_msg))
        }
    }
}

#[async_trait]
impl NewsApiClient for MockNewsApiClient {
    async fn everything(&self, _query: &SearchQuery) -> Result<NewsApiResponse> {
        self.respond()
    }

    async fn top_headlines(&self, _query: &HeadlinesQuery) -> Result<NewsApiResponse> {
        self.respond()
    }
}
