//! 外部HTTPクライアントのモックサーバーテスト
//!
//! httpmockを使用してNewsAPIと記事ストアのHTTP表面を再現し、
//! クライアント実装のパラメータ転送・レスポンス解析・エラー処理を
//! 外部通信なしで検証します。

use chrono::NaiveDate;
use httpmock::prelude::*;
use newsclip::domain::article::{ArticleDraft, ArticlePage};
use newsclip::domain::newsapi::{HeadlinesQuery, SearchQuery, SortOrder};
use newsclip::infra::api::newsapi::{NewsApiClient, ReqwestNewsApiClient};
use newsclip::infra::api::store::{ArticleStoreApi, ReqwestStoreClient};
use serde_json::json;

/// NewsAPIのモックサーバー
pub struct NewsApiMockServer {
    server: MockServer,
}

impl NewsApiMockServer {
    pub fn start() -> Self {
        Self {
            server: MockServer::start(),
        }
    }

    /// モックサーバーのベースURL取得
    pub fn url(&self) -> String {
        self.server.url("")
    }

    /// 任意のトピック検索に成功レスポンスを返すモック
    pub fn mock_any_everything_success(&self, articles: serde_json::Value) {
        self.server.mock(|when, then| {
            when.method(GET).path("/v2/everything");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "status": "ok",
                    "totalResults": articles.as_array().map(|a| a.len()).unwrap_or(0),
                    "articles": articles
                }));
        });
    }

    /// APIキー不正エラーをモック
    pub fn mock_unauthorized(&self) {
        self.server.mock(|when, then| {
            when.method(GET);
            then.status(401)
                .header("content-type", "application/json")
                .json_body(json!({
                    "status": "error",
                    "code": "apiKeyInvalid",
                    "message": "Your API key is invalid"
                }));
        });
    }
}

fn sample_article_json(title: &str, url: &str) -> serde_json::Value {
    json!({
        "source": {"id": null, "name": "モックソース"},
        "author": "モック著者",
        "title": title,
        "description": "モック概要",
        "url": url,
        "urlToImage": null,
        "publishedAt": "2024-07-20T10:00:00Z",
        "content": "モック本文"
    })
}

#[tokio::test]
async fn test_everything_forwards_query_params() {
    let mock_server = NewsApiMockServer::start();

    // パラメータの転送を厳密に検証するモック
    let everything_mock = mock_server.server.mock(|when, then| {
        when.method(GET)
            .path("/v2/everything")
            .header("x-api-key", "test-key")
            .query_param("q", "Rust")
            .query_param("language", "en")
            .query_param("sortBy", "publishedAt")
            .query_param("pageSize", "5")
            .query_param("from", "2024-07-19")
            .query_param("to", "2024-07-22");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "status": "ok",
                "totalResults": 1,
                "articles": [sample_article_json("Rust記事", "https://test.com/rust")]
            }));
    });

    let client = ReqwestNewsApiClient::with_base_url("test-key", &mock_server.url());
    let query = SearchQuery {
        topic: "Rust".to_string(),
        from: NaiveDate::from_ymd_opt(2024, 7, 19),
        to: NaiveDate::from_ymd_opt(2024, 7, 22),
        language: "en".to_string(),
        sort_by: SortOrder::PublishedAt,
        page_size: 5,
    };

    let response = client.everything(&query).await.expect("検索に失敗");

    everything_mock.assert();
    assert_eq!(response.status, "ok");
    assert_eq!(response.articles.len(), 1);
    assert_eq!(response.articles[0].title.as_deref(), Some("Rust記事"));

    println!("✅ トピック検索パラメータ転送テスト成功");
}

#[tokio::test]
async fn test_top_headlines_forwards_query_params() {
    let mock_server = NewsApiMockServer::start();

    let headlines_mock = mock_server.server.mock(|when, then| {
        when.method(GET)
            .path("/v2/top-headlines")
            .header("x-api-key", "test-key")
            .query_param("category", "science")
            .query_param("country", "jp")
            .query_param("pageSize", "10");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "status": "ok",
                "totalResults": 1,
                "articles": [sample_article_json("ヘッドライン記事", "https://test.com/top")]
            }));
    });

    let client = ReqwestNewsApiClient::with_base_url("test-key", &mock_server.url());
    let query = HeadlinesQuery {
        category: "science".to_string(),
        country: "jp".to_string(),
        language: "en".to_string(),
        page_size: 10,
    };

    let response = client.top_headlines(&query).await.expect("取得に失敗");

    headlines_mock.assert();
    assert_eq!(response.articles.len(), 1);

    println!("✅ トップヘッドラインパラメータ転送テスト成功");
}

#[tokio::test]
async fn test_newsapi_error_is_surfaced() {
    let mock_server = NewsApiMockServer::start();
    mock_server.mock_unauthorized();

    let client = ReqwestNewsApiClient::with_base_url("bad-key", &mock_server.url());
    let query = SearchQuery {
        topic: "Rust".to_string(),
        from: None,
        to: None,
        language: "en".to_string(),
        sort_by: SortOrder::Relevancy,
        page_size: 10,
    };

    let result = client.everything(&query).await;
    assert!(result.is_err(), "401応答はエラーになるべき");

    let message = result.unwrap_err().to_string();
    assert!(
        message.contains("401"),
        "エラーにステータスコードが含まれるべき: {}",
        message
    );

    println!("✅ NewsAPIエラー伝播テスト成功");
}

#[tokio::test]
async fn test_missing_fields_parsed_as_none() {
    // 外部APIのnullフィールドはOptionのNoneとして受ける
    let mock_server = NewsApiMockServer::start();
    mock_server.mock_any_everything_success(json!([
        {
            "source": {"id": null, "name": null},
            "author": null,
            "title": "フィールド欠落記事",
            "description": null,
            "url": "https://test.com/sparse",
            "urlToImage": null,
            "publishedAt": null,
            "content": null
        }
    ]));

    let client = ReqwestNewsApiClient::with_base_url("test-key", &mock_server.url());
    let query = SearchQuery {
        topic: "sparse".to_string(),
        from: None,
        to: None,
        language: "en".to_string(),
        sort_by: SortOrder::Relevancy,
        page_size: 10,
    };

    let response = client.everything(&query).await.expect("検索に失敗");
    let article = &response.articles[0];
    assert_eq!(article.author, None);
    assert_eq!(article.source.name, None);
    assert_eq!(article.published_at, None);

    println!("✅ null許容フィールド解析テスト成功");
}

// ---- 記事ストアクライアント ----

#[tokio::test]
async fn test_store_client_save_article() {
    let server = MockServer::start();

    let save_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/articles/")
            .json_body_partial(json!({"title": "保存記事"}).to_string());
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "id": 7,
                "title": "保存記事",
                "source": "モックソース",
                "author": null,
                "published_at": "2024-07-20T10:00:00Z",
                "url_to_image": null,
                "description": null,
                "content": null,
                "url": "https://test.com/save"
            }));
    });

    let client = ReqwestStoreClient::new(&server.url(""));
    let draft = ArticleDraft {
        title: Some("保存記事".to_string()),
        source: Some("モックソース".to_string()),
        url: Some("https://test.com/save".to_string()),
        ..Default::default()
    };

    let article = client.save_article(&draft).await.expect("保存に失敗");

    save_mock.assert();
    assert_eq!(article.id, 7);
    assert_eq!(article.title, "保存記事");

    println!("✅ ストアクライアント保存テスト成功");
}

#[tokio::test]
async fn test_store_client_save_validation_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/articles/");
        then.status(422)
            .header("content-type", "application/json")
            .json_body(json!({"detail": "入力値が不正です: title - 必須フィールドが未指定または空です"}));
    });

    let client = ReqwestStoreClient::new(&server.url(""));
    let result = client.save_article(&ArticleDraft::default()).await;

    assert!(result.is_err(), "422応答はエラーになるべき");
    let message = result.unwrap_err().to_string();
    assert!(
        message.contains("title"),
        "エラーにサーバーのdetailが含まれるべき: {}",
        message
    );

    println!("✅ ストアクライアント検証エラーテスト成功");
}

#[tokio::test]
async fn test_store_client_list_forwards_paging() {
    let server = MockServer::start();

    let list_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/articles/")
            .query_param("skip", "2")
            .query_param("limit", "5");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([
                {
                    "id": 3,
                    "title": "保存済み記事",
                    "source": "モックソース",
                    "author": "モック著者",
                    "published_at": null,
                    "url_to_image": null,
                    "description": null,
                    "content": null,
                    "url": "https://test.com/listed"
                }
            ]));
    });

    let client = ReqwestStoreClient::new(&server.url(""));
    let articles = client
        .saved_articles(&ArticlePage { skip: 2, limit: 5 })
        .await
        .expect("取得に失敗");

    list_mock.assert();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, 3);

    println!("✅ ストアクライアント一覧テスト成功");
}

#[tokio::test]
async fn test_store_client_remove_article() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(DELETE).path("/articles/7");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"message": "記事を削除しました"}));
    });
    server.mock(|when, then| {
        when.method(DELETE).path("/articles/999");
        then.status(404)
            .header("content-type", "application/json")
            .json_body(json!({"detail": "記事が見つかりません: id=999"}));
    });

    let client = ReqwestStoreClient::new(&server.url(""));

    // 成功ケースはサーバーのメッセージを返す
    let message = client.remove_article(7).await.expect("削除に失敗");
    assert_eq!(message, "記事を削除しました");

    // 404はエラーとして伝播する
    let result = client.remove_article(999).await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("見つかりません"));

    println!("✅ ストアクライアント削除テスト成功");
}
