use crate::domain::article::ArticleDraft;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// NewsAPIが返す記事の発行元（sourceオブジェクト）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsApiSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

// NewsAPIが返す記事のワイヤー表現
// 外部API側の都合で全フィールドがnullになり得るため、全てOptionで受ける
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiArticle {
    #[serde(default)]
    pub source: NewsApiSource,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

// NewsAPIのレスポンス全体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: i64,
    #[serde(default)]
    pub articles: Vec<NewsApiArticle>,
}

impl NewsApiArticle {
    /// 削除済み記事のトゥームストーンかどうかを判定
    /// NewsAPIは削除された記事をtitle="[Removed]"として返す
    pub fn is_removed(&self) -> bool {
        matches!(self.title.as_deref(), Some("[Removed]"))
    }

    /// 表示・保存可能な記事かどうかを判定
    pub fn is_displayable(&self) -> bool {
        !self.is_removed() && self.title.is_some()
    }

    /// 外部APIの記事形状を記事ストアの入力形状に写像する
    ///
    /// - `source.name` をフラットな `source` フィールドへ
    /// - `publishedAt` は形式が揺れるため寛容にパースし、失敗時はNone
    /// - 必須フィールドの最終検証はストア側の `ArticleDraft::validate` が行う
    pub fn to_draft(&self) -> ArticleDraft {
        ArticleDraft {
            title: self.title.clone(),
            source: self.source.name.clone(),
            author: self.author.clone(),
            published_at: self
                .published_at
                .as_deref()
                .and_then(|raw| dateparser::parse(raw).ok()),
            url_to_image: self.url_to_image.clone(),
            description: self.description.clone(),
            content: self.content.clone(),
            url: self.url.clone(),
        }
    }
}

/// 表示可能な記事のみに絞り込む
pub fn displayable_articles(articles: &[NewsApiArticle]) -> Vec<&NewsApiArticle> {
    articles.iter().filter(|a| a.is_displayable()).collect()
}

// トピック検索の並び順（NewsAPIのsortByパラメータに対応）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    Relevancy,
    Popularity,
    PublishedAt,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Relevancy => "relevancy",
            SortOrder::Popularity => "popularity",
            SortOrder::PublishedAt => "publishedAt",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// トピック検索のクエリ条件（/v2/everything）
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub topic: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub language: String,
    pub sort_by: SortOrder,
    pub page_size: u32,
}

// トップヘッドラインのクエリ条件（/v2/top-headlines）
#[derive(Debug, Clone)]
pub struct HeadlinesQuery {
    pub category: String,
    pub country: String,
    pub language: String,
    pub page_size: u32,
}
