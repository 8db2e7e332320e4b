use crate::types::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// 保存済み記事エンティティ（テーブル定義と一致、idはストア側で採番）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub source: String,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub url_to_image: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
}

impl Article {
    /// 一覧表示用の1行サマリーを生成
    pub fn summary_line(&self) -> String {
        format!("[{}] {} - {}", self.id, self.title, self.source)
    }

    /// 画像URLを持つかどうか
    pub fn has_image(&self) -> bool {
        self.url_to_image.is_some()
    }
}

// 記事作成リクエストのワイヤー表現
// 全フィールドをOptionで受け、validate()で必須チェックと正規化を行う
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: Option<String>,
    pub source: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub url_to_image: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
}

// 検証済みの記事作成入力（必須フィールドは非空が保証される）
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub source: String,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub url_to_image: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
}

impl ArticleDraft {
    /// ドラフトを検証してNewArticleに変換する
    ///
    /// - title / source / url は必須。未指定または空文字列の場合は
    ///   `StoreError::Validation` を返す
    /// - 任意フィールドの空文字列はNoneに正規化する
    ///   （外部APIのレスポンスは空文字列とnullが混在するため）
    pub fn validate(self) -> StoreResult<NewArticle> {
        Ok(NewArticle {
            title: required(self.title, "title")?,
            source: required(self.source, "source")?,
            author: normalize(self.author),
            published_at: self.published_at,
            url_to_image: normalize(self.url_to_image),
            description: normalize(self.description),
            content: normalize(self.content),
            url: required(self.url, "url")?,
        })
    }
}

/// 空文字列・空白のみの文字列をNoneに正規化する
fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 必須フィールドを取り出す。未指定または空の場合は検証エラー
fn required(value: Option<String>, field: &'static str) -> StoreResult<String> {
    normalize(value).ok_or_else(|| StoreError::validation(field, "必須フィールドが未指定または空です"))
}
