use crate::domain::newsapi::{HeadlinesQuery, SearchQuery, SortOrder};
use crate::types::{ConfigError, ConfigResult};
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// NewsAPIのpageSizeの上限
const MAX_PAGE_SIZE: u32 = 100;

/// ダッシュボードの検索既定値
///
/// dashboard.yamlから読み込む。ファイルが存在しない場合は組み込みの
/// 既定値を使用する。部分的な指定も可能（未指定項目は既定値で補完）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// トピック検索の既定キーワード
    pub topic: String,
    /// トップヘッドラインのカテゴリ
    pub category: String,
    /// トップヘッドラインの国コード (ISO 3166-1 alpha-2)
    pub country: String,
    /// 記事の言語
    pub language: String,
    /// トピック検索の並び順
    pub sort_by: SortOrder,
    /// 1回の検索で取得する記事数
    pub page_size: u32,
    /// トピック検索の対象期間（今日から何日前まで）
    pub days_back: i64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            topic: "Technology".to_string(),
            category: "science".to_string(),
            country: "in".to_string(),
            language: "en".to_string(),
            sort_by: SortOrder::Relevancy,
            page_size: 10,
            days_back: 3,
        }
    }
}

impl DashboardSettings {
    /// YAMLファイルから設定を読み込む
    pub fn load(file_path: &str) -> Result<Self> {
        let file = File::open(file_path)
            .with_context(|| format!("設定ファイルの読み込みに失敗しました: {}", file_path))?;
        let settings: Self = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("設定ファイルの解析に失敗: {}", file_path))?;
        settings.validate()?;
        Ok(settings)
    }

    /// 設定ファイルがあれば読み込み、なければ既定値を返す
    pub fn load_or_default(file_path: &str) -> Self {
        if !Path::new(file_path).exists() {
            return Self::default();
        }
        match Self::load(file_path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("設定ファイルを無視して既定値を使用します: {:#}", e);
                Self::default()
            }
        }
    }

    /// 設定値の範囲を検証する
    pub fn validate(&self) -> ConfigResult<()> {
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::invalid_value(format!(
                "page_sizeは1〜{}の範囲で指定してください: {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.days_back < 0 {
            return Err(ConfigError::invalid_value(format!(
                "days_backは0以上を指定してください: {}",
                self.days_back
            )));
        }
        Ok(())
    }

    /// トピック検索のクエリを組み立てる
    /// topicが指定された場合は既定トピックを上書きする
    pub fn search_query(&self, topic: Option<&str>) -> SearchQuery {
        let to = Utc::now().date_naive();
        let from = to - Duration::days(self.days_back);
        SearchQuery {
            topic: topic.unwrap_or(&self.topic).to_string(),
            from: Some(from),
            to: Some(to),
            language: self.language.clone(),
            sort_by: self.sort_by,
            page_size: self.page_size,
        }
    }

    /// トップヘッドラインのクエリを組み立てる
    pub fn headlines_query(&self) -> HeadlinesQuery {
        HeadlinesQuery {
            category: self.category.to_lowercase(),
            country: self.country.clone(),
            language: self.language.clone(),
            page_size: self.page_size,
        }
    }
}
