use thiserror::Error;

/// 記事ストアのドメインエラー型
/// HTTPレイヤーではこの型をステータスコードに写像する (422 / 404 / 503)
#[derive(Error, Debug)]
pub enum StoreError {
    /// 必須フィールドの欠落・不正なページング指定など、入力の検証エラー
    #[error("入力値が不正です: {field} - {reason}")]
    Validation { field: &'static str, reason: String },

    /// 指定されたidの記事が存在しない
    #[error("記事が見つかりません: id={id}")]
    NotFound { id: i64 },

    /// データベース操作の失敗
    #[error("データベースエラー: {operation} - {source}")]
    Database {
        operation: String,
        #[source]
        source: sqlx::Error,
    },
}

impl StoreError {
    /// 検証エラーを作成
    pub fn validation<R: Into<String>>(field: &'static str, reason: R) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// 記事未発見エラーを作成
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    /// データベースエラーを作成
    pub fn database<O: Into<String>>(operation: O, source: sqlx::Error) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }
}

/// ストアエラーのResult型エイリアス
pub type StoreResult<T> = std::result::Result<T, StoreError>;
