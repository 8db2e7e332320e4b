use thiserror::Error;

/// 設定関連のエラー型
/// 環境変数やダッシュボード設定ファイルに関するエラーを定義
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 環境変数が見つからない (DATABASE_URL, NEWSAPI_KEYなど)
    #[error("環境変数が設定されていません: {name}。.envファイルを確認してください。")]
    MissingEnvironmentVariable { name: String },

    /// 設定値が不正 (ページサイズの範囲外など)
    #[error("設定値が不正です: {reason}")]
    InvalidValue { reason: String },
}

impl ConfigError {
    /// 環境変数不足エラーを作成
    pub fn missing_env_var<N: Into<String>>(name: N) -> Self {
        Self::MissingEnvironmentVariable { name: name.into() }
    }

    /// 不正な設定値エラーを作成
    pub fn invalid_value<R: Into<String>>(reason: R) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}

/// 設定エラーのResult型エイリアス
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
