//! newsclip - ニュース記事クリッピングアプリケーション
//!
//! 2つのコンポーネントで構成される:
//! - 記事ストアサーバー (`newsclip` バイナリ): PostgreSQLを背後に持つ
//!   保存記事のCRUD HTTPサービス
//! - ダッシュボードクライアント (`dashboard` バイナリ): NewsAPIを検索し、
//!   選択した記事を記事ストアに保存・取得・削除するCLI

pub mod api;
pub mod app;
pub mod domain;
pub mod infra;
pub mod types;
