//! capgate 共通ライブラリ
//!
//! `capgate` コマンドが使う I/O ポート・標準アダプタ・エラー型を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（ディレクトリ等）
pub mod domain;

/// Ports & Adapters のポート定義
pub mod ports;

/// 標準アダプタ（std::fs / 環境変数 / ログ出力）
pub mod adapter;
