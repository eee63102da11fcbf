//! ユースケース層: checker・パイプライン・実行ループ

pub mod app;
pub mod checkers;
pub mod context;
pub mod pipeline;
