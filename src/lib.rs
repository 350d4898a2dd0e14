//! LegalEase ヘッドレスクライアント
//!
//! ブラウザ版と同じ Workbench を reqwest で動かす。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod source;
