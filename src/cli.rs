use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "legalease")]
#[command(about = "Legal contract analysis client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 解析APIのベースURL（例: http://127.0.0.1:8000）
    #[arg(long, global = true, env = "LEGALEASE_API_URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 契約書テキストを解析
    AnalyzeText {
        /// テキストファイル（`-` で標準入力）
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 契約書ファイル（PDF/DOCX/TXT）をアップロードして解析
    AnalyzeFile {
        #[arg(required = true)]
        path: PathBuf,
    },

    /// 契約書を解析してから質問する
    Ask {
        /// 質問（最大500文字）
        #[arg(required = true)]
        question: String,

        /// 契約書ファイル
        #[arg(short, long, required = true)]
        contract: PathBuf,
    },

    /// バックエンドの稼働状況を確認
    Health,

    /// 解析モデルと対応形式を表示
    ModelInfo,

    /// 設定を管理
    Config {
        /// APIのベースURLを保存
        #[arg(long)]
        set_api_url: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
