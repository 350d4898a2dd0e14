use clap::Parser;
use legalease::{cli, client, config, error, report, runner, source};
use cli::{Cli, Commands};
use client::HttpTransport;
use config::Config;
use error::Result;
use legalease_common::{check_health, fetch_model_info, Workbench};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// 失敗時はWorkbenchの通知（文脈付きメッセージ）を優先して表示
fn report_failure(bench: &Workbench, err: &error::LegalEaseError) {
    match bench.notice() {
        Some(notice) => eprintln!("✖ {}", notice.message),
        None => eprintln!("✖ {}", err),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load().inspect_err(|e| eprintln!("✖ {}", e))?;
    let transport = || -> Result<HttpTransport> {
        let client_config = config.client_config(cli.api_url.as_deref())?;
        HttpTransport::new(client_config, config.timeout())
    };

    match cli.command {
        Commands::AnalyzeText { input } => {
            let transport = transport().inspect_err(|e| eprintln!("✖ {}", e))?;
            let text = source::read_text_input(&input).inspect_err(|e| eprintln!("✖ {}", e))?;

            let mut bench = Workbench::new();
            runner::run_analysis(&mut bench, &transport, source::ContractSource::Text(text), true)
                .await
                .inspect_err(|e| report_failure(&bench, e))?;
            println!("{}", report::render_panels(bench.panels()));
        }

        Commands::AnalyzeFile { path } => {
            let transport = transport().inspect_err(|e| eprintln!("✖ {}", e))?;

            let mut bench = Workbench::new();
            runner::run_analysis(&mut bench, &transport, source::ContractSource::File(path), true)
                .await
                .inspect_err(|e| report_failure(&bench, e))?;
            println!("{}", report::render_panels(bench.panels()));
        }

        Commands::Ask { question, contract } => {
            let transport = transport().inspect_err(|e| eprintln!("✖ {}", e))?;
            let contract = source::load_contract(&contract).inspect_err(|e| eprintln!("✖ {}", e))?;

            let mut bench = Workbench::new();
            runner::run_analysis(&mut bench, &transport, contract, true)
                .await
                .inspect_err(|e| report_failure(&bench, e))?;

            // Q&Aの失敗はQ&Aパネル（エラー表示+再試行ヒント）として出す
            let asked = runner::run_question(&mut bench, &transport, &question, true).await;
            match asked {
                Ok(()) => println!("{}", report::render_qa(bench.qa())),
                Err(e) => {
                    if bench.qa().nodes().is_empty() {
                        report_failure(&bench, &e);
                    } else {
                        eprintln!("{}", report::render_qa(bench.qa()));
                    }
                    return Err(e);
                }
            }
        }

        Commands::Health => {
            let transport = transport().inspect_err(|e| eprintln!("✖ {}", e))?;
            let status = check_health(&transport)
                .await
                .inspect_err(|e| eprintln!("✖ {}", e))?;
            println!("{}", report::render_health(&status));
        }

        Commands::ModelInfo => {
            let transport = transport().inspect_err(|e| eprintln!("✖ {}", e))?;
            let info = fetch_model_info(&transport)
                .await
                .inspect_err(|e| eprintln!("✖ {}", e))?;
            println!("{}", report::render_model_info(&info));
        }

        Commands::Config { set_api_url, show } => {
            let mut config = config;

            if let Some(url) = set_api_url {
                config.set_api_url(url).inspect_err(|e| eprintln!("✖ {}", e))?;
                println!("✔ API URL saved");
            }

            if show {
                let resolved = config.client_config(cli.api_url.as_deref());
                println!("Settings:");
                println!(
                    "  API URL: {}",
                    match &resolved {
                        Ok(c) => c.base_url().to_string(),
                        Err(e) => format!("invalid ({})", e),
                    }
                );
                println!(
                    "  Timeout: {}",
                    config
                        .timeout_seconds
                        .map(|s| format!("{}s", s))
                        .unwrap_or_else(|| "none".to_string())
                );
            }
        }
    }

    Ok(())
}
