use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::{error, info};
use std::process::ExitCode;

use fabric_promote::auth::Credentials;
use fabric_promote::cli::Cli;
use fabric_promote::config::Settings;
use fabric_promote::fabric::FabCli;
use fabric_promote::{PromoteError, Promoter};

fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    match &cli.log_file {
        Some(path) => {
            let log_file = std::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {:?}", path))?;
            builder.target(env_logger::Target::Pipe(Box::new(log_file)));
        }
        None => {
            builder.target(env_logger::Target::Stdout);
        }
    }

    builder.init();
    Ok(())
}

fn fatal(err: &PromoteError) -> ExitCode {
    error!("{}", err);
    println!("{} {}", "[FATAL]".red().bold(), err);
    // Codes outside 0..=255 collapse to 1
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli) {
        eprintln!("{:#}", err);
        return ExitCode::FAILURE;
    }

    let mut settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            println!("{} {:#}", "[FATAL]".red().bold(), err);
            return ExitCode::FAILURE;
        }
    };
    if let Some(binary) = &cli.fab_bin {
        settings.fabric.binary = binary.clone();
    }

    let credentials = match &cli.env_file {
        Some(path) => Credentials::from_env_file(path),
        None => Credentials::from_env(),
    };
    let credentials = match credentials {
        Ok(credentials) => credentials,
        Err(err) => return fatal(&err),
    };

    let request = cli.promote_request();
    info!(
        "Promoting '{}' + '{}' from '{}' to '{}' as '{}' + '{}'",
        request.report_name,
        request.semantic_model_name,
        request.source_workspace,
        request.target_workspace,
        request.new_report_name(),
        request.new_model_name()
    );

    let runner = FabCli::new(settings.fabric.binary.clone());
    let outcome = match Promoter::new(&runner, &settings, &credentials) {
        Ok(promoter) => promoter.run(&request).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(outcome) => {
            println!(
                "{} Report '{}' ({}) rebound to dataset '{}' ({}) in workspace {}",
                "✓".green(),
                outcome.new_report_name,
                outcome.report_id,
                outcome.new_model_name,
                outcome.dataset_id,
                outcome.workspace_id
            );
            ExitCode::SUCCESS
        }
        Err(err) => fatal(&err),
    }
}
