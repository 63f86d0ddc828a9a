use clap::Parser;
use std::path::PathBuf;

use crate::promote::PromoteRequest;

#[derive(Debug, Parser)]
#[command(name = "fabric-promote")]
#[command(version)]
#[command(
    about = "Copy a Power BI report and its semantic model to another Fabric workspace and rebind the copy"
)]
pub struct Cli {
    /// Workspace to copy from
    #[arg(long)]
    pub source_workspace: String,

    /// Workspace to copy into
    #[arg(long)]
    pub target_workspace: String,

    /// Report to copy
    #[arg(long)]
    pub report_name: String,

    /// Semantic model to copy
    #[arg(long)]
    pub semantic_model_name: String,

    /// Prefix for the new report and semantic model, e.g. dev- or Dev-
    #[arg(long, allow_hyphen_values = true)]
    pub prefix: String,

    /// Do not replace items that already exist in the target workspace
    #[arg(long)]
    pub no_overwrite: bool,

    /// Fabric CLI binary [default: fab]
    #[arg(long, env = "FABRIC_CLI_BIN")]
    pub fab_bin: Option<String>,

    /// Read FABRIC_TENANT_ID / FABRIC_CLIENT_ID / FABRIC_CLIENT_SECRET from this .env file
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stdout
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn promote_request(&self) -> PromoteRequest {
        PromoteRequest {
            source_workspace: self.source_workspace.clone(),
            target_workspace: self.target_workspace.clone(),
            report_name: self.report_name.clone(),
            semantic_model_name: self.semantic_model_name.clone(),
            prefix: self.prefix.clone(),
            overwrite: !self.no_overwrite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const REQUIRED: [&str; 11] = [
        "fabric-promote",
        "--source-workspace",
        "Prod",
        "--target-workspace",
        "Dev",
        "--report-name",
        "Sales",
        "--semantic-model-name",
        "SalesModel",
        "--prefix",
        "dev-",
    ];

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_required_flags() {
        let cli = Cli::try_parse_from(REQUIRED).unwrap();
        let request = cli.promote_request();

        assert_eq!(request.source_workspace, "Prod");
        assert_eq!(request.target_workspace, "Dev");
        assert_eq!(request.new_report_name(), "dev-Sales");
        assert_eq!(request.new_model_name(), "dev-SalesModel");
        assert!(request.overwrite);
    }

    #[test]
    fn test_missing_flag_is_rejected() {
        let err = Cli::try_parse_from(&REQUIRED[..9]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_prefix_may_start_with_hyphen() {
        let mut args = REQUIRED.to_vec();
        args[10] = "-staging";
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.prefix, "-staging");
    }

    #[test]
    fn test_no_overwrite() {
        let mut args = REQUIRED.to_vec();
        args.push("--no-overwrite");
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(!cli.promote_request().overwrite);
    }
}
