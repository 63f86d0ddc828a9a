//! End-to-end promotion: copy the semantic model and report, resolve the
//! copies, and rebind the copied report to the copied model.
//!
//! Steps run strictly in order and the first error stops the run. Nothing is
//! rolled back: a completed copy stays in the target workspace.

use log::info;
use reqwest::Client;

use crate::api::{NameResolver, PowerBiClient, RetryConfig, RetryPolicy, build_http_client, rebind_report};
use crate::auth::{Credentials, TokenAcquirer};
use crate::config::Settings;
use crate::error::Result;
use crate::fabric::{CommandRunner, ItemCopier, ItemType};

/// What to promote and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoteRequest {
    pub source_workspace: String,
    pub target_workspace: String,
    pub report_name: String,
    pub semantic_model_name: String,
    pub prefix: String,
    pub overwrite: bool,
}

impl PromoteRequest {
    pub fn new_report_name(&self) -> String {
        format!("{}{}", self.prefix, self.report_name)
    }

    pub fn new_model_name(&self) -> String {
        format!("{}{}", self.prefix, self.semantic_model_name)
    }
}

/// Identifiers resolved for the promoted items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoteOutcome {
    pub workspace_id: String,
    pub dataset_id: String,
    pub report_id: String,
    pub new_report_name: String,
    pub new_model_name: String,
}

pub struct Promoter<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    settings: &'a Settings,
    credentials: &'a Credentials,
    http_client: Client,
}

impl<'a, R: CommandRunner + ?Sized> Promoter<'a, R> {
    pub fn new(runner: &'a R, settings: &'a Settings, credentials: &'a Credentials) -> Result<Self> {
        Ok(Self {
            runner,
            settings,
            credentials,
            http_client: build_http_client(&settings.api)?,
        })
    }

    pub async fn run(&self, request: &PromoteRequest) -> Result<PromoteOutcome> {
        let new_report_name = request.new_report_name();
        let new_model_name = request.new_model_name();

        // 1) Copy items with the Fabric CLI
        let copier = ItemCopier::new(self.runner).overwrite(request.overwrite);
        copier
            .copy(
                &request.source_workspace,
                &request.semantic_model_name,
                ItemType::SemanticModel,
                &request.target_workspace,
                &new_model_name,
            )
            .await?;
        copier
            .copy(
                &request.source_workspace,
                &request.report_name,
                ItemType::Report,
                &request.target_workspace,
                &new_report_name,
            )
            .await?;

        // 2) Resolve ids through the REST API
        let token = TokenAcquirer::new(self.http_client.clone(), &self.settings.api)
            .acquire(self.credentials)
            .await?;
        let client = PowerBiClient::new(self.http_client.clone(), &self.settings.api, token);
        let resolver = NameResolver::new(&client, self.settings.api.workspace_page_size);

        let workspace_id = resolver.workspace_id(&request.target_workspace).await?;

        // Copies can take a few seconds to show up in listings
        let policy = RetryPolicy::new(RetryConfig::from(&self.settings.retry));
        let resolver = &resolver;
        let workspace = workspace_id.as_str();
        let (model_name, report_name) = (new_model_name.as_str(), new_report_name.as_str());
        let dataset_id = policy
            .execute(move || resolver.dataset_id(workspace, model_name))
            .await?;
        let report_id = policy
            .execute(move || resolver.report_id(workspace, report_name))
            .await?;

        // 3) Rebind
        rebind_report(&client, &workspace_id, &report_id, &dataset_id).await?;
        info!("Copy and rebind complete.");

        Ok(PromoteOutcome {
            workspace_id,
            dataset_id,
            report_id,
            new_report_name,
            new_model_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prefix: &str) -> PromoteRequest {
        PromoteRequest {
            source_workspace: "Prod".to_string(),
            target_workspace: "Dev".to_string(),
            report_name: "Sales".to_string(),
            semantic_model_name: "SalesModel".to_string(),
            prefix: prefix.to_string(),
            overwrite: true,
        }
    }

    #[test]
    fn test_prefixed_names() {
        let req = request("dev-");
        assert_eq!(req.new_report_name(), "dev-Sales");
        assert_eq!(req.new_model_name(), "dev-SalesModel");
    }

    #[test]
    fn test_prefix_is_concatenated_verbatim() {
        let req = request(" Test_ ");
        assert_eq!(req.new_report_name(), " Test_ Sales");

        let req = request("");
        assert_eq!(req.new_model_name(), "SalesModel");
    }
}
