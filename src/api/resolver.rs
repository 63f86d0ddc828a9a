//! Name to identifier resolution for workspaces, reports and datasets
//!
//! Every lookup lists the objects of one kind and matches by name: an exact
//! match wins, otherwise the first case-insensitive match is taken.

use log::{info, warn};

use super::client::PowerBiClient;
use super::constants;
use super::models::{NamedObject, listing_entries};
use crate::error::{ObjectKind, PromoteError, Result};

/// Outcome of matching a name against a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Identifier of the selected (first) match
    pub id: String,
    /// True when no exact match existed and a case variant was used
    pub case_insensitive: bool,
    /// Identifiers of every entry that matched in the winning pass, in listing order
    pub matched_ids: Vec<String>,
}

impl Resolution {
    pub fn is_ambiguous(&self) -> bool {
        self.matched_ids.len() > 1
    }
}

/// Match `name` against `entries`.
///
/// `scope` names the workspace being searched and is only used in the
/// not-found error.
pub fn resolve_name(
    kind: ObjectKind,
    name: &str,
    scope: Option<&str>,
    entries: &[NamedObject],
) -> Result<Resolution> {
    let mut case_insensitive = false;
    let mut matches: Vec<&NamedObject> = entries.iter().filter(|e| e.name == name).collect();

    if matches.is_empty() {
        let lowered = name.to_lowercase();
        matches = entries
            .iter()
            .filter(|e| e.name.to_lowercase() == lowered)
            .collect();
        case_insensitive = !matches.is_empty();
    }

    let first = matches.first().ok_or_else(|| PromoteError::NotFound {
        kind,
        name: name.to_string(),
        scope: scope.map(str::to_string),
    })?;

    Ok(Resolution {
        id: first.id.clone(),
        case_insensitive,
        matched_ids: matches.iter().map(|e| e.id.clone()).collect(),
    })
}

fn report(kind: ObjectKind, name: &str, resolution: &Resolution) {
    if resolution.is_ambiguous() {
        warn!(
            "Multiple {}s named '{}'. Picking the first. IDs: {:?}",
            kind.to_string().to_lowercase(),
            name,
            resolution.matched_ids
        );
    }
    if resolution.case_insensitive {
        warn!(
            "{} '{}' matched case-insensitively → {}",
            kind, name, resolution.id
        );
    } else {
        info!("{} '{}' → {}", kind, name, resolution.id);
    }
}

/// Looks up identifiers through the REST API
pub struct NameResolver<'a> {
    client: &'a PowerBiClient,
    workspace_page_size: u32,
}

impl<'a> NameResolver<'a> {
    pub fn new(client: &'a PowerBiClient, workspace_page_size: u32) -> Self {
        Self {
            client,
            workspace_page_size,
        }
    }

    /// Resolve a workspace id from the first page of `/groups`. Tenants with
    /// more workspaces than the page size are not paged through.
    pub async fn workspace_id(&self, name: &str) -> Result<String> {
        let url = constants::groups_endpoint(self.client.base_url());
        let query = [(constants::TOP_PARAM, self.workspace_page_size.to_string())];
        let body = self.client.get_json(&url, &query).await?;

        self.select(ObjectKind::Workspace, name, None, &listing_entries(&body))
    }

    pub async fn report_id(&self, workspace_id: &str, name: &str) -> Result<String> {
        let url = constants::reports_endpoint(self.client.base_url(), workspace_id);
        let body = self.client.get_json(&url, &[]).await?;

        self.select(ObjectKind::Report, name, Some(workspace_id), &listing_entries(&body))
    }

    pub async fn dataset_id(&self, workspace_id: &str, name: &str) -> Result<String> {
        let url = constants::datasets_endpoint(self.client.base_url(), workspace_id);
        let body = self.client.get_json(&url, &[]).await?;

        self.select(ObjectKind::Dataset, name, Some(workspace_id), &listing_entries(&body))
    }

    fn select(
        &self,
        kind: ObjectKind,
        name: &str,
        scope: Option<&str>,
        entries: &[NamedObject],
    ) -> Result<String> {
        let resolution = resolve_name(kind, name, scope, entries)?;
        report(kind, name, &resolution);
        Ok(resolution.id)
    }
}
