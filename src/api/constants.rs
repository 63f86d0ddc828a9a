//! API constants and endpoint builders for the Power BI REST API

/// Power BI REST API root for the signed-in organisation
pub const API_BASE_URL: &str = "https://api.powerbi.com/v1.0/myorg";

/// Microsoft identity platform host
pub const AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Scope requested for app-only Power BI access
pub const POWERBI_SCOPE: &str = "https://analysis.windows.net/powerbi/api/.default";

/// Query parameter limiting how many workspaces one listing returns
pub const TOP_PARAM: &str = "$top";

pub mod headers {
    pub const RETRY_AFTER: &str = "Retry-After";
}

/// Build the OAuth2 v2 token endpoint URL for a tenant
pub fn token_endpoint(authority_host: &str, tenant_id: &str) -> String {
    format!("{}/{}/oauth2/v2.0/token", trim(authority_host), tenant_id)
}

/// Build the workspace (group) listing endpoint URL
pub fn groups_endpoint(base_url: &str) -> String {
    format!("{}/groups", trim(base_url))
}

/// Build the report listing endpoint URL for a workspace
pub fn reports_endpoint(base_url: &str, workspace_id: &str) -> String {
    format!("{}/groups/{}/reports", trim(base_url), workspace_id)
}

/// Build the dataset listing endpoint URL for a workspace
pub fn datasets_endpoint(base_url: &str, workspace_id: &str) -> String {
    format!("{}/groups/{}/datasets", trim(base_url), workspace_id)
}

/// Build the rebind endpoint URL for a report
pub fn rebind_endpoint(base_url: &str, workspace_id: &str, report_id: &str) -> String {
    format!(
        "{}/groups/{}/reports/{}/Rebind",
        trim(base_url),
        workspace_id,
        report_id
    )
}

fn trim(url: &str) -> &str {
    url.trim_end_matches('/')
}
