use log::{error, info};

use super::client::PowerBiClient;
use super::constants;
use super::models::RebindRequest;
use crate::error::{PromoteError, Result};

/// Point a report at a different dataset. Only HTTP 200 counts as success.
pub async fn rebind_report(
    client: &PowerBiClient,
    workspace_id: &str,
    report_id: &str,
    dataset_id: &str,
) -> Result<()> {
    let url = constants::rebind_endpoint(client.base_url(), workspace_id, report_id);
    let body = RebindRequest {
        dataset_id: dataset_id.to_string(),
    };

    info!(
        "Rebinding report {} → dataset {} (ws {})",
        report_id, dataset_id, workspace_id
    );

    let response = client.post_json(&url, &body).await?;
    if response.status == 200 {
        info!("Report successfully rebound.");
        Ok(())
    } else {
        error!("Rebind failed: {} {}", response.status, response.body);
        Err(PromoteError::Rebind {
            status: response.status,
            body: response.body,
        })
    }
}
