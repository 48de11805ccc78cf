//! Submission of the qualifying subscriber ids

use crate::app::client::{ApiClient, EndpointTemplates};
use crate::app::models::{AnswerRequest, AnswerResponse, CoverageResult, SubscriberId, Token};
use crate::errors::ApiResult;

/// POST the qualifying ids to the answer endpoint and return the verdict
///
/// A `false` correctness flag is returned as-is; it is an outcome of the
/// reconciliation, not a failure of the call.
pub async fn submit_report(
    client: &ApiClient,
    endpoints: &EndpointTemplates,
    qualifying_ids: &[SubscriberId],
    token: &Token,
) -> ApiResult<CoverageResult> {
    let endpoint = endpoints.answer_path(token);
    let request = AnswerRequest {
        subscribers: qualifying_ids.to_vec(),
    };

    tracing::info!("Submitting {} qualifying subscribers", qualifying_ids.len());
    let response: AnswerResponse = client.post_json(&endpoint, &request).await?;
    let result = response.data;

    if result.answer_correct {
        tracing::info!("Answer accepted in {}", result.total_time);
    } else {
        tracing::warn!(
            "Answer rejected; service expected {:?}",
            result.should_be.as_deref().unwrap_or_default()
        );
    }

    Ok(result)
}
