use crate::{errors::ApiError, state::AppState};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use pihole_collector_domain::DomainError;
use prometheus::{Encoder, TextEncoder};
use tracing::{debug, instrument, warn};

/// Run one collection cycle, then expose the registry in text format.
///
/// A failed collection still serves the series from earlier cycles.
#[instrument(skip(state), name = "api_get_metrics")]
pub async fn get_metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state.collect_metrics.execute().await {
        Ok(outcome) => debug!(
            queries = outcome.queries,
            gauge_series = outcome.gauge_series,
            "Collection finished for scrape"
        ),
        Err(e) => warn!(error = %e, "Collection failed, serving previous series"),
    }

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&state.registry.gather(), &mut buffer)
        .map_err(|e| DomainError::Metrics(e.to_string()))?;

    Ok((
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response())
}
