use gloo_net::http::Request;

use crate::contact::{FormRelay, RelayError, RelayPayload};

/// Posts contact submissions with the browser's `fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooRelay;

impl FormRelay for GlooRelay {
    async fn post(&self, endpoint: &str, payload: &RelayPayload) -> Result<String, RelayError> {
        let response = Request::post(endpoint)
            .header("Accept", "application/json")
            .json(payload)
            .map_err(|error| RelayError::Transport(error.to_string()))?
            .send()
            .await
            .map_err(|error| RelayError::Transport(error.to_string()))?;

        response
            .text()
            .await
            .map_err(|error| RelayError::Transport(error.to_string()))
    }
}
