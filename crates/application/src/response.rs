//! Classification of transport outcomes into typed results.

use geocore_domain::{GeocoreError, GeocoreResult};
use serde::Deserialize;
use serde_json::Value;

use crate::ports::{HttpResponse, TransportError};

/// Top-level wrapper returned by every Geocore endpoint.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: Option<String>,
    result: Option<Value>,
    code: Option<String>,
    message: Option<String>,
}

/// Maps an HTTP outcome to the unwrapped `result` payload or a typed
/// error, per the service contract: only a 200 with a well-formed
/// success envelope yields a value.
pub(crate) fn interpret(
    outcome: Result<HttpResponse, TransportError>,
) -> GeocoreResult<Value> {
    let response = match outcome {
        Ok(response) => response,
        Err(error) => {
            tracing::warn!(%error, "request failed at the transport level");
            return Err(GeocoreError::InvalidServerResponse {
                status_code: None,
                message: Some(error.to_string()),
            });
        }
    };

    match response.status {
        200 => {
            let Ok(envelope) = serde_json::from_slice::<Envelope>(&response.body) else {
                return Err(GeocoreError::InvalidServerResponse {
                    status_code: None,
                    message: Some("malformed response envelope".to_owned()),
                });
            };
            match envelope.status.as_deref() {
                Some("success") => Ok(envelope.result.unwrap_or(Value::Null)),
                Some(status) => {
                    let code = envelope.code.unwrap_or_default();
                    tracing::debug!(status, code = %code, "server reported an error");
                    Err(GeocoreError::ServerError {
                        code,
                        message: envelope.message.unwrap_or_default(),
                    })
                }
                None => Err(GeocoreError::InvalidServerResponse {
                    status_code: None,
                    message: Some("response envelope has no status".to_owned()),
                }),
            }
        }
        403 => Err(GeocoreError::UnauthorizedAccess),
        status => Err(GeocoreError::InvalidServerResponse {
            status_code: Some(status),
            message: None,
        }),
    }
}
