//! Request id layers and the accessor used by spans and metrics.
//!
//! The generator runs before tracing, so every span and every log line
//! emitted for a request can carry the same id that is echoed back to the
//! client in `x-request-id`.

use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};

/// Layer that assigns a UUID `x-request-id` when the client sent none.
#[must_use]
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Layer that copies the request's `x-request-id` onto the response.
#[must_use]
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Request id as text, empty when absent or not visible ASCII.
#[must_use]
pub fn request_id_text(id: Option<&RequestId>) -> String {
    id.and_then(|id| id.header_value().to_str().ok())
        .unwrap_or_default()
        .to_string()
}
