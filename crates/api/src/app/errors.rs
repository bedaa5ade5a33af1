use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use supplyflow_core::{OrderId, ProductId};
use supplyflow_infra::ServiceError;
use supplyflow_ordering::OrderError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        ServiceError::OrderNotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", message),
        ServiceError::Order(OrderError::InvalidStateTransition { .. }) => {
            json_error(StatusCode::CONFLICT, "invalid_state_transition", message)
        }
        ServiceError::Order(OrderError::OrderLocked { .. }) => {
            json_error(StatusCode::CONFLICT, "order_locked", message)
        }
        ServiceError::Order(OrderError::EmptyItems) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "empty_items", message)
        }
        ServiceError::Order(OrderError::InvalidQuantity { .. }) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_quantity", message)
        }
        ServiceError::Order(OrderError::QuantityOverflow { .. }) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "quantity_overflow", message)
        }
        ServiceError::Repository(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "repository_error", message)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_order_id(s: &str) -> Result<OrderId, axum::response::Response> {
    s.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id"))
}

pub fn parse_product_id(s: &str) -> Result<ProductId, axum::response::Response> {
    s.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"))
}
