use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};

use supplyflow_catalog::Product;
use supplyflow_core::SupplierId;
use supplyflow_infra::ServiceResult;
use supplyflow_ordering::Order;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/:id", get(get_order))
        .route("/:id/items", post(add_item))
        .route("/:id/items/:product_id", delete(remove_item))
        .route("/:id/confirm", post(confirm_order))
        .route("/:id/send", post(send_order))
        .route("/:id/in-transit", post(mark_in_transit))
        .route("/:id/delivered", post(mark_delivered))
        .route("/:id/quality-check", post(start_quality_check))
        .route("/:id/accept", post(accept_delivery))
        .route("/:id/reject", post(reject_delivery))
        .route("/:id/return", post(return_to_supplier))
        .route("/:id/cancel", post(cancel_order))
        .route("/:id/complete", post(complete_order))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let supplier_id = match SupplierId::new(body.supplier_id) {
        Ok(v) => v,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_supplier", e.to_string());
        }
    };

    let mut items = Vec::with_capacity(body.items.len());
    for line in body.items {
        match resolve_product(&services, &line.product_id) {
            Ok(product) => items.push((product, line.quantity)),
            Err(resp) => return resp,
        }
    }

    match services.orders.create_order(supplier_id, items) {
        Ok(order) => (StatusCode::CREATED, Json(dto::order_to_json(&order))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListOrdersQuery>,
) -> axum::response::Response {
    let result = match query.supplier_id {
        Some(raw) => match SupplierId::new(raw) {
            Ok(supplier_id) => services.orders.get_orders_by_supplier(&supplier_id),
            Err(e) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_supplier",
                    e.to_string(),
                );
            }
        },
        None => services.orders.get_all_orders(),
    };

    match result {
        Ok(mut orders) => {
            orders.sort_by_key(|o| o.created_at());
            let items = orders.iter().map(dto::order_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id = match errors::parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.orders.get_order_by_id(order_id) {
        Ok(Some(order)) => (StatusCode::OK, Json(dto::order_to_json(&order))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::OrderLineRequest>,
) -> axum::response::Response {
    let order_id = match errors::parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let product = match resolve_product(&services, &body.product_id) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    respond(services.orders.add_item(order_id, product, body.quantity))
}

pub async fn remove_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, product_id)): Path<(String, String)>,
) -> axum::response::Response {
    let order_id = match errors::parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let product_id = match errors::parse_product_id(&product_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    respond(services.orders.remove_item(order_id, product_id))
}

pub async fn confirm_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match errors::parse_order_id(&id) {
        Ok(order_id) => respond(services.orders.confirm_order(order_id)),
        Err(resp) => resp,
    }
}

pub async fn send_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match errors::parse_order_id(&id) {
        Ok(order_id) => respond(services.orders.send_order_to_supplier(order_id)),
        Err(resp) => resp,
    }
}

pub async fn mark_in_transit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match errors::parse_order_id(&id) {
        Ok(order_id) => respond(services.orders.mark_order_in_transit(order_id)),
        Err(resp) => resp,
    }
}

pub async fn mark_delivered(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match errors::parse_order_id(&id) {
        Ok(order_id) => respond(services.orders.mark_order_delivered(order_id)),
        Err(resp) => resp,
    }
}

pub async fn start_quality_check(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match errors::parse_order_id(&id) {
        Ok(order_id) => respond(services.orders.start_quality_check(order_id)),
        Err(resp) => resp,
    }
}

pub async fn accept_delivery(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::QualityResultRequest>,
) -> axum::response::Response {
    match errors::parse_order_id(&id) {
        Ok(order_id) => respond(services.orders.accept_delivery(order_id, &body.result)),
        Err(resp) => resp,
    }
}

pub async fn reject_delivery(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::ReasonRequest>,
) -> axum::response::Response {
    match errors::parse_order_id(&id) {
        Ok(order_id) => respond(services.orders.reject_delivery(order_id, &body.reason)),
        Err(resp) => resp,
    }
}

pub async fn return_to_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::ReasonRequest>,
) -> axum::response::Response {
    match errors::parse_order_id(&id) {
        Ok(order_id) => respond(services.orders.return_to_supplier(order_id, &body.reason)),
        Err(resp) => resp,
    }
}

pub async fn cancel_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::ReasonRequest>,
) -> axum::response::Response {
    match errors::parse_order_id(&id) {
        Ok(order_id) => respond(services.orders.cancel_order(order_id, &body.reason)),
        Err(resp) => resp,
    }
}

pub async fn complete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match errors::parse_order_id(&id) {
        Ok(order_id) => respond(services.orders.complete_order(order_id)),
        Err(resp) => resp,
    }
}

fn respond(result: ServiceResult<Order>) -> axum::response::Response {
    match result {
        Ok(order) => (StatusCode::OK, Json(dto::order_to_json(&order))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

fn resolve_product(
    services: &AppServices,
    raw_id: &str,
) -> Result<Arc<Product>, axum::response::Response> {
    let product_id = errors::parse_product_id(raw_id)?;
    services.catalog.get(&product_id).ok_or_else(|| {
        errors::json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "unknown_product",
            format!("product {product_id} is not in the catalog"),
        )
    })
}
