use serde::Deserialize;

use supplyflow_catalog::Product;
use supplyflow_ordering::Order;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct OrderLineRequest {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub supplier_id: String,
    pub items: Vec<OrderLineRequest>,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub supplier_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QualityResultRequest {
    pub result: String,
}

#[derive(Debug, Deserialize)]
pub struct ReasonRequest {
    pub reason: String,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(p: &Product) -> serde_json::Value {
    serde_json::json!({
        "id": p.id_typed().to_string(),
        "name": p.name(),
        "category": p.category(),
        "temperature_mode": p.temperature_mode(),
        "shelf_life_days": p.shelf_life_days(),
    })
}

pub fn order_to_json(order: &Order) -> serde_json::Value {
    let mut lines: Vec<_> = order.items().collect();
    lines.sort_by(|a, b| a.product().name().cmp(b.product().name()));
    let items = lines
        .into_iter()
        .map(|line| {
            serde_json::json!({
                "product": product_to_json(line.product()),
                "quantity": line.quantity(),
            })
        })
        .collect::<Vec<_>>();

    let status = order.status();
    serde_json::json!({
        "id": order.id_typed().to_string(),
        "supplier_id": order.supplier_id().as_str(),
        "status": status.as_str(),
        "status_description": status.description(),
        "is_terminal": status.is_terminal(),
        "created_at": order.created_at().to_rfc3339(),
        "updated_at": order.updated_at().to_rfc3339(),
        "items": items,
        "comments": order.comments(),
        "quality_control_result": order.quality_control_result(),
        "available_operations": order
            .available_operations()
            .into_iter()
            .map(|op| op.as_str())
            .collect::<Vec<_>>(),
    })
}
