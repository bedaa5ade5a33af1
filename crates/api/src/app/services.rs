use std::sync::Arc;

use tracing::info;

use supplyflow_catalog::ProductCatalog;
use supplyflow_core::DomainResult;
use supplyflow_infra::{InMemoryOrderRepository, LogNotifier, OrderService};

use crate::config::ApiConfig;

pub type Orders = OrderService<Arc<InMemoryOrderRepository>, LogNotifier>;

/// Everything the handlers need, shared behind one `Arc`.
pub struct AppServices {
    pub orders: Orders,
    pub catalog: ProductCatalog,
}

pub fn build_services(config: &ApiConfig) -> DomainResult<AppServices> {
    let catalog = if config.seed_catalog {
        ProductCatalog::demo()?
    } else {
        ProductCatalog::new()
    };
    info!(products = catalog.len(), "product catalog loaded");

    let repository = Arc::new(InMemoryOrderRepository::new());
    Ok(AppServices {
        orders: OrderService::new(repository, LogNotifier::new()),
        catalog,
    })
}
