//! Integration tests for the order pipeline.
//!
//! Tests: OrderService → Order aggregate → OrderRepository → Notifier
//!
//! Verifies:
//! - Lifecycle scenarios end in the expected status with the expected side effects
//! - Rejected transitions leave the stored order untouched
//! - Notification failures never undo a committed transition
//! - Concurrent mutations on one order are serialized

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::thread;

    use supplyflow_catalog::{Product, ProductCatalog};
    use supplyflow_core::{OrderId, SupplierId};
    use supplyflow_ordering::{Order, OrderError, OrderStatus};

    use crate::notification::{NotificationFailed, NotificationKind, Notifier};
    use crate::order_service::{OrderService, ServiceError};
    use crate::repository::{InMemoryOrderRepository, OrderRepository};

    /// One notifier call, with the order as the notifier saw it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Sent {
        kind: NotificationKind,
        order_id: OrderId,
        status: OrderStatus,
        reason: Option<String>,
    }

    /// Records every call so tests can assert on side effects.
    #[derive(Default)]
    struct RecordingNotifier {
        calls: Mutex<Vec<Sent>>,
    }

    impl RecordingNotifier {
        fn record(&self, kind: NotificationKind, order: &Order, reason: Option<&str>) {
            self.calls.lock().unwrap().push(Sent {
                kind,
                order_id: order.id_typed(),
                status: order.status(),
                reason: reason.map(str::to_string),
            });
        }

        fn kinds(&self) -> Vec<NotificationKind> {
            self.calls.lock().unwrap().iter().map(|c| c.kind).collect()
        }

        fn statuses(&self) -> Vec<OrderStatus> {
            self.calls.lock().unwrap().iter().map(|c| c.status).collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn send_order_notification(&self, order: &Order) -> Result<(), NotificationFailed> {
            self.record(NotificationKind::OrderSent, order, None);
            Ok(())
        }

        fn send_cancellation_notification(
            &self,
            order: &Order,
            reason: &str,
        ) -> Result<(), NotificationFailed> {
            self.record(NotificationKind::Cancellation, order, Some(reason));
            Ok(())
        }

        fn send_return_notification(
            &self,
            order: &Order,
            reason: &str,
        ) -> Result<(), NotificationFailed> {
            self.record(NotificationKind::Return, order, Some(reason));
            Ok(())
        }

        fn request_order_confirmation(&self, order: &Order) -> Result<(), NotificationFailed> {
            self.record(NotificationKind::ConfirmationRequest, order, None);
            Ok(())
        }
    }

    /// Supplier channel that is always down.
    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn send_order_notification(&self, _: &Order) -> Result<(), NotificationFailed> {
            Err(NotificationFailed::new(NotificationKind::OrderSent, "smtp down"))
        }

        fn send_cancellation_notification(
            &self,
            _: &Order,
            _: &str,
        ) -> Result<(), NotificationFailed> {
            Err(NotificationFailed::new(NotificationKind::Cancellation, "smtp down"))
        }

        fn send_return_notification(&self, _: &Order, _: &str) -> Result<(), NotificationFailed> {
            Err(NotificationFailed::new(NotificationKind::Return, "smtp down"))
        }

        fn request_order_confirmation(&self, _: &Order) -> Result<(), NotificationFailed> {
            Err(NotificationFailed::new(
                NotificationKind::ConfirmationRequest,
                "smtp down",
            ))
        }
    }

    type Service<N> = OrderService<Arc<InMemoryOrderRepository>, Arc<N>>;

    fn setup() -> (
        Service<RecordingNotifier>,
        Arc<InMemoryOrderRepository>,
        Arc<RecordingNotifier>,
        ProductCatalog,
    ) {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = OrderService::new(repo.clone(), notifier.clone());
        (service, repo, notifier, ProductCatalog::demo().unwrap())
    }

    fn create_beef_order(service: &Service<impl Notifier>, catalog: &ProductCatalog) -> Order {
        let beef = catalog.find_by_name("Beef").unwrap();
        service
            .create_order(SupplierId::new("S1").unwrap(), [(beef, 5)])
            .unwrap()
    }

    fn drive_to_quality_check(service: &Service<impl Notifier>, id: OrderId) {
        service.confirm_order(id).unwrap();
        service.send_order_to_supplier(id).unwrap();
        service.mark_order_in_transit(id).unwrap();
        service.mark_order_delivered(id).unwrap();
        service.start_quality_check(id).unwrap();
    }

    #[test]
    fn skipping_in_transit_is_rejected_and_order_stays_sent() {
        let (service, repo, notifier, catalog) = setup();
        let order = create_beef_order(&service, &catalog);
        let id = order.id_typed();
        assert_eq!(order.status(), OrderStatus::Created);
        assert!(notifier.kinds().is_empty());

        assert_eq!(service.confirm_order(id).unwrap().status(), OrderStatus::Confirmed);
        assert_eq!(notifier.kinds(), vec![NotificationKind::ConfirmationRequest]);

        assert_eq!(
            service.send_order_to_supplier(id).unwrap().status(),
            OrderStatus::Sent
        );
        assert_eq!(
            notifier.kinds(),
            vec![NotificationKind::ConfirmationRequest, NotificationKind::OrderSent]
        );

        let err = service.mark_order_delivered(id).unwrap_err();
        match err {
            ServiceError::Order(OrderError::InvalidStateTransition {
                current, required, ..
            }) => {
                assert_eq!(current, OrderStatus::Sent);
                assert_eq!(required, &[OrderStatus::InTransit]);
            }
            other => panic!("unexpected error {other:?}"),
        }

        let stored = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::Sent);
        assert_eq!(notifier.kinds().len(), 2);
        assert_eq!(
            notifier.statuses(),
            vec![OrderStatus::Confirmed, OrderStatus::Sent]
        );
    }

    #[test]
    fn rejected_delivery_returns_to_supplier_with_note() {
        let (service, _repo, notifier, catalog) = setup();
        let id = create_beef_order(&service, &catalog).id_typed();
        drive_to_quality_check(&service, id);

        let rejected = service.reject_delivery(id, "damaged packaging").unwrap();
        assert_eq!(rejected.status(), OrderStatus::Rejected);
        assert_eq!(rejected.quality_control_result(), Some("damaged packaging"));

        let returned = service.return_to_supplier(id, "unsafe to use").unwrap();
        assert_eq!(returned.status(), OrderStatus::Returned);
        assert!(returned.comments().contains("Возврат: unsafe to use"));

        let calls = notifier.calls.lock().unwrap();
        let last = calls.last().unwrap();
        assert_eq!(
            *last,
            Sent {
                kind: NotificationKind::Return,
                order_id: id,
                status: OrderStatus::Returned,
                reason: Some("unsafe to use".to_string()),
            }
        );
    }

    #[test]
    fn completed_order_cannot_be_cancelled() {
        let (service, repo, notifier, catalog) = setup();
        let id = create_beef_order(&service, &catalog).id_typed();
        drive_to_quality_check(&service, id);
        service.accept_delivery(id, "all good").unwrap();

        let completed = service.complete_order(id).unwrap();
        assert_eq!(completed.status(), OrderStatus::Completed);

        let err = service.cancel_order(id, "changed mind").unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Order(OrderError::InvalidStateTransition { .. })
        ));

        let stored = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::Completed);
        assert!(!stored.comments().contains("Отмена"));
        assert!(!notifier.kinds().contains(&NotificationKind::Cancellation));
    }

    #[test]
    fn cancel_appends_reason_and_notifies() {
        let (service, _repo, notifier, catalog) = setup();
        let id = create_beef_order(&service, &catalog).id_typed();

        let cancelled = service.cancel_order(id, "menu change").unwrap();
        assert_eq!(cancelled.status(), OrderStatus::Cancelled);
        assert!(cancelled.comments().ends_with("\nОтмена: menu change"));
        assert_eq!(notifier.kinds(), vec![NotificationKind::Cancellation]);
        assert_eq!(notifier.statuses(), vec![OrderStatus::Cancelled]);
    }

    #[test]
    fn unknown_order_id_is_not_found() {
        let (service, _repo, notifier, _catalog) = setup();
        let missing = OrderId::new();

        assert_eq!(
            service.confirm_order(missing).unwrap_err(),
            ServiceError::OrderNotFound(missing)
        );
        assert!(service.get_order_by_id(missing).unwrap().is_none());
        assert!(notifier.kinds().is_empty());
    }

    #[test]
    fn item_edits_only_while_created() {
        let (service, repo, _notifier, catalog) = setup();
        let id = create_beef_order(&service, &catalog).id_typed();
        let milk = catalog.find_by_name("Milk").unwrap();
        let beef_id = catalog.find_by_name("Beef").unwrap().id_typed();

        let order = service.add_item(id, milk.clone(), 3).unwrap();
        assert_eq!(order.item_count(), 2);
        let order = service.remove_item(id, beef_id).unwrap();
        assert_eq!(order.item_count(), 1);

        service.confirm_order(id).unwrap();
        let err = service.add_item(id, milk, 1).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Order(OrderError::OrderLocked {
                status: OrderStatus::Confirmed
            })
        );
        assert_eq!(repo.find_by_id(id).unwrap().unwrap().item_count(), 1);
    }

    #[test]
    fn confirming_an_emptied_order_fails() {
        let (service, repo, notifier, catalog) = setup();
        let order = create_beef_order(&service, &catalog);
        let id = order.id_typed();
        let beef_id = catalog.find_by_name("Beef").unwrap().id_typed();

        service.remove_item(id, beef_id).unwrap();
        assert_eq!(
            service.confirm_order(id).unwrap_err(),
            ServiceError::Order(OrderError::EmptyItems)
        );
        assert_eq!(
            repo.find_by_id(id).unwrap().unwrap().status(),
            OrderStatus::Created
        );
        assert!(notifier.kinds().is_empty());
    }

    #[test]
    fn create_rejects_empty_and_zero_quantity_input() {
        let (service, repo, _notifier, catalog) = setup();
        let supplier = SupplierId::new("S1").unwrap();

        assert_eq!(
            service
                .create_order(supplier.clone(), Vec::<(Arc<Product>, u32)>::new())
                .unwrap_err(),
            ServiceError::Order(OrderError::EmptyItems)
        );
        let beef = catalog.find_by_name("Beef").unwrap();
        assert!(matches!(
            service.create_order(supplier, [(beef, 0)]).unwrap_err(),
            ServiceError::Order(OrderError::InvalidQuantity { quantity: 0, .. })
        ));
        assert!(repo.is_empty());
    }

    #[test]
    fn notification_failure_does_not_undo_transition() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let service = OrderService::new(repo.clone(), Arc::new(FailingNotifier));
        let catalog = ProductCatalog::demo().unwrap();
        let id = create_beef_order(&service, &catalog).id_typed();

        let confirmed = service.confirm_order(id).unwrap();
        assert_eq!(confirmed.status(), OrderStatus::Confirmed);
        let sent = service.send_order_to_supplier(id).unwrap();
        assert_eq!(sent.status(), OrderStatus::Sent);
        assert_eq!(
            repo.find_by_id(id).unwrap().unwrap().status(),
            OrderStatus::Sent
        );

        let cancelled = service.cancel_order(id, "menu change").unwrap();
        assert_eq!(cancelled.status(), OrderStatus::Cancelled);
        assert_eq!(
            repo.find_by_id(id).unwrap().unwrap().status(),
            OrderStatus::Cancelled
        );

        let returned_id = create_beef_order(&service, &catalog).id_typed();
        drive_to_quality_check(&service, returned_id);
        service.reject_delivery(returned_id, "spoiled").unwrap();
        let returned = service.return_to_supplier(returned_id, "spoiled").unwrap();
        assert_eq!(returned.status(), OrderStatus::Returned);
        let stored = repo.find_by_id(returned_id).unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::Returned);
        assert!(stored.comments().contains("Возврат: spoiled"));
    }

    #[test]
    fn reads_filter_by_supplier() {
        let (service, _repo, _notifier, catalog) = setup();
        let beef = catalog.find_by_name("Beef").unwrap();
        let s2 = SupplierId::new("S2").unwrap();

        create_beef_order(&service, &catalog);
        create_beef_order(&service, &catalog);
        service.create_order(s2.clone(), [(beef, 1)]).unwrap();

        assert_eq!(service.get_all_orders().unwrap().len(), 3);
        let for_s2 = service.get_orders_by_supplier(&s2).unwrap();
        assert_eq!(for_s2.len(), 1);
        assert_eq!(for_s2[0].supplier_id(), &s2);
    }

    #[test]
    fn concurrent_item_additions_are_not_lost() {
        let (service, repo, _notifier, catalog) = setup();
        let id = create_beef_order(&service, &catalog).id_typed();
        let service = Arc::new(service);
        let milk = catalog.find_by_name("Milk").unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let service = Arc::clone(&service);
                let milk = Arc::clone(&milk);
                thread::spawn(move || service.add_item(id, milk, 1).unwrap())
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let stored = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(stored.quantity_of(&milk.id_typed()), Some(16));
    }

    #[test]
    fn racing_transitions_on_one_order_commit_exactly_once() {
        let (service, repo, notifier, catalog) = setup();
        let id = create_beef_order(&service, &catalog).id_typed();
        let service = Arc::new(service);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                thread::spawn(move || service.confirm_order(id).is_ok())
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(
            repo.find_by_id(id).unwrap().unwrap().status(),
            OrderStatus::Confirmed
        );
        assert_eq!(notifier.kinds(), vec![NotificationKind::ConfirmationRequest]);
    }
}
