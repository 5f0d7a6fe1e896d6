//! End-to-end tests for the order submission pipeline.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{empty_store, single_item, variation_item, MockApi, ITEM_A, ITEM_B};
use tiffin_orders::api::{ApiFailure, CatalogApi, StaticSession};
use tiffin_orders::{OrderError, OrderSubmitter};

const ADDRESS: &str = "12 MG Road, Pune";
const PHONE: &str = "+91 98765 43210";

fn submitter(api: &Arc<MockApi>) -> OrderSubmitter {
    OrderSubmitter::new(api.clone(), Arc::new(StaticSession::signed_in("cust-1")))
}

#[tokio::test]
async fn empty_cart_is_rejected_without_any_api_call() {
    let api = Arc::new(MockApi::new());
    let (mut store, _) = empty_store();

    let err = submitter(&api)
        .submit(&mut store, ADDRESS, PHONE)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::EmptyCart));
    assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn successful_submission_returns_order_number_and_clears_cart() {
    let api = Arc::new(MockApi::new());
    let (mut store, storage) = empty_store();
    store
        .add(&single_item(ITEM_A, "Dal Makhani", 10000), 2, None, None)
        .unwrap();

    let receipt = submitter(&api)
        .submit(&mut store, ADDRESS, PHONE)
        .await
        .unwrap();

    assert_eq!(receipt.order_number, "TFN-1001");
    assert!(store.is_empty());
    // The durable document is gone too: no restart can resubmit this cart.
    assert_eq!(
        tiffin_cart::CartStorage::read(storage.as_ref()).unwrap(),
        None
    );
}

#[tokio::test]
async fn payload_carries_every_line_field() {
    let api = Arc::new(MockApi::new());
    let (mut store, _) = empty_store();
    store
        .add(&single_item(ITEM_A, "Dal Makhani", 10000), 2, None, None)
        .unwrap();
    store
        .add(
            &variation_item(ITEM_B, "Chicken Biryani"),
            1,
            Some("Large"),
            Some("less spicy".to_string()),
        )
        .unwrap();

    submitter(&api)
        .submit(&mut store, ADDRESS, PHONE)
        .await
        .unwrap();

    let payload = api.last_payload.lock().unwrap().clone().unwrap();
    assert_eq!(payload.customer_id, "cust-1");
    assert_eq!(payload.delivery_address, ADDRESS);
    assert_eq!(payload.phone, PHONE);
    assert_eq!(payload.items.len(), 2);

    let biryani = payload.items.iter().find(|i| i.item_id == ITEM_B).unwrap();
    assert_eq!(biryani.quantity, 1);
    assert_eq!(biryani.variation.as_deref(), Some("Large"));
    assert_eq!(biryani.special_instructions.as_deref(), Some("less spicy"));
}

#[tokio::test]
async fn missing_delivery_fields_fail_before_any_api_call() {
    let api = Arc::new(MockApi::new());
    let (mut store, _) = empty_store();
    store
        .add(&single_item(ITEM_A, "Dal Makhani", 10000), 1, None, None)
        .unwrap();

    let s = submitter(&api);

    let err = s.submit(&mut store, "   ", PHONE).await.unwrap_err();
    assert!(matches!(err, OrderError::MissingDeliveryInfo { ref field } if field == "delivery address"));

    let err = s.submit(&mut store, ADDRESS, "").await.unwrap_err();
    assert!(matches!(err, OrderError::MissingDeliveryInfo { ref field } if field == "phone"));

    assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
    assert!(!store.is_empty());
}

#[tokio::test]
async fn signed_out_session_fails_with_not_authenticated() {
    let api = Arc::new(MockApi::new());
    let (mut store, _) = empty_store();
    store
        .add(&single_item(ITEM_A, "Dal Makhani", 10000), 1, None, None)
        .unwrap();

    let submitter = OrderSubmitter::new(api.clone(), Arc::new(StaticSession::anonymous()));
    let err = submitter
        .submit(&mut store, ADDRESS, PHONE)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::NotAuthenticated));
    assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
    // Cart survives so the user can sign in and resume checkout.
    assert_eq!(store.cart().line_count(), 1);
}

#[tokio::test]
async fn malformed_line_id_fails_as_invalid_cart_line() {
    let api = Arc::new(MockApi::new());
    let (mut store, _) = empty_store();
    // An id that no catalog could ever have issued - the mark of a stale or
    // tampered persisted cart.
    store
        .add(&single_item("legacy-item-7", "Ghost Item", 10000), 1, None, None)
        .unwrap();

    let err = submitter(&api)
        .submit(&mut store, ADDRESS, PHONE)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::InvalidCartLine { ref item_id } if item_id == "legacy-item-7"));
    assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transport_failure_preserves_cart() {
    let api = Arc::new(MockApi::new());
    api.fail_create(ApiFailure::transport("connection timed out"));

    let (mut store, storage) = empty_store();
    store
        .add(&single_item(ITEM_A, "Dal Makhani", 10000), 2, None, None)
        .unwrap();

    let err = submitter(&api)
        .submit(&mut store, ADDRESS, PHONE)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Transport { .. }));
    assert_eq!(store.cart().line_count(), 1);
    // The document is still there for the retry.
    assert!(tiffin_cart::CartStorage::read(storage.as_ref())
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn vanished_items_are_classified_for_the_ui() {
    let api = Arc::new(MockApi::new());
    api.fail_create(ApiFailure::rejected(
        "Item 'Dal Makhani' is no longer available",
    ));

    let (mut store, _) = empty_store();
    store
        .add(&single_item(ITEM_A, "Dal Makhani", 10000), 1, None, None)
        .unwrap();

    let err = submitter(&api)
        .submit(&mut store, ADDRESS, PHONE)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::ItemsNoLongerAvailable { .. }));
    assert!(!store.is_empty());
}

#[tokio::test]
async fn menu_to_checkout_flow() {
    // The full customer path: look the item up, add it, check out.
    let api = Arc::new(MockApi::new());
    api.add_item(variation_item(ITEM_B, "Chicken Biryani"));

    let fetched = api.get_item(ITEM_B).await.unwrap().unwrap();

    let (mut store, _) = empty_store();
    store.add(&fetched, 1, Some("Large"), None).unwrap();
    assert_eq!(store.breakdown().total_paise, 15000 + 5000);

    let receipt = submitter(&api)
        .submit(&mut store, ADDRESS, PHONE)
        .await
        .unwrap();

    assert!(receipt.order_number.starts_with("TFN-"));
    assert!(store.is_empty());
}
