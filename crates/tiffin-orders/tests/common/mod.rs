//! Shared fixtures for the order pipeline tests: an in-memory backend that
//! records calls and plays back scripted responses.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use tiffin_cart::{CartStore, MemoryStorage};
use tiffin_core::billing::FeePolicy;
use tiffin_core::catalog::{CatalogItem, Pricing};
use tiffin_core::status::OrderStatus;
use tiffin_orders::api::{
    ApiFailure, CatalogApi, OrderApi, OrderPayload, OrderReceipt, OrderSummary,
};

/// In-memory backend double. Counters are plain atomics so tests can assert
/// exactly how many calls crossed the boundary.
#[derive(Default)]
pub struct MockApi {
    pub create_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub status_calls: AtomicUsize,

    items: Mutex<HashMap<String, CatalogItem>>,
    create_failure: Mutex<Option<ApiFailure>>,
    status_failure: Mutex<Option<ApiFailure>>,
    fetch_script: Mutex<VecDeque<Result<Vec<OrderSummary>, ApiFailure>>>,
    pub last_payload: Mutex<Option<OrderPayload>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&self, item: CatalogItem) {
        self.items
            .lock()
            .unwrap()
            .insert(item.id.clone(), item);
    }

    /// Makes the next (and every following) create_order call fail.
    pub fn fail_create(&self, failure: ApiFailure) {
        *self.create_failure.lock().unwrap() = Some(failure);
    }

    /// Makes the next (and every following) update_order_status call fail.
    pub fn fail_status(&self, failure: ApiFailure) {
        *self.status_failure.lock().unwrap() = Some(failure);
    }

    /// Queues one fetch response; when the script runs dry, fetches return
    /// an empty list.
    pub fn script_fetch(&self, response: Result<Vec<OrderSummary>, ApiFailure>) {
        self.fetch_script.lock().unwrap().push_back(response);
    }
}

#[async_trait]
impl CatalogApi for MockApi {
    async fn get_item(&self, item_id: &str) -> Result<Option<CatalogItem>, ApiFailure> {
        Ok(self.items.lock().unwrap().get(item_id).cloned())
    }
}

#[async_trait]
impl OrderApi for MockApi {
    async fn create_order(&self, payload: &OrderPayload) -> Result<OrderReceipt, ApiFailure> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_payload.lock().unwrap() = Some(payload.clone());

        if let Some(failure) = self.create_failure.lock().unwrap().clone() {
            return Err(failure);
        }

        Ok(OrderReceipt {
            order_id: format!("order-{}", n),
            order_number: format!("TFN-{:04}", 1000 + n),
        })
    }

    async fn orders_for_customer(
        &self,
        _customer_id: &str,
    ) -> Result<Vec<OrderSummary>, ApiFailure> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetch_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn update_order_status(
        &self,
        _order_id: &str,
        _status: OrderStatus,
    ) -> Result<(), ApiFailure> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);

        match self.status_failure.lock().unwrap().clone() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Fixture Builders
// =============================================================================

pub const ITEM_A: &str = "550e8400-e29b-41d4-a716-446655440000";
pub const ITEM_B: &str = "550e8400-e29b-41d4-a716-446655440001";

pub fn single_item(id: &str, name: &str, paise: i64) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        available: true,
        pricing: Pricing::single(paise),
        image_url: None,
    }
}

pub fn variation_item(id: &str, name: &str) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        available: true,
        pricing: Pricing::variations([("Regular", 10000), ("Large", 15000)]),
        image_url: None,
    }
}

pub fn empty_store() -> (CartStore, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let store = CartStore::load(storage.clone(), FeePolicy::default());
    (store, storage)
}

pub fn summary(order_id: &str, number: &str, status: OrderStatus) -> OrderSummary {
    OrderSummary {
        order_id: order_id.to_string(),
        order_number: number.to_string(),
        status,
        items: Vec::new(),
        subtotal_paise: 35000,
        delivery_fee_paise: 5000,
        total_paise: 40000,
        order_date: Utc::now(),
    }
}
