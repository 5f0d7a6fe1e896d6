//! # Order Polling Monitor
//!
//! Keeps a customer's order list fresh by re-fetching on a fixed interval.
//!
//! ## Monitor Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Polling Monitor                               │
//! │                                                                         │
//! │  spawn() ──► fetch immediately ──► wait interval ──► fetch ──► ...     │
//! │                     │                                  │                │
//! │                     ▼                                  ▼                │
//! │              ┌─────────────────────────────────────────────────┐       │
//! │              │  OrderFeed (shared snapshot)                    │       │
//! │              │  • orders: last successfully fetched list       │       │
//! │              │  • last_success / next_fetch_at (for the UI)    │       │
//! │              │  • last_error: set on failure, cleared on       │       │
//! │              │    success; the list itself is NOT dropped      │       │
//! │              └─────────────────────────────────────────────────┘       │
//! │                                                                         │
//! │  handle.shutdown() (or dropping the handle) cancels the loop;          │
//! │  no fetch is issued after deactivation.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fetches run to completion before the next tick fires, so each tick's
//! result simply overwrites the displayed list. Status only advances
//! monotonically in the backend, which makes last-fetch-wins safe.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};

use crate::api::{OrderApi, OrderSummary};

// =============================================================================
// Configuration
// =============================================================================

/// Polling configuration.
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// Time between fetches. The first fetch happens immediately.
    pub poll_interval: Duration,
}

impl Default for MonitorConfig {
    /// Storefront default: refresh every 15 seconds.
    fn default() -> Self {
        MonitorConfig {
            poll_interval: Duration::from_secs(15),
        }
    }
}

// =============================================================================
// Feed Snapshot
// =============================================================================

/// The monitor's externally visible state.
#[derive(Debug, Clone, Default)]
pub struct OrderFeed {
    /// Last successfully fetched order list.
    pub orders: Vec<OrderSummary>,

    /// When the list was last refreshed successfully.
    pub last_success: Option<DateTime<Utc>>,

    /// When the next fetch is scheduled.
    pub next_fetch_at: Option<DateTime<Utc>>,

    /// Error indicator from the most recent fetch; `None` after a success.
    pub last_error: Option<String>,
}

// =============================================================================
// Monitor
// =============================================================================

/// Background poller for a customer's orders.
pub struct OrderMonitor;

impl OrderMonitor {
    /// Spawns the polling loop and returns its handle.
    ///
    /// The loop performs one fetch right away, then one per
    /// `config.poll_interval` until the handle shuts it down.
    pub fn spawn(
        api: Arc<dyn OrderApi>,
        customer_id: impl Into<String>,
        config: MonitorConfig,
    ) -> MonitorHandle {
        let feed = Arc::new(RwLock::new(OrderFeed::default()));
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tokio::spawn(Self::run(
            api,
            customer_id.into(),
            config,
            feed.clone(),
            shutdown_rx,
        ));

        MonitorHandle { feed, shutdown_tx }
    }

    /// The polling loop. Runs until shutdown.
    async fn run(
        api: Arc<dyn OrderApi>,
        customer_id: String,
        config: MonitorConfig,
        feed: Arc<RwLock<OrderFeed>>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        info!(interval = ?config.poll_interval, "order monitor starting");

        // First tick resolves immediately; a tick that lands late is
        // delayed, not burst.
        let mut interval = tokio::time::interval(config.poll_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    Self::fetch_once(api.as_ref(), &customer_id, config, &feed).await;
                }

                // Resolves on an explicit shutdown AND when the handle is
                // dropped (channel closed) — either way the loop ends and
                // no further fetch is issued.
                _ = shutdown_rx.recv() => {
                    info!("order monitor shutting down");
                    break;
                }
            }
        }

        info!("order monitor stopped");
    }

    /// One independent fetch. Failure keeps the last-known list.
    async fn fetch_once(
        api: &dyn OrderApi,
        customer_id: &str,
        config: MonitorConfig,
        feed: &RwLock<OrderFeed>,
    ) {
        let result = api.orders_for_customer(customer_id).await;
        let now = Utc::now();
        let next = now + chrono::Duration::milliseconds(config.poll_interval.as_millis() as i64);

        let mut feed = feed.write().await;
        feed.next_fetch_at = Some(next);

        match result {
            Ok(orders) => {
                debug!(count = orders.len(), "order list refreshed");
                feed.orders = orders;
                feed.last_success = Some(now);
                feed.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, "order fetch failed, keeping last-known list");
                feed.last_error = Some(e.to_string());
            }
        }
    }
}

// =============================================================================
// Handle
// =============================================================================

/// Handle for reading the feed and deactivating the monitor.
pub struct MonitorHandle {
    feed: Arc<RwLock<OrderFeed>>,
    shutdown_tx: mpsc::Sender<()>,
}

impl MonitorHandle {
    /// A snapshot of the current feed.
    pub async fn feed(&self) -> OrderFeed {
        self.feed.read().await.clone()
    }

    /// Deactivates the monitor. Idempotent; pending ticks are cancelled.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}
