//! # Staff Status Updates
//!
//! Forwards validated lifecycle transitions to the status update capability.
//!
//! The transition rules themselves live in `tiffin_core::status`; this
//! module adds the network hand-off. An illegal request is rejected here and
//! never reaches the backend. Multiple staff sessions may race on the same
//! order — the backend order record is the source of truth, so a server
//! rejection is surfaced to the caller rather than retried.

use std::sync::Arc;

use tracing::{debug, info, warn};

use tiffin_core::status::{validate_transition, OrderStatus};

use crate::api::OrderApi;
use crate::error::OrderResult;

/// Applies staff-requested status changes.
pub struct StatusUpdater {
    api: Arc<dyn OrderApi>,
}

impl StatusUpdater {
    /// Creates an updater over the order capability.
    pub fn new(api: Arc<dyn OrderApi>) -> Self {
        StatusUpdater { api }
    }

    /// Requests a transition for an order.
    ///
    /// `current` is the status the staff view last saw; the move is checked
    /// against the lifecycle graph before the capability is invoked.
    pub async fn request_transition(
        &self,
        order_id: &str,
        current: OrderStatus,
        target: OrderStatus,
    ) -> OrderResult<()> {
        debug!(%order_id, from = %current, to = %target, "status update requested");

        validate_transition(current, target)?;

        match self.api.update_order_status(order_id, target).await {
            Ok(()) => {
                info!(%order_id, from = %current, to = %target, "order status updated");
                Ok(())
            }
            Err(failure) => {
                warn!(%order_id, error = %failure, "status update refused by backend");
                Err(failure.into())
            }
        }
    }
}
