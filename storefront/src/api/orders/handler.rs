//! Orders API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderCreated, OrderDraft, OrderStatus, StatusUpdate};

use crate::api::json_body;
use crate::core::ServerState;
use crate::db::RepoError;
use crate::export::RowUpdate;
use crate::pickup::{allowed_pickup_dates_iso, today_in};
use crate::utils::{ApiResponse, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct OrderList {
    pub orders: Vec<Order>,
}

#[derive(Serialize)]
pub struct OrderEnvelope {
    pub order: Order,
}

/// Place an order
///
/// Replies once the order is on disk; mail and export run afterwards.
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<OrderDraft>, JsonRejection>,
) -> AppResult<ApiResponse<OrderCreated>> {
    let draft = json_body(payload)?;

    let order = if state.config.strict_pickup_dates {
        let allowed = allowed_pickup_dates_iso(today_in(state.config.business_timezone));
        state.orders.create_restricted(draft, Some(&allowed)).await?
    } else {
        state.orders.create(draft).await?
    };

    let settings = state.settings.get().await;
    state.events.order_created(order.clone(), settings);

    Ok(ApiResponse::success(OrderCreated {
        order_id: order.id,
        total_cents: order.total_cents,
    }))
}

/// All orders, optionally filtered by `?status=`
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<OrderList>> {
    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            raw.parse::<OrderStatus>()
                .map_err(|_| RepoError::InvalidStatus(raw.to_string()))?,
        ),
        None => None,
    };
    let orders = state.orders.list_by_status(status).await;
    Ok(ApiResponse::success(OrderList { orders }))
}

/// One order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<OrderEnvelope>> {
    let order = state.orders.find_by_id(&id).await?;
    Ok(ApiResponse::success(OrderEnvelope { order }))
}

/// Move an order to another status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> AppResult<ApiResponse<OrderEnvelope>> {
    let update = json_body(payload)?;
    let order = state.orders.update_status(&id, &update.status).await?;

    state.events.order_updated(
        order.id.clone(),
        RowUpdate {
            status: Some(order.status),
            payment_method: update.payment_method.filter(|m| !m.trim().is_empty()),
            payment_received: update.payment_received,
        },
    );

    Ok(ApiResponse::success(OrderEnvelope { order }))
}
