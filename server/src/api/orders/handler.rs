//! Order handlers
//!
//! The order form sends its own total; the server recomputes it from the
//! line items and logs a warning on mismatch, but keeps the caller's value
//! so receipts match what the customer saw at checkout.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use shared::models::{Order, OrderCreate, OrderStatus};
use shared::util;

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_positive,
    validate_price, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use crate::workflow::OrderTransition;

/// Tolerance for caller-computed totals (floating point money)
const TOTAL_TOLERANCE: f64 = 0.005;

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: OrderStatus,
}

#[derive(Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

/// GET /api/orders — newest first.
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Order>> {
    Json(state.orders().list())
}

/// POST /api/orders
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    validate_required_text(&payload.customer_name, "customerName", MAX_NAME_LEN)?;
    validate_optional_text(&payload.customer_email, "customerEmail", MAX_NAME_LEN)?;
    validate_optional_text(&payload.customer_phone, "customerPhone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(
        &payload.special_instructions,
        "specialInstructions",
        MAX_NOTE_LEN,
    )?;
    if payload.items.is_empty() {
        return Err(AppError::validation("Order must contain at least one item"));
    }
    for item in &payload.items {
        validate_required_text(&item.name, "item name", MAX_NAME_LEN)?;
        validate_positive(item.quantity, "item quantity")?;
        validate_price(item.price, "item price")?;
    }
    validate_price(payload.total, "total")?;

    let order = Order {
        id: String::new(),
        customer_name: payload.customer_name,
        customer_email: payload.customer_email,
        customer_phone: payload.customer_phone,
        special_instructions: payload.special_instructions,
        items: payload.items,
        total: payload.total,
        status: OrderStatus::Pending,
        order_date: util::now_iso(),
    };

    let computed = order.computed_total();
    if (computed - order.total).abs() > TOTAL_TOLERANCE {
        tracing::warn!(
            submitted = order.total,
            computed,
            "order total does not match line items"
        );
    }

    let created = state.orders().add(order)?;
    tracing::info!(id = %created.id, total = created.total, "order created");
    Ok(Json(created))
}

/// PUT /api/orders/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusChange>,
) -> AppResult<Json<Order>> {
    let transition = OrderTransition::from_target(payload.status).ok_or_else(|| {
        AppError::business_rule(format!(
            "Cannot set an order back to {}",
            payload.status.as_str()
        ))
    })?;

    let updated = state.workflow().apply_order(&id, transition)?;
    Ok(Json(updated))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Deleted>> {
    let deleted = state.orders().delete(&id)?;
    if !deleted {
        return Err(AppError::not_found(format!("Order {id} not found")));
    }
    tracing::info!(%id, "order deleted");
    Ok(Json(Deleted { deleted }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderItem;

    fn order_form() -> OrderCreate {
        OrderCreate {
            customer_name: "Bruno".into(),
            customer_email: Some("bruno@example.com".into()),
            customer_phone: None,
            special_instructions: None,
            items: vec![
                OrderItem {
                    name: "Grilled Salmon".into(),
                    quantity: 2,
                    price: 18.5,
                },
                OrderItem {
                    name: "Tiramisu".into(),
                    quantity: 1,
                    price: 6.0,
                },
            ],
            total: 43.0,
        }
    }

    #[tokio::test]
    async fn first_order_gets_ord0001_and_pending() {
        let state = ServerState::for_tests();
        let created = create(State(state), Json(order_form())).await.unwrap();

        assert_eq!(created.id, "ORD0001");
        assert_eq!(created.status, OrderStatus::Pending);
        assert_eq!(created.total, 43.0);
    }

    #[tokio::test]
    async fn mismatched_total_is_kept_not_rejected() {
        let state = ServerState::for_tests();
        let mut payload = order_form();
        payload.total = 99.0;

        let created = create(State(state), Json(payload)).await.unwrap();
        assert_eq!(created.total, 99.0);
    }

    #[tokio::test]
    async fn empty_order_is_rejected() {
        let state = ServerState::for_tests();
        let mut payload = order_form();
        payload.items.clear();

        let err = create(State(state), Json(payload)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn status_walks_forward_only() {
        let state = ServerState::for_tests();
        let created = create(State(state.clone()), Json(order_form()))
            .await
            .unwrap();

        let updated = update_status(
            State(state.clone()),
            Path(created.id.clone()),
            Json(StatusChange {
                status: OrderStatus::Processing,
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, OrderStatus::Processing);

        // Regressing to pending is refused up front
        let err = update_status(
            State(state),
            Path(created.id.clone()),
            Json(StatusChange {
                status: OrderStatus::Pending,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }
}
