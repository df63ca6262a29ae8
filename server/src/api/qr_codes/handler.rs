//! QR code handlers

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::qr::{self, QrOptions};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuCodeRequest {
    /// Restrict the payload to these item ids; absent means the whole menu.
    pub item_ids: Option<Vec<String>>,
    pub options: QrOptions,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ItemCodeRequest {
    pub options: QrOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeResponse {
    pub data_url: String,
    /// Size of the encoded JSON payload, for admin UI capacity feedback
    pub payload_bytes: usize,
}

/// POST /api/qr/menu
pub async fn menu_code(
    State(state): State<ServerState>,
    Json(request): Json<MenuCodeRequest>,
) -> AppResult<Json<QrCodeResponse>> {
    let mut items = state.menu_items().list();
    if let Some(ids) = &request.item_ids {
        items.retain(|item| ids.contains(&item.id));
        if items.is_empty() {
            return Err(AppError::validation(
                "None of the requested item ids exist",
            ));
        }
    }

    let payload = qr::build_menu_payload(&items)?;
    let data_url = qr::render_data_url(&payload, &request.options)?;
    tracing::info!(items = items.len(), bytes = payload.len(), "menu QR code generated");
    Ok(Json(QrCodeResponse {
        data_url,
        payload_bytes: payload.len(),
    }))
}

/// POST /api/qr/menu/{id}
pub async fn item_code(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(request): Json<ItemCodeRequest>,
) -> AppResult<Json<QrCodeResponse>> {
    let item = state
        .menu_items()
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("Menu item {id} not found")))?;

    let payload = qr::build_single_item_payload(&item)?;
    let data_url = qr::render_data_url(&payload, &request.options)?;
    Ok(Json(QrCodeResponse {
        data_url,
        payload_bytes: payload.len(),
    }))
}
