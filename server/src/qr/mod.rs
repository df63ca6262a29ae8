//! QR menu codes
//!
//! Builds the scannable menu payload and renders it to a PNG data URL. The
//! payload is a versioned JSON envelope; scanner apps reject any envelope
//! whose `v` tag they do not understand, so the shape here is load-bearing
//! and covered by exact-string tests.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgb};
use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};

use shared::models::MenuItem;

use crate::utils::AppError;

/// Fixed restaurant identifier embedded in every payload
pub const RESTAURANT_ID: &str = "JIFORA";

/// Payload schema version
pub const SCHEMA_VERSION: &str = "1.0";

/// Versioned envelope a scanner decodes from the QR image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MenuPayload {
    pub restaurant_id: String,
    pub menu_items: Vec<PayloadItem>,
    pub v: String,
}

/// Projection of a menu item into the payload — id, name, price, category
/// only, keeping the encoded text small enough for a scannable code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PayloadItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
}

impl From<&MenuItem> for PayloadItem {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            category: item.category.clone(),
        }
    }
}

/// Rendering options, all defaulted for the common case.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrOptions {
    /// Error correction level: L, M, Q or H
    pub ec_level: String,
    /// Pixels per module
    pub scale: u32,
    /// Quiet-zone width in modules
    pub margin: u32,
    /// Module color, `#rrggbb`
    pub dark: String,
    /// Background color, `#rrggbb`
    pub light: String,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            ec_level: "M".to_string(),
            scale: 8,
            margin: 2,
            dark: "#000000".to_string(),
            light: "#ffffff".to_string(),
        }
    }
}

/// Serialize the full-menu payload.
pub fn build_menu_payload(items: &[MenuItem]) -> Result<String, AppError> {
    let payload = MenuPayload {
        restaurant_id: RESTAURANT_ID.to_string(),
        menu_items: items.iter().map(PayloadItem::from).collect(),
        v: SCHEMA_VERSION.to_string(),
    };
    serde_json::to_string(&payload)
        .map_err(|e| AppError::internal(format!("Failed to serialize QR payload: {e}")))
}

/// Serialize a single-item payload — same envelope, one entry.
pub fn build_single_item_payload(item: &MenuItem) -> Result<String, AppError> {
    build_menu_payload(std::slice::from_ref(item))
}

fn parse_ec(level: &str) -> Result<EcLevel, AppError> {
    match level {
        "L" => Ok(EcLevel::L),
        "M" => Ok(EcLevel::M),
        "Q" => Ok(EcLevel::Q),
        "H" => Ok(EcLevel::H),
        other => Err(AppError::validation(format!(
            "Invalid error correction level: {other}"
        ))),
    }
}

fn parse_color(value: &str) -> Result<Rgb<u8>, AppError> {
    let hex = value
        .strip_prefix('#')
        .filter(|h| h.len() == 6)
        .ok_or_else(|| AppError::validation(format!("Invalid color: {value}")))?;

    let byte = |range| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| AppError::validation(format!("Invalid color: {value}")))
    };
    Ok(Rgb([byte(0..2)?, byte(2..4)?, byte(4..6)?]))
}

/// Encode `text` as a QR code and return it as a `data:image/png;base64,...`
/// URL. A payload too large for the densest QR version is a validation
/// error, not an internal one — the caller chose too many items.
pub fn render_data_url(text: &str, options: &QrOptions) -> Result<String, AppError> {
    let ec = parse_ec(&options.ec_level)?;
    let dark = parse_color(&options.dark)?;
    let light = parse_color(&options.light)?;

    let code = QrCode::with_error_correction_level(text.as_bytes(), ec)
        .map_err(|e| AppError::validation(format!("Payload does not fit in a QR code: {e}")))?;

    let image = code
        .render::<Rgb<u8>>()
        .module_dimensions(options.scale.max(1), options.scale.max(1))
        .quiet_zone(options.margin > 0)
        .dark_color(dark)
        .light_color(light)
        .build();

    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| AppError::internal(format!("Failed to encode QR image: {e}")))?;

    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(png.into_inner())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, price: f64, category: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            menu_id: "main".into(),
            name: name.to_string(),
            description: "".into(),
            price,
            category: category.to_string(),
            image: "".into(),
        }
    }

    #[test]
    fn payload_shape_is_exact() {
        let text =
            build_menu_payload(&[item("1700000000000", "Grilled Salmon", 18.5, "Mains")]).unwrap();
        assert_eq!(
            text,
            r#"{"restaurantId":"JIFORA","menuItems":[{"id":"1700000000000","name":"Grilled Salmon","price":18.5,"category":"Mains"}],"v":"1.0"}"#
        );
    }

    #[test]
    fn single_item_payload_uses_same_envelope() {
        let text = build_single_item_payload(&item("42", "Tiramisu", 6.0, "Desserts")).unwrap();
        let parsed: MenuPayload = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.restaurant_id, RESTAURANT_ID);
        assert_eq!(parsed.v, SCHEMA_VERSION);
        assert_eq!(parsed.menu_items.len(), 1);
        assert_eq!(parsed.menu_items[0].name, "Tiramisu");
    }

    #[test]
    fn unknown_fields_are_rejected_on_decode() {
        let text = r#"{"restaurantId":"JIFORA","menuItems":[],"v":"1.0","extra":true}"#;
        assert!(serde_json::from_str::<MenuPayload>(text).is_err());
    }

    #[test]
    fn render_produces_png_data_url() {
        let url = render_data_url("hello", &QrOptions::default()).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.len() > 100);
    }

    #[test]
    fn oversized_payload_is_a_validation_error() {
        // QR caps out around 3 KB at EC level M
        let huge = "x".repeat(8_000);
        let err = render_data_url(&huge, &QrOptions::default()).unwrap_err();
        assert!(err.to_string().contains("does not fit"));
    }

    #[test]
    fn bad_options_are_rejected() {
        let mut options = QrOptions::default();
        options.dark = "black".into();
        assert!(render_data_url("hello", &options).is_err());

        let mut options = QrOptions::default();
        options.ec_level = "X".into();
        assert!(render_data_url("hello", &options).is_err());
    }
}
