//! WASM API — `#[wasm_bindgen]` exports matching the frontend's canvas
//! bindings.
//!
//! This module is only compiled when targeting `wasm32`. It provides:
//! - `init_canvas` / `destroy_canvas` — lifecycle
//! - `register_builtin_gates` / `register_template` — palette setup
//! - `place_block` / `remove_block` — block lifecycle
//! - `pointer_down` / `pointer_move` / `pointer_up` — gesture routing
//! - `scene_snapshot` — full scene readback for the JS painter
//! - `snap_all_to_grid` / `set_selection_enabled` — bulk toggles
//!
//! The editor runs headless against [`MemoryScene`]; after every event the
//! JS side pulls `scene_snapshot()` (or is pushed it via the change
//! callback) and repaints.

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::CanvasConfig;
use crate::core::geometry::Point;
use crate::core::template::BlockTemplate;
use crate::core::BlockId;
use crate::editor::CanvasEditor;
use crate::manager::{ClickOutcome, RejectReason};
use crate::scene::MemoryScene;

// ── Global state ────────────────────────────────────────────────────────────

struct WasmCanvas {
    editor: CanvasEditor<MemoryScene>,
    on_change: Option<js_sys::Function>,
}

thread_local! {
    static CANVAS: RefCell<Option<WasmCanvas>> = RefCell::new(None);
}

fn with_canvas<R>(f: impl FnOnce(&mut WasmCanvas) -> R) -> Result<R, String> {
    CANVAS.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(canvas) => Ok(f(canvas)),
            None => Err("Canvas not initialized. Call init_canvas() first.".into()),
        }
    })
}

fn notify_change(canvas: &WasmCanvas) {
    if let Some(callback) = &canvas.on_change {
        if let Ok(json) = serde_json::to_string(&canvas.editor.scene().snapshot()) {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&json));
        }
    }
}

// ── JSON interchange types ──────────────────────────────────────────────────

#[derive(Serialize)]
struct OkResponse {
    id: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct ClickResponse {
    outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<String>,
}

fn json_ok(id: &str) -> String {
    serde_json::to_string(&OkResponse { id: id.into() }).unwrap_or_default()
}

fn json_err(msg: impl Into<String>) -> String {
    serde_json::to_string(&ErrorResponse { error: msg.into() }).unwrap_or_default()
}

fn click_response(outcome: Option<ClickOutcome>) -> ClickResponse {
    match outcome {
        None => ClickResponse {
            outcome: "none".into(),
            source: None,
            from: None,
            to: None,
        },
        Some(ClickOutcome::SourceSelected(id)) => ClickResponse {
            outcome: "source_selected".into(),
            source: Some(id.to_string()),
            from: None,
            to: None,
        },
        Some(ClickOutcome::Connected(key)) => ClickResponse {
            outcome: "connected".into(),
            source: None,
            from: Some(key.from.to_string()),
            to: Some(key.to.to_string()),
        },
        Some(ClickOutcome::Disconnected(key)) => ClickResponse {
            outcome: "disconnected".into(),
            source: None,
            from: Some(key.from.to_string()),
            to: Some(key.to.to_string()),
        },
        Some(ClickOutcome::Rejected(RejectReason::SelfConnection)) => ClickResponse {
            outcome: "rejected_self_connection".into(),
            source: None,
            from: None,
            to: None,
        },
        Some(ClickOutcome::Rejected(RejectReason::CapabilityDenied)) => ClickResponse {
            outcome: "rejected_capability".into(),
            source: None,
            from: None,
            to: None,
        },
        Some(ClickOutcome::UnknownBlock) => ClickResponse {
            outcome: "unknown_block".into(),
            source: None,
            from: None,
            to: None,
        },
    }
}

// ── Exported functions ──────────────────────────────────────────────────────

/// Initialize the canvas with the given configuration JSON. An empty string
/// uses the stock defaults.
#[wasm_bindgen]
pub fn init_canvas(config_json: &str) -> String {
    console_error_panic_hook::set_once();

    let config: CanvasConfig = if config_json.trim().is_empty() {
        CanvasConfig::default()
    } else {
        match serde_json::from_str(config_json) {
            Ok(c) => c,
            Err(e) => return json_err(format!("Invalid config JSON: {}", e)),
        }
    };

    CANVAS.with(|cell| {
        *cell.borrow_mut() = Some(WasmCanvas {
            editor: CanvasEditor::new(MemoryScene::new(), config),
            on_change: None,
        });
    });
    json_ok("canvas")
}

#[wasm_bindgen]
pub fn destroy_canvas() {
    CANVAS.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

/// Register the JS callback invoked with a scene snapshot after every
/// mutating call.
#[wasm_bindgen]
pub fn set_change_callback(callback: js_sys::Function) {
    let _ = with_canvas(|canvas| {
        canvas.on_change = Some(callback);
    });
}

/// Seed the palette with the stock AND/XOR/OR/NOT gates.
#[wasm_bindgen]
pub fn register_builtin_gates() -> String {
    match with_canvas(|canvas| canvas.editor.templates().register_builtin_gates()) {
        Ok(Ok(())) => json_ok("builtin"),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

/// Register a single template from its JSON description.
#[wasm_bindgen]
pub fn register_template(template_json: &str) -> String {
    let template: BlockTemplate = match serde_json::from_str(template_json) {
        Ok(t) => t,
        Err(e) => return json_err(format!("Invalid template JSON: {}", e)),
    };
    let id = template.id.clone();

    match with_canvas(|canvas| canvas.editor.templates().register(template)) {
        Ok(Ok(())) => json_ok(&id),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn place_block(template_id: &str, x: f64, y: f64) -> String {
    match with_canvas(|canvas| {
        let placed = canvas.editor.place_block(template_id, Point::new(x, y));
        if placed.is_ok() {
            notify_change(canvas);
        }
        placed
    }) {
        Ok(Ok(id)) => json_ok(&id.to_string()),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn remove_block(block_id: &str) -> String {
    let id: BlockId = match block_id.parse() {
        Ok(id) => id,
        Err(e) => return json_err(format!("{}", e)),
    };

    match with_canvas(|canvas| {
        let removed = canvas.editor.remove_block(id);
        if removed.is_ok() {
            notify_change(canvas);
        }
        removed
    }) {
        Ok(Ok(())) => json_ok(block_id),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn pointer_down(x: f64, y: f64) -> String {
    match with_canvas(|canvas| {
        canvas.editor.pointer_down(Point::new(x, y));
        notify_change(canvas);
    }) {
        Ok(()) => json_ok("pointer_down"),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn pointer_move(x: f64, y: f64) -> String {
    match with_canvas(|canvas| {
        canvas.editor.pointer_move(Point::new(x, y));
        notify_change(canvas);
    }) {
        Ok(()) => json_ok("pointer_move"),
        Err(e) => json_err(e),
    }
}

/// Release the pointer. Returns the pairing-machine outcome when the
/// gesture was a plain click on a block.
#[wasm_bindgen]
pub fn pointer_up() -> String {
    match with_canvas(|canvas| {
        let outcome = canvas.editor.pointer_up();
        notify_change(canvas);
        outcome
    }) {
        Ok(outcome) => serde_json::to_string(&click_response(outcome)).unwrap_or_default(),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn snap_all_to_grid(force: bool) -> String {
    match with_canvas(|canvas| {
        canvas.editor.snap_all_to_grid(force);
        notify_change(canvas);
    }) {
        Ok(()) => json_ok("snap"),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn set_selection_enabled(enabled: bool) -> String {
    match with_canvas(|canvas| {
        canvas.editor.set_selection_enabled(enabled);
    }) {
        Ok(()) => json_ok("selection"),
        Err(e) => json_err(e),
    }
}

/// Serialize the full scene, sorted by shape id, for the JS painter.
#[wasm_bindgen]
pub fn scene_snapshot() -> String {
    match with_canvas(|canvas| serde_json::to_string(&canvas.editor.scene().snapshot())) {
        Ok(Ok(json)) => json,
        Ok(Err(e)) => json_err(format!("{}", e)),
        Err(e) => json_err(e),
    }
}
