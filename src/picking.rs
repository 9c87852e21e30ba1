use crate::state::AppState;
use efield_viz::{Button, InputEvent, Key};
use glam::DVec2;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, PointerEvent};

/// Client (CSS px) coordinates to canvas backing-store pixels.
pub fn screen_to_canvas(x: f64, y: f64, canvas: &HtmlCanvasElement) -> DVec2 {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return DVec2::new(x - rect.left(), y - rect.top());
    }
    let sx = canvas.width() as f64 / rect.width();
    let sy = canvas.height() as f64 / rect.height();
    DVec2::new((x - rect.left()) * sx, (y - rect.top()) * sy)
}

fn listen<E, F>(target: &web_sys::EventTarget, name: &str, f: F) -> Result<(), JsValue>
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let cb = Closure::<dyn FnMut(E)>::new(f);
    target.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())?;
    // listeners live as long as the page
    cb.forget();
    Ok(())
}

/// Turns DOM input into queued `InputEvent`s; the frame loop drains them.
pub fn attach(canvas: &HtmlCanvasElement, app: AppState) -> Result<(), JsValue> {
    let win = web_sys::window().ok_or(JsValue::from_str("no window"))?;

    // secondary button removes charges; keep the browser menu out of the way
    listen(canvas, "contextmenu", |e: MouseEvent| e.prevent_default())?;

    let c = canvas.clone();
    listen(canvas, "pointerdown", move |e: PointerEvent| {
        let pos = screen_to_canvas(e.client_x() as f64, e.client_y() as f64, &c);
        let button = Button::from_dom(e.button());
        app.pointer.set(pos);
        app.push(InputEvent::ButtonPress { button, pos });
        if button == Button::Primary {
            let _ = c.set_pointer_capture(e.pointer_id());
        }
        e.prevent_default();
    })?;

    // a second button pressed or released while another is held arrives
    // as a pointermove with `button` set, not as pointerdown/pointerup
    let c = canvas.clone();
    listen(&win, "pointermove", move |e: PointerEvent| {
        let pos = screen_to_canvas(e.client_x() as f64, e.client_y() as f64, &c);
        app.pointer.set(pos);
        let Some(event) = InputEvent::from_chord(e.button(), e.buttons(), pos) else {
            return;
        };
        let inside = pos.x >= 0.0
            && pos.y >= 0.0
            && pos.x <= c.width() as f64
            && pos.y <= c.height() as f64;
        if !(inside || c.has_pointer_capture(e.pointer_id())) {
            return;
        }
        app.push(event);
    })?;

    let on_up = move |e: PointerEvent| {
        app.push(InputEvent::ButtonRelease {
            button: Button::from_dom(e.button()),
        });
    };
    listen(&win, "pointerup", on_up)?;
    // a cancelled pointer never reports its button; release the drag
    listen(&win, "pointercancel", move |_e: PointerEvent| {
        app.push(InputEvent::ButtonRelease {
            button: Button::Primary,
        });
    })?;

    listen(&win, "keydown", move |e: KeyboardEvent| {
        if e.repeat() {
            return;
        }
        if let Some(key) = Key::from_key_name(&e.key()) {
            app.push(InputEvent::KeyPress(key));
        }
    })?;

    Ok(())
}
