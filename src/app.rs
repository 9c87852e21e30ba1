use crate::canvas::CanvasSurface;
use crate::perf::{self, Scope};
use crate::picking;
use crate::state::AppState;
use efield_viz::{Charge, FieldConfig, InputEvent, Key, run_frame};
use leptos::logging::{error, log};
use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlCanvasElement;

#[component]
pub fn App(config: FieldConfig) -> impl IntoView {
    let dipole = vec![
        Charge::new(config.width * 0.375, config.height * 0.5, 1.0),
        Charge::new(config.width * 0.625, config.height * 0.5, -1.0),
    ];
    let app = AppState::new(config, dipole);

    view! {
      <main class="h-screen flex overflow-hidden">
        <aside class="w-80 h-full overflow-y-auto p-4 border-r border-zinc-800 bg-zinc-950 text-zinc-100 space-y-4">
          <h2 class="font-semibold text-lg">Controls</h2>
          <p class="text-sm opacity-70">"Left click: add / drag · Right click: remove"</p>

          <div class="space-y-6">
            <section class="space-y-2">
              <h3 class="font-semibold text-sm uppercase tracking-wide opacity-70">View</h3>
              <button
                class="text-sm px-3 py-1 rounded bg-zinc-800 hover:bg-zinc-700 transition-colors"
                on:click=move |_| app.push(InputEvent::KeyPress(Key::ToggleMode))
              >
                {move || format!("Mode: {}  (F)", app.hud.get().mode)}
              </button>
            </section>

            <section class="space-y-2">
              <h3 class="font-semibold text-sm uppercase tracking-wide opacity-70">New charges</h3>
              <div class="flex items-center gap-2">
                <button
                  class="text-sm px-3 py-1 rounded bg-zinc-800 hover:bg-zinc-700"
                  on:click=move |_| app.push(InputEvent::KeyPress(Key::Decrement))
                >"−"</button>
                <span class="font-mono w-10 text-center">
                  {move || format!("{:+}", app.hud.get().active_sign)}
                </span>
                <button
                  class="text-sm px-3 py-1 rounded bg-zinc-800 hover:bg-zinc-700"
                  on:click=move |_| app.push(InputEvent::KeyPress(Key::Increment))
                >"+"</button>
              </div>
            </section>

            <section class="space-y-2">
              <h3 class="font-semibold text-sm uppercase tracking-wide opacity-70">Charges</h3>
              <p class="text-sm font-mono">{move || format!("{} placed", app.hud.get().charge_count)}</p>
              <button
                class="text-sm px-3 py-1 rounded bg-zinc-800 hover:bg-zinc-700"
                on:click=move |_| app.push(InputEvent::KeyPress(Key::Clear))
              >"Clear (R)"</button>
            </section>

            <section class="space-y-2">
              <h3 class="font-semibold text-sm uppercase tracking-wide opacity-70">Playback</h3>
              <button
                class="text-sm px-3 py-1 rounded bg-zinc-800 hover:bg-zinc-700 transition-colors"
                on:click=move |_| app.paused.update(|p| *p = !*p)
              >
                {move || if app.paused.get() { "Play" } else { "Pause" }}
              </button>
              <p class="text-xs opacity-60">
                {move || if app.stopped.get() {
                    "Stopped"
                } else if app.paused.get() {
                    "Paused"
                } else {
                    "Running"
                }}
              </p>
            </section>
          </div>
        </aside>

        <section class="flex-1 h-full relative bg-black overflow-hidden">
          <FieldCanvas app=app />
          <div class="absolute right-2 top-2 px-2 py-1 rounded bg-black/60 text-lime-400 text-sm font-mono pointer-events-none whitespace-pre leading-tight">
            {move || app.hud_text.get()}
          </div>
        </section>
      </main>
    }
}

#[component]
fn FieldCanvas(app: AppState) -> impl IntoView {
    let canvas_ref: NodeRef<leptos::html::Canvas> = NodeRef::new();

    canvas_ref.on_load(move |canvas| {
        if let Err(e) = picking::attach(&canvas, app) {
            error!("input listeners: {e:?}");
            return;
        }
        if let Err(e) = start_frame_loop(canvas, app) {
            error!("frame loop: {e:?}");
        }
    });

    view! {
      <div class="absolute inset-0 flex items-center justify-center">
        <canvas node_ref=canvas_ref class="max-w-full max-h-full block"></canvas>
      </div>
    }
}

/// One `run_frame` per animation frame until the session asks to quit.
pub fn start_frame_loop(canvas: HtmlCanvasElement, app: AppState) -> Result<(), JsValue> {
    let cfg = app.config;
    let mut surface = CanvasSurface::new(canvas, cfg.width as u32, cfg.height as u32)?;

    let raf = Rc::new(RefCell::new(None::<Closure<dyn FnMut(f64)>>));
    let raf2 = raf.clone();

    // fps state (EWMA so the readout stays steady)
    let mut last_t_ms = 0.0f64;
    let mut ema_dt_ms = 16.0f64;

    *raf2.borrow_mut() = Some(Closure::wrap(Box::new(move |t_ms: f64| {
        let Some(win) = web_sys::window() else {
            return;
        };
        if app.stopped.get_untracked() {
            log!("session ended; frame loop stopped");
            app.hud_text.set("stopped".into());
            return;
        }
        // schedule first so a paused session keeps idling
        if let Some(cb) = raf.borrow().as_ref() {
            let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
        }

        if app.paused.get_untracked() {
            last_t_ms = 0.0;
            ema_dt_ms = 16.0;
            perf::discard_frame_timings();
            app.hud_text.set("paused".into());
            return;
        }

        let events = app.take_events();
        let pointer = app.pointer.get_untracked();
        let mut report = None;
        {
            let _frame = Scope::new("frame");
            app.session.update_untracked(|session| {
                report = Some(run_frame(session, events, pointer, &mut surface, &cfg));
            });
        }
        let Some(report) = report else {
            return;
        };
        if app.hud.get_untracked() != report.hud {
            app.hud.set(report.hud);
        }
        if report.quit_requested {
            app.stopped.set(true);
        }

        if last_t_ms != 0.0 {
            let dt = t_ms - last_t_ms;
            ema_dt_ms = 0.9 * ema_dt_ms + 0.1 * dt;
            let fps = if ema_dt_ms > 0.0 { 1000.0 / ema_dt_ms } else { 0.0 };
            let drawn = if report.field_lines > 0 {
                format!("{} lines", report.field_lines)
            } else {
                format!("{} arrows", report.arrows)
            };
            app.hud_text.set(format!(
                "{:.1} fps | {:.2} ms\n{} | max |E| {:.3e}\n{}",
                fps,
                ema_dt_ms,
                drawn,
                report.max_magnitude,
                perf::drain_frame_timings()
            ));
        } else {
            perf::discard_frame_timings();
        }
        last_t_ms = t_ms;
    }) as Box<dyn FnMut(f64)>));

    let win = web_sys::window().ok_or(JsValue::from_str("no window"))?;
    if let Some(cb) = raf2.borrow().as_ref() {
        win.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    log!("frame loop started ({}x{})", cfg.width, cfg.height);
    Ok(())
}
