//! Native smoke run: drives the full frame pipeline through a scripted
//! session against a counting surface.

use efield_viz::surface::CountingSurface;
use efield_viz::{Button, ConfigError, FieldConfig, InputEvent, Integrator, Key, Session, run_frame};
use glam::DVec2;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let frames = parse_arg::<usize>(&args, "--frames").unwrap_or(240);
    let integrator = if args.iter().any(|a| a == "--rk4") {
        Integrator::Rk4
    } else {
        Integrator::Euler
    };

    let cfg = FieldConfig::default().with_integrator(integrator);
    cfg.validate()?;

    info!(frames, ?integrator, "headless run: {}x{}", cfg.width, cfg.height);

    let mut session = Session::new(cfg.interaction);
    let mut surface = CountingSurface::default();
    let started = Instant::now();
    let mut ran = 0usize;

    for frame in 0..frames {
        let pointer = pointer_at(frame, frames, &cfg);
        let events = scripted_events(frame, frames, &cfg);
        let report = run_frame(&mut session, events, pointer, &mut surface, &cfg);
        ran += 1;

        if frame % 60 == 0 || report.quit_requested {
            info!(
                frame,
                mode = %report.hud.mode,
                charges = report.hud.charge_count,
                arrows = report.arrows,
                lines = report.field_lines,
                max_magnitude = report.max_magnitude,
                "{}",
                report.hud
            );
        }
        if report.quit_requested {
            break;
        }
    }

    let elapsed = started.elapsed();
    info!(
        frames = ran,
        avg_ms = elapsed.as_secs_f64() * 1000.0 / ran.max(1) as f64,
        lines_drawn = surface.lines,
        polylines_drawn = surface.polylines,
        "done"
    );
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|v| v == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse::<T>().ok())
}

fn press(pos: DVec2) -> InputEvent {
    InputEvent::ButtonPress {
        button: Button::Primary,
        pos,
    }
}

fn release() -> InputEvent {
    InputEvent::ButtonRelease {
        button: Button::Primary,
    }
}

fn anchor(cfg: &FieldConfig, fx: f64, fy: f64) -> DVec2 {
    DVec2::new(cfg.width * fx, cfg.height * fy)
}

// drag the first charge along a circle for the middle half of the run
fn pointer_at(frame: usize, frames: usize, cfg: &FieldConfig) -> DVec2 {
    let start = anchor(cfg, 0.35, 0.5);
    let (from, to) = (frames / 4, 3 * frames / 4);
    if frame < from || frame >= to {
        return start;
    }
    let phase = (frame - from) as f64 / (to - from).max(1) as f64 * std::f64::consts::TAU;
    let r = cfg.height * 0.15;
    start + r * DVec2::new(phase.cos() - 1.0, phase.sin())
}

fn scripted_events(frame: usize, frames: usize, cfg: &FieldConfig) -> Vec<InputEvent> {
    let drag_start = frames / 4;
    let drag_end = 3 * frames / 4;
    let mut events = Vec::new();
    if frame == 0 {
        // +1 at the left, -2 at the right
        events.extend([press(anchor(cfg, 0.35, 0.5)), release()]);
        events.extend([Key::Decrement, Key::Decrement, Key::Decrement].map(InputEvent::KeyPress));
        events.extend([press(anchor(cfg, 0.65, 0.5)), release()]);
    }
    if frame == drag_start {
        events.push(press(anchor(cfg, 0.35, 0.5)));
    }
    if frame == frames / 2 {
        events.push(InputEvent::KeyPress(Key::ToggleMode));
    }
    if frame == drag_end {
        events.push(release());
        events.push(InputEvent::ButtonPress {
            button: Button::Secondary,
            pos: anchor(cfg, 0.65, 0.5),
        });
    }
    if frame + 1 == frames {
        events.push(InputEvent::KeyPress(Key::Quit));
    }
    events
}
