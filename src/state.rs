use efield_viz::{Charge, FieldConfig, Hud, InputEvent, Session};
use glam::DVec2;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct AppState {
    pub config: FieldConfig,
    pub session: RwSignal<Session>,

    // filled by DOM listeners, drained once per frame
    pub events: RwSignal<Vec<InputEvent>>,
    // canvas-space pointer position; updated on every pointermove
    pub pointer: RwSignal<DVec2>,

    // last frame's HUD fields, set only when they change
    pub hud: RwSignal<Hud>,
    pub hud_text: RwSignal<String>,

    pub paused: RwSignal<bool>,
    pub stopped: RwSignal<bool>,
}

impl AppState {
    pub fn new(config: FieldConfig, initial_charges: Vec<Charge>) -> Self {
        let session = Session::new(config.interaction).with_charges(initial_charges);
        let hud = Hud {
            mode: session.interaction.mode,
            charge_count: session.charges.len(),
            active_sign: session.interaction.active_sign,
        };
        Self {
            config,
            session: RwSignal::new(session),
            events: RwSignal::new(Vec::new()),
            pointer: RwSignal::new(DVec2::ZERO),
            hud: RwSignal::new(hud),
            hud_text: RwSignal::new(String::new()),
            paused: RwSignal::new(false),
            stopped: RwSignal::new(false),
        }
    }

    #[inline]
    pub fn push(&self, event: InputEvent) {
        self.events.update_untracked(|q| q.push(event));
    }

    pub fn take_events(&self) -> Vec<InputEvent> {
        let mut drained = Vec::new();
        self.events
            .update_untracked(|q| drained = std::mem::take(q));
        drained
    }
}
