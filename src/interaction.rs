//! Pointer and key input as a finite-state machine over the drag index.
//!
//! [`transition`] is pure: it maps the prior state and one event to the next
//! state plus at most one [`Action`] on the charge set. [`Session`] owns the
//! frame-spanning data and applies both.

use crate::config::InteractionConfig;
use crate::field::{Charge, ChargeSet};
use glam::DVec2;
use std::fmt;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VisualizationMode {
    #[default]
    Arrows,
    FieldLines,
}

impl VisualizationMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Arrows => Self::FieldLines,
            Self::FieldLines => Self::Arrows,
        }
    }
}

impl fmt::Display for VisualizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Arrows => "Arrows",
            Self::FieldLines => "Field Lines",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
    Other(i16),
}

impl Button {
    /// DOM `MouseEvent.button` numbering.
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }

    // bit in the DOM `MouseEvent.buttons` mask
    fn held_mask(code: i16) -> u16 {
        match code {
            0 => 1,
            1 => 4,
            2 => 2,
            3 => 8,
            4 => 16,
            _ => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Increment,
    Decrement,
    Clear,
    ToggleMode,
    Quit,
}

impl Key {
    /// DOM `KeyboardEvent.key` names; unbound keys map to `None`.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "=" | "+" => Some(Self::Increment),
            "-" | "_" => Some(Self::Decrement),
            "r" | "R" => Some(Self::Clear),
            "f" | "F" => Some(Self::ToggleMode),
            "Escape" => Some(Self::Quit),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    ButtonPress { button: Button, pos: DVec2 },
    ButtonRelease { button: Button },
    KeyPress(Key),
}

impl InputEvent {
    /// Decodes a button change reported mid-chord, where the DOM sends a
    /// move carrying the changed `button` code and the new `buttons` mask.
    /// `button < 0` means no button changed.
    pub fn from_chord(button: i16, buttons: u16, pos: DVec2) -> Option<Self> {
        if button < 0 {
            return None;
        }
        let changed = Button::from_dom(button);
        Some(if buttons & Button::held_mask(button) != 0 {
            Self::ButtonPress {
                button: changed,
                pos,
            }
        } else {
            Self::ButtonRelease { button: changed }
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InteractionState {
    pub active_sign: i32,
    pub dragged: Option<usize>,
    pub mode: VisualizationMode,
}

impl InteractionState {
    pub fn new(cfg: &InteractionConfig) -> Self {
        Self {
            active_sign: cfg.initial_sign,
            dragged: None,
            mode: VisualizationMode::default(),
        }
    }
}

/// A change to the charge set or the session produced by a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    AddCharge(Charge),
    RemoveCharge(usize),
    ClearCharges,
    Quit,
}

pub fn transition(
    state: InteractionState,
    charges: &ChargeSet,
    event: &InputEvent,
    cfg: &InteractionConfig,
) -> (InteractionState, Option<Action>) {
    let mut next = state;
    let action = match *event {
        InputEvent::Quit | InputEvent::KeyPress(Key::Quit) => Some(Action::Quit),
        InputEvent::ButtonPress {
            button: Button::Primary,
            pos,
        } => match charges.hit_test(pos, cfg.hit_radius) {
            Some(i) => {
                next.dragged = Some(i);
                None
            }
            None => Some(Action::AddCharge(Charge {
                pos,
                q: state.active_sign as f64,
            })),
        },
        InputEvent::ButtonPress {
            button: Button::Secondary,
            pos,
        } => charges
            .nearest_within(pos, cfg.remove_radius)
            .map(Action::RemoveCharge),
        InputEvent::ButtonPress { .. } => None,
        InputEvent::ButtonRelease {
            button: Button::Primary,
        } => {
            next.dragged = None;
            None
        }
        InputEvent::ButtonRelease { .. } => None,
        InputEvent::KeyPress(Key::Increment) => {
            next.active_sign = (state.active_sign + 1).clamp(cfg.min_sign, cfg.max_sign);
            None
        }
        InputEvent::KeyPress(Key::Decrement) => {
            next.active_sign = (state.active_sign - 1).clamp(cfg.min_sign, cfg.max_sign);
            None
        }
        InputEvent::KeyPress(Key::Clear) => {
            next.dragged = None;
            Some(Action::ClearCharges)
        }
        InputEvent::KeyPress(Key::ToggleMode) => {
            next.mode = state.mode.toggled();
            None
        }
    };
    (next, action)
}

/// Everything that outlives a frame.
#[derive(Clone, Debug)]
pub struct Session {
    pub charges: ChargeSet,
    pub interaction: InteractionState,
    pub quit_requested: bool,
    cfg: InteractionConfig,
}

impl Session {
    pub fn new(cfg: InteractionConfig) -> Self {
        Self {
            charges: ChargeSet::new(),
            interaction: InteractionState::new(&cfg),
            quit_requested: false,
            cfg,
        }
    }

    pub fn with_charges(mut self, charges: impl Into<ChargeSet>) -> Self {
        self.charges = charges.into();
        self
    }

    pub fn handle(&mut self, event: &InputEvent) {
        let (next, action) = transition(self.interaction, &self.charges, event, &self.cfg);
        if next.mode != self.interaction.mode {
            debug!(mode = %next.mode, "visualization mode toggled");
        }
        self.interaction = next;
        if let Some(action) = action {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::AddCharge(c) => {
                debug!(x = c.pos.x, y = c.pos.y, q = c.q, "charge added");
                self.charges.add(c);
            }
            Action::RemoveCharge(i) => {
                if let Some(c) = self.charges.remove(i) {
                    debug!(index = i, q = c.q, "charge removed");
                }
            }
            Action::ClearCharges => {
                debug!(count = self.charges.len(), "charges cleared");
                self.charges.clear();
            }
            Action::Quit => self.quit_requested = true,
        }
    }

    /// Continuous drag binding, applied every frame. A stale index (e.g.
    /// after a removal) quietly ends the drag.
    pub fn follow_pointer(&mut self, pointer: DVec2) {
        let Some(i) = self.interaction.dragged else {
            return;
        };
        match self.charges.get_mut(i) {
            Some(c) => c.pos = pointer,
            None => self.interaction.dragged = None,
        }
    }
}
