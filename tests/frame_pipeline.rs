use efield_viz::color::{self, Rgb};
use efield_viz::surface::CountingSurface;
use efield_viz::{
    Button, Charge, FieldConfig, InputEvent, Key, Session, Surface, VisualizationMode, run_frame,
};
use glam::DVec2;

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Clear(Rgb),
    Line(DVec2, DVec2, Rgb),
    Polygon(Vec<DVec2>, Rgb),
    Circle(DVec2, f64, Rgb),
    Text(String),
    Polyline(Vec<DVec2>, Rgb),
    Present,
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl Recorder {
    fn circles(&self) -> Vec<(DVec2, Rgb)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Circle(c, _, rgb) => Some((*c, *rgb)),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for Recorder {
    fn clear(&mut self, color: Rgb) {
        self.ops.push(Op::Clear(color));
    }
    fn draw_line(&mut self, from: DVec2, to: DVec2, _width: f64, color: Rgb) {
        self.ops.push(Op::Line(from, to, color));
    }
    fn fill_polygon(&mut self, points: &[DVec2], color: Rgb) {
        self.ops.push(Op::Polygon(points.to_vec(), color));
    }
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgb) {
        self.ops.push(Op::Circle(center, radius, color));
    }
    fn draw_text(&mut self, text: &str, _at: DVec2, _color: Rgb) {
        self.ops.push(Op::Text(text.to_owned()));
    }
    fn draw_polyline(&mut self, points: &[DVec2], _width: f64, color: Rgb) {
        self.ops.push(Op::Polyline(points.to_vec(), color));
    }
    fn present(&mut self) {
        self.ops.push(Op::Present);
    }
}

const NO_EVENTS: [InputEvent; 0] = [];

fn small_cfg() -> FieldConfig {
    FieldConfig::default().with_viewport(400.0, 300.0)
}

fn press(button: Button, x: f64, y: f64) -> InputEvent {
    InputEvent::ButtonPress {
        button,
        pos: DVec2::new(x, y),
    }
}

#[test]
fn empty_session_draws_background_hud_and_nothing_else() {
    let cfg = small_cfg();
    let mut session = Session::new(cfg.interaction);
    let mut rec = Recorder::default();
    let report = run_frame(&mut session, NO_EVENTS, DVec2::ZERO, &mut rec, &cfg);

    assert_eq!(report.max_magnitude, 0.0);
    assert_eq!(report.arrows, 0);
    assert_eq!(report.samples, 16 * 12);
    assert_eq!(
        rec.ops,
        vec![
            Op::Clear(color::BACKGROUND),
            Op::Text("Mode: Arrows | Charges: 0 | Active: +1 | F: toggle | R: reset".into()),
            Op::Present,
        ]
    );
}

#[test]
fn arrow_mode_draws_one_glyph_per_nonzero_sample() {
    let cfg = small_cfg();
    let mut session = Session::new(cfg.interaction).with_charges(vec![Charge::new(110.0, 90.0, 2.0)]);
    let mut rec = Recorder::default();
    let report = run_frame(&mut session, NO_EVENTS, DVec2::ZERO, &mut rec, &cfg);

    // charge sits off-lattice, so every node sees some field
    assert_eq!(report.arrows, report.samples);
    assert_eq!(rec.count(|op| matches!(op, Op::Line(..))), report.arrows);
    assert_eq!(rec.count(|op| matches!(op, Op::Polygon(p, _) if p.len() == 3)), report.arrows);
    assert_eq!(rec.circles(), vec![(DVec2::new(110.0, 90.0), color::POSITIVE)]);
    assert!(matches!(rec.ops.last(), Some(Op::Present)));
}

#[test]
fn node_on_a_charge_gets_no_arrow() {
    let cfg = small_cfg();
    let mut session = Session::new(cfg.interaction).with_charges(vec![Charge::new(100.0, 100.0, 1.0)]);
    let mut surface = CountingSurface::default();
    let report = run_frame(&mut session, NO_EVENTS, DVec2::ZERO, &mut surface, &cfg);
    assert_eq!(report.arrows, report.samples - 1);
    assert_eq!(surface.polygons, report.arrows);
}

#[test]
fn toggling_to_field_lines_traces_every_seed() {
    let cfg = small_cfg();
    let mut session = Session::new(cfg.interaction).with_charges(vec![
        Charge::new(120.0, 150.0, 1.0),
        Charge::new(280.0, 150.0, -1.0),
    ]);
    let mut rec = Recorder::default();
    let report = run_frame(
        &mut session,
        [InputEvent::KeyPress(Key::ToggleMode)],
        DVec2::ZERO,
        &mut rec,
        &cfg,
    );

    assert_eq!(report.hud.mode, VisualizationMode::FieldLines);
    assert_eq!(report.arrows, 0);
    assert_eq!(report.field_lines, 28);
    assert_eq!(rec.count(|op| matches!(op, Op::Polyline(p, _) if p.len() > 1)), 28);
    assert_eq!(
        rec.circles().iter().map(|c| c.1).collect::<Vec<_>>(),
        vec![color::POSITIVE, color::NEGATIVE]
    );
    assert!(rec.ops.contains(&Op::Text(
        "Mode: Field Lines | Charges: 2 | Active: +1 | F: toggle | R: reset".into()
    )));
}

#[test]
fn drag_binds_charge_to_pointer_each_frame() {
    let cfg = small_cfg();
    let mut session = Session::new(cfg.interaction).with_charges(vec![Charge::new(50.0, 50.0, 1.0)]);
    let mut surface = CountingSurface::default();

    run_frame(
        &mut session,
        [press(Button::Primary, 55.0, 45.0)],
        DVec2::new(55.0, 45.0),
        &mut surface,
        &cfg,
    );
    // no move event between frames; position still tracks the pointer
    for (i, x) in [80.0, 120.0, 160.0].into_iter().enumerate() {
        run_frame(&mut session, NO_EVENTS, DVec2::new(x, 60.0), &mut surface, &cfg);
        assert_eq!(session.charges.get(0).map(|c| c.pos), Some(DVec2::new(x, 60.0)), "frame {i}");
    }
    run_frame(
        &mut session,
        [InputEvent::ButtonRelease {
            button: Button::Primary,
        }],
        DVec2::new(200.0, 200.0),
        &mut surface,
        &cfg,
    );
    assert_eq!(session.charges.get(0).map(|c| c.pos), Some(DVec2::new(160.0, 60.0)));
    assert_eq!(session.charges.len(), 1);
    assert_eq!(surface.presents, 5);
}

#[test]
fn clear_during_drag_is_harmless() {
    let cfg = small_cfg();
    let mut session = Session::new(cfg.interaction).with_charges(vec![Charge::new(50.0, 50.0, 1.0)]);
    let mut surface = CountingSurface::default();
    let report = run_frame(
        &mut session,
        [press(Button::Primary, 50.0, 50.0), InputEvent::KeyPress(Key::Clear)],
        DVec2::new(70.0, 70.0),
        &mut surface,
        &cfg,
    );
    assert_eq!(report.hud.charge_count, 0);
    assert_eq!(session.interaction.dragged, None);
    // a fresh press adds a charge instead of reviving the old drag
    run_frame(&mut session, [press(Button::Primary, 70.0, 70.0)], DVec2::new(90.0, 90.0), &mut surface, &cfg);
    assert_eq!(session.charges.get(0), Some(&Charge::new(70.0, 70.0, 1.0)));
}

#[test]
fn events_apply_in_order_before_sampling() {
    let cfg = small_cfg();
    let mut session = Session::new(cfg.interaction);
    let mut surface = CountingSurface::default();
    let report = run_frame(
        &mut session,
        [
            press(Button::Primary, 100.0, 100.0),
            InputEvent::KeyPress(Key::Decrement),
            InputEvent::KeyPress(Key::Decrement),
            press(Button::Primary, 300.0, 100.0),
            press(Button::Secondary, 105.0, 100.0),
        ],
        DVec2::ZERO,
        &mut surface,
        &cfg,
    );
    assert_eq!(report.hud.charge_count, 1);
    assert_eq!(report.hud.active_sign, -1);
    assert_eq!(session.charges.get(0), Some(&Charge::new(300.0, 100.0, -1.0)));
    assert!(report.max_magnitude > 0.0);
    assert_eq!(surface.circles, 1);
}

#[test]
fn quit_is_reported_to_the_driver() {
    let cfg = small_cfg();
    let mut session = Session::new(cfg.interaction);
    let mut surface = CountingSurface::default();
    let report = run_frame(&mut session, [InputEvent::Quit], DVec2::ZERO, &mut surface, &cfg);
    assert!(report.quit_requested);
}
