use phasor_map::graphics::{CANVAS_HEIGHT, CANVAS_WIDTH};
use phasor_map::math::{resolve_quadrant, Quadrant};
use phasor_map::phasor::{PhasorProps, CIRCLE_PADDING};
use phasor_map::phasor_set::{MAX_PHASORS, MIN_PHASORS};
use phasor_map::sketch::{PhasorSketch, PHASOR_ENV};
use phasor_map::state::ACTIVE_FRAME_RATE;
use phasor_map::{Canvas, Color, Phasor, PhasorConfig, PhasorError, PhasorSet};
use std::f64::consts::FRAC_PI_2;

fn single(phase: f64) -> Phasor {
    let config = PhasorConfig::new("Voltage", 75.0, 3.14 / 30.0, phase, Color::WHITE);
    Phasor::new(PhasorProps::from_config(PHASOR_ENV, &config, true))
}

#[test]
fn starting_phasor_points_right() {
    let p = single(0.0);
    let angle = p.angle_at(0);
    assert_eq!(angle, 0.0);
    assert_eq!(resolve_quadrant(angle), (Quadrant::First, 0.0));

    let [cx, cy] = p.rect().circle.center;
    let [x, y] = p.tip(angle);
    assert!((x - (cx + 75.0)).abs() < 1e-9);
    assert!((y - cy).abs() < 1e-9);
}

#[test]
fn lagging_phasor_points_down() {
    let p = single(-FRAC_PI_2);
    let (quadrant, normalized) = resolve_quadrant(p.angle_at(0));
    // -π/2 wraps to 3π/2, which closes the third quadrant; reading it as the
    // start of the fourth puts the tip in the same place
    assert_eq!(quadrant, Quadrant::Third);
    assert!((normalized - FRAC_PI_2).abs() < 1e-9);

    let [cx, cy] = p.rect().circle.center;
    let [x, y] = p.tip(p.angle_at(0));
    assert!((x - cx).abs() < 1e-9);
    assert!((y - (cy + 75.0)).abs() < 1e-9);
}

#[test]
fn layout_ignores_frequency_and_phase() {
    let base = single(0.0);
    for &(frequency, phase) in &[(0.0, 0.0), (0.9, -6.0), (0.25, 12.0)] {
        let config = PhasorConfig::new("Voltage", 75.0, frequency, phase, Color::WHITE);
        let p = Phasor::new(PhasorProps::from_config(PHASOR_ENV, &config, true));
        assert_eq!(p.rect(), base.rect());
        assert_eq!(p.rect().trace_start, p.rect().circle.w + p.rect().l + CIRCLE_PADDING);
    }
}

#[test]
fn paused_sketch_redraws_identically() {
    let mut sketch = PhasorSketch::new(PhasorSet::default().as_slice(), false, ACTIVE_FRAME_RATE);
    let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    for _ in 0..37 {
        sketch.tick(&mut canvas);
    }
    let playing = canvas.clone();

    sketch.pause(&mut canvas);
    let first = canvas.clone();
    sketch.draw(&mut canvas);
    assert_eq!(canvas, first);
    assert_ne!(first, playing);

    sketch.play();
    sketch.tick(&mut canvas);
    assert_eq!(sketch.animation().frame_count(), 38);
}

#[test]
fn set_size_is_bounded() {
    let mut set = PhasorSet::default();
    while set.len() < MAX_PHASORS {
        set.add().unwrap();
    }
    assert_eq!(set.add().unwrap_err(), PhasorError::SetFull { max: MAX_PHASORS });
    assert_eq!(set.len(), MAX_PHASORS);

    let names: Vec<String> = set.iter().map(|p| p.name.clone()).collect();
    for name in &names[1..] {
        set.remove(name).unwrap();
    }
    assert_eq!(set.len(), MIN_PHASORS);
    assert_eq!(set.remove(&names[0]), Err(PhasorError::LastPhasor));
    assert_eq!(set.len(), MIN_PHASORS);
}

#[test]
fn shared_chrome_drawn_once() {
    let sketch = PhasorSketch::new(PhasorSet::default().as_slice(), true, ACTIVE_FRAME_RATE);
    let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    sketch.draw(&mut canvas);

    let ticks = canvas.labels().iter().filter(|l| l.text == "π/2").count();
    assert_eq!(ticks, 1);
    let equations: Vec<&str> = canvas
        .labels()
        .iter()
        .filter(|l| l.text.contains(" Sin("))
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(
        equations,
        [
            "Voltage = 75 Sin(0.66 t + 0 π)",
            "Inductor Current = 75 Sin(0.66 t - 0.5 π)",
            "Capacitor Current = 75 Sin(0.66 t + 0.5 π)",
        ]
    );
}

#[test]
fn huge_amplitude_draws_without_panicking() {
    let config: PhasorConfig = "V:1e18:0.1:0".parse().unwrap();
    let sketch = PhasorSketch::new(&[config], true, ACTIVE_FRAME_RATE);
    let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    assert!(sketch.setup(Some(&mut canvas)));
    sketch.draw(&mut canvas);
    assert!(canvas.labels().iter().any(|l| l.text.starts_with("V = ")));
}
