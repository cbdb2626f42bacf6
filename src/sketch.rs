//! Frame rendering for a whole phasor set.
//!
//! A sketch captures one snapshot of the host's records. When the set changes
//! the host drops the sketch and builds a new one; nothing in here is patched
//! in place.

use crate::color::Color;
use crate::graphics::{Canvas, TextAnchor, TextLabel};
use crate::phasor::{Env, Phasor, PhasorConfig, PhasorProps};
use crate::state::AnimationState;
use tracing::{debug, info};

pub const BACKGROUND: Color = Color::rgb8(2, 9, 24);
/// Area the phasors lay themselves out in; the equations sit below it
pub const PHASOR_ENV: Env = Env {
    width: 800.0,
    height: 200.0,
};

const EQUATION_SIZE: f64 = 16.0;
const EQUATIONS_PER_COLUMN: usize = 3;

pub struct PhasorSketch {
    phasors: Vec<Phasor>,
    animation: AnimationState,
}

impl PhasorSketch {
    /// Captures the records; only the first phasor draws the shared chrome
    pub fn new(configs: &[PhasorConfig], paused: bool, active_rate: u32) -> Self {
        let phasors = configs
            .iter()
            .enumerate()
            .map(|(index, config)| {
                Phasor::new(PhasorProps::from_config(PHASOR_ENV, config, index == 0))
            })
            .collect::<Vec<_>>();
        debug!(count = phasors.len(), paused, active_rate, "Built sketch");
        PhasorSketch {
            phasors,
            animation: AnimationState::new(paused, active_rate),
        }
    }

    pub fn phasors(&self) -> &[Phasor] {
        &self.phasors
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Prepares the surface; a missing surface makes this a no-op
    ///
    /// A sketch that starts paused draws its first frame here, since no tick
    /// will ever run.
    pub fn setup(&self, surface: Option<&mut Canvas>) -> bool {
        let Some(canvas) = surface else {
            debug!("No drawing surface, skipping setup");
            return false;
        };
        if self.animation.is_paused() {
            self.draw(canvas);
        } else {
            canvas.background(BACKGROUND);
        }
        true
    }

    /// Draws the current frame without advancing time
    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.background(BACKGROUND);
        let frame_count = self.animation.frame_count();

        for (index, phasor) in self.phasors.iter().enumerate() {
            phasor.draw(canvas, frame_count);

            let (x, y) = equation_slot(index);
            canvas.draw_text(TextLabel {
                x,
                y,
                text: phasor.equation(),
                color: Color::WHITE,
                size: EQUATION_SIZE,
                anchor: TextAnchor::TopLeft,
            });
        }
    }

    /// One scheduled frame: draw, then step time forward unless paused
    pub fn tick(&mut self, canvas: &mut Canvas) {
        self.draw(canvas);
        self.animation.advance();
    }

    /// Freezes the animation, leaving its last state drawn
    pub fn pause(&mut self, canvas: &mut Canvas) {
        if self.animation.pause() {
            info!(frame = self.animation.frame_count(), "Paused");
            self.draw(canvas);
        }
    }

    pub fn play(&mut self) {
        if self.animation.play() {
            info!(frame = self.animation.frame_count(), "Playing");
        }
    }

    pub fn set_paused(&mut self, paused: bool, canvas: &mut Canvas) {
        if paused {
            self.pause(canvas);
        } else {
            self.play();
        }
    }

    pub fn frame_rate(&self) -> u32 {
        self.animation.frame_rate()
    }
}

/// Top-left corner of the equation for the phasor at `index`
fn equation_slot(index: usize) -> (f64, f64) {
    let column = index / EQUATIONS_PER_COLUMN;
    let row = index % EQUATIONS_PER_COLUMN;
    let x = if column == 0 { 20.0 } else { 420.0 };
    (x, 215.0 + row as f64 * 30.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use crate::phasor_set::PhasorSet;
    use crate::state::ACTIVE_FRAME_RATE;

    fn canvas() -> Canvas {
        Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    #[test]
    fn test_equation_slots() {
        assert_eq!(equation_slot(0), (20.0, 215.0));
        assert_eq!(equation_slot(2), (20.0, 275.0));
        assert_eq!(equation_slot(3), (420.0, 215.0));
        assert_eq!(equation_slot(5), (420.0, 275.0));
    }

    #[test]
    fn test_only_first_phasor_owns_outline() {
        let sketch = PhasorSketch::new(PhasorSet::default().as_slice(), false, ACTIVE_FRAME_RATE);
        let owners: Vec<bool> = sketch.phasors().iter().map(|p| p.props().show_outline).collect();
        assert_eq!(owners, [true, false, false]);
    }

    #[test]
    fn test_setup_without_surface_is_noop() {
        let sketch = PhasorSketch::new(PhasorSet::default().as_slice(), true, ACTIVE_FRAME_RATE);
        assert!(!sketch.setup(None));
    }

    #[test]
    fn test_paused_setup_draws_once() {
        let sketch = PhasorSketch::new(PhasorSet::default().as_slice(), true, ACTIVE_FRAME_RATE);
        let mut surface = canvas();
        assert!(sketch.setup(Some(&mut surface)));
        // four tick labels plus three equations
        assert_eq!(surface.labels().len(), 7);
        assert_eq!(sketch.frame_rate(), 0);
    }

    #[test]
    fn test_paused_frames_are_identical() {
        let set = PhasorSet::default();
        let mut sketch = PhasorSketch::new(set.as_slice(), false, ACTIVE_FRAME_RATE);
        let mut surface = canvas();
        for _ in 0..10 {
            sketch.tick(&mut surface);
        }
        sketch.pause(&mut surface);
        let frozen = surface.clone();

        sketch.tick(&mut surface);
        assert_eq!(surface, frozen);
        sketch.tick(&mut surface);
        assert_eq!(surface, frozen);
        assert_eq!(sketch.animation().frame_count(), 10);
    }

    #[test]
    fn test_resume_advances_frames() {
        let set = PhasorSet::default();
        let mut sketch = PhasorSketch::new(set.as_slice(), true, ACTIVE_FRAME_RATE);
        let mut surface = canvas();
        sketch.tick(&mut surface);
        assert_eq!(sketch.animation().frame_count(), 0);

        sketch.set_paused(false, &mut surface);
        assert_eq!(sketch.frame_rate(), ACTIVE_FRAME_RATE);
        let mut last = sketch.phasors()[0].angle_at(sketch.animation().frame_count());
        for _ in 0..5 {
            sketch.tick(&mut surface);
            let angle = sketch.phasors()[0].angle_at(sketch.animation().frame_count());
            assert!(angle > last);
            last = angle;
        }
    }
}
