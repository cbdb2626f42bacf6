use crate::color::Color;
use crate::error::PhasorError;
use crate::graphics::{Canvas, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::phasor::PhasorConfig;
use crate::phasor_set::PhasorSet;
use crate::sketch::PhasorSketch;
use crate::state::{FpsCounter, FrameClock};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::f64::consts::{PI, TAU};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const AMPLITUDE_RANGE: (f64, f64) = (0.0, 90.0);
const FREQUENCY_RANGE: (f64, f64) = (0.0, 1.0);
const PHASE_RANGE: (f64, f64) = (-TAU, TAU);
const AMPLITUDE_STEP: f64 = 1.0;
const FREQUENCY_STEP: f64 = 0.01;
const PHASE_STEP: f64 = 0.1 * PI;

/// Colors offered when cycling a phasor's color
const PALETTE: [Color; 6] = [
    Color::rgb8(255, 255, 255),
    Color::rgb8(255, 0, 255),
    Color::rgb8(0, 255, 255),
    Color::rgb8(250, 204, 21),
    Color::rgb8(74, 222, 128),
    Color::rgb8(248, 113, 113),
];

const KEY_HELP: &str = concat!(
    "space pause  a add  x remove  tab select  ↑↓ amplitude  [] frequency  ,. phase\n",
    "n rename  c cycle color  # hex color  d debug  q quit"
);
const INPUT_HELP: &str = "enter apply  esc cancel";

/// Text field currently receiving key presses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Name(String),
    Color(String),
}

/// What the event loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Host UI: owns the phasor records, the selection and the running sketch
pub struct PhasorWidget {
    set: PhasorSet,
    selected: String,
    sketch: PhasorSketch,
    canvas: Canvas,
    clock: FrameClock,
    fps: FpsCounter,
    active_rate: u32,
    /// Enable debug mode
    debug: bool,
    notice: Option<String>,
    input: Option<Input>,
}

impl PhasorWidget {
    pub fn new(set: PhasorSet, paused: bool, active_rate: u32) -> Self {
        let selected = set.as_slice()[0].name.clone();
        let sketch = PhasorSketch::new(set.as_slice(), paused, active_rate);
        let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        sketch.setup(Some(&mut canvas));
        PhasorWidget {
            set,
            selected,
            sketch,
            canvas,
            clock: FrameClock::new(),
            fps: FpsCounter::new(Instant::now()),
            active_rate,
            debug: false,
            notice: None,
            input: None,
        }
    }

    pub fn set(&self) -> &PhasorSet {
        &self.set
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn sketch(&self) -> &PhasorSketch {
        &self.sketch
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn input(&self) -> Option<&Input> {
        self.input.as_ref()
    }

    pub fn is_paused(&self) -> bool {
        self.sketch.animation().is_paused()
    }

    /// Tears down the running sketch and starts a new one from the current records
    fn rebuild(&mut self) {
        let paused = self.is_paused();
        self.sketch = PhasorSketch::new(self.set.as_slice(), paused, self.active_rate);
        self.sketch.setup(Some(&mut self.canvas));
        self.clock.reset();
        info!(count = self.set.len(), paused, "Rebuilt sketch");
    }

    fn reject(&mut self, err: PhasorError) {
        warn!(%err, "Edit rejected");
        self.notice = Some(err.to_string());
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.kind == KeyEventKind::Release {
            return Control::Continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Control::Quit;
        }
        self.notice = None;
        if self.input.is_some() {
            self.handle_input_key(key.code);
            return Control::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => self.toggle_pause(),
            KeyCode::Char('d') | KeyCode::Char('D') => self.debug = !self.debug,
            KeyCode::Char('a') => self.add_phasor(),
            KeyCode::Char('x') | KeyCode::Delete => self.remove_selected(),
            KeyCode::Tab | KeyCode::Right => self.select_offset(1),
            KeyCode::BackTab | KeyCode::Left => self.select_offset(-1),
            KeyCode::Up => self.edit_selected(|c| {
                c.amplitude = step(c.amplitude, AMPLITUDE_STEP, AMPLITUDE_RANGE)
            }),
            KeyCode::Down => self.edit_selected(|c| {
                c.amplitude = step(c.amplitude, -AMPLITUDE_STEP, AMPLITUDE_RANGE)
            }),
            KeyCode::Char(']') => self.edit_selected(|c| {
                c.frequency = step(c.frequency, FREQUENCY_STEP, FREQUENCY_RANGE)
            }),
            KeyCode::Char('[') => self.edit_selected(|c| {
                c.frequency = step(c.frequency, -FREQUENCY_STEP, FREQUENCY_RANGE)
            }),
            KeyCode::Char('.') => {
                self.edit_selected(|c| c.phase = step(c.phase, PHASE_STEP, PHASE_RANGE))
            }
            KeyCode::Char(',') => {
                self.edit_selected(|c| c.phase = step(c.phase, -PHASE_STEP, PHASE_RANGE))
            }
            KeyCode::Char('c') => self.edit_selected(|c| c.color = next_color(c.color)),
            KeyCode::Char('n') => self.input = Some(Input::Name(self.selected.clone())),
            KeyCode::Char('#') => self.input = Some(Input::Color(String::from("#"))),
            _ => {}
        }
        Control::Continue
    }

    /// Feeds a key to the open text field
    fn handle_input_key(&mut self, code: KeyCode) {
        let Some(input) = self.input.as_mut() else {
            return;
        };
        let buffer = match input {
            Input::Name(buffer) | Input::Color(buffer) => buffer,
        };
        match code {
            KeyCode::Char(ch) => buffer.push(ch),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Esc => self.input = None,
            KeyCode::Enter => {
                if let Some(input) = self.input.take() {
                    self.commit_input(input);
                }
            }
            _ => {}
        }
    }

    fn commit_input(&mut self, input: Input) {
        match input {
            Input::Name(buffer) => {
                let name = buffer.trim().to_string();
                if name.is_empty() {
                    self.reject(PhasorError::EmptyName);
                } else if name != self.selected {
                    self.edit_selected(|c| c.name = name);
                }
            }
            Input::Color(buffer) => match Color::from_str(&buffer) {
                Ok(color) => self.edit_selected(|c| c.color = color),
                Err(err) => self.reject(err),
            },
        }
    }

    pub fn toggle_pause(&mut self) {
        let paused = !self.is_paused();
        self.sketch.set_paused(paused, &mut self.canvas);
    }

    pub fn add_phasor(&mut self) {
        match self.set.add() {
            Ok(_) => self.rebuild(),
            Err(err) => self.reject(err),
        }
    }

    pub fn remove_selected(&mut self) {
        let name = self.selected.clone();
        match self.set.remove(&name) {
            Ok(_) => {
                self.selected = self.set.as_slice()[0].name.clone();
                self.rebuild();
            }
            Err(err) => self.reject(err),
        }
    }

    /// Moves the selection by `offset` places, wrapping around
    pub fn select_offset(&mut self, offset: isize) {
        let len = self.set.len() as isize;
        let current = self.set.position(&self.selected).unwrap_or(0) as isize;
        let next = (current + offset).rem_euclid(len) as usize;
        self.selected = self.set.as_slice()[next].name.clone();
    }

    /// Applies an edit to a copy of the selected record and stores it whole
    pub fn edit_selected(&mut self, edit: impl FnOnce(&mut PhasorConfig)) {
        let Some(mut config) = self.set.get(&self.selected).cloned() else {
            return;
        };
        edit(&mut config);
        let name = self.selected.clone();
        self.selected = config.name.clone();
        match self.set.replace(&name, config) {
            Ok(()) => self.rebuild(),
            Err(err) => {
                self.selected = name;
                self.reject(err);
            }
        }
    }

    /// Longest wait before the next frame is due; events are polled meanwhile
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.clock
            .time_until_due(self.sketch.frame_rate(), now)
            .unwrap_or(Duration::from_millis(250))
    }

    /// Draws a frame if one is due; returns whether the canvas changed
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.clock.take_due(self.sketch.frame_rate(), now) {
            return false;
        }
        self.sketch.tick(&mut self.canvas);
        self.fps.record_frame(now);
        true
    }

    /// Text shown under the diagram
    pub fn status_lines(&self) -> Vec<String> {
        let names = self
            .set
            .iter()
            .map(|p| {
                if p.name == self.selected {
                    format!("[{}]", p.name.to_uppercase())
                } else {
                    format!(" {} ", p.name.to_uppercase())
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        let mut lines = vec![format!(
            "{} {}",
            if self.is_paused() { "|| paused " } else { "> playing " },
            names
        )];

        if let Some(config) = self.set.get(&self.selected) {
            lines.push(format!(
                "amplitude {:>3}  frequency {:.2}  phase {:+.1}π  color {}",
                config.amplitude,
                config.frequency,
                config.phase / PI,
                config.color
            ));
        }
        match &self.input {
            Some(Input::Name(buffer)) => lines.push(format!("name: {buffer}_  {INPUT_HELP}")),
            Some(Input::Color(buffer)) => lines.push(format!("color: {buffer}_  {INPUT_HELP}")),
            None => lines.extend(KEY_HELP.lines().map(str::to_string)),
        }
        if let Some(notice) = &self.notice {
            lines.push(format!("! {notice}"));
        }
        if self.debug {
            lines.push(format!(
                "{} {}  frame {}  fps {:.2}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                self.sketch.animation().frame_count(),
                self.fps.fps()
            ));
        }
        lines
    }
}

fn step(value: f64, delta: f64, (min, max): (f64, f64)) -> f64 {
    (value + delta).clamp(min, max)
}

fn next_color(color: Color) -> Color {
    let index = PALETTE.iter().position(|&c| c == color).map_or(0, |i| i + 1);
    PALETTE[index % PALETTE.len()]
}
