//! The phasor model: per-phasor configuration, its derived layout, and the
//! drawing of one rotating vector with its sinusoid trace.

use crate::color::Color;
use crate::error::PhasorError;
use crate::graphics::{Canvas, Stroke, TextAnchor, TextLabel};
use crate::math::{resolve_quadrant, tip_offset};
use crate::state::TIME_BASE_FPS;
use std::f64::consts::{PI, TAU};
use std::str::FromStr;

pub const CIRCLE_PADDING: f64 = 20.0;
pub const DEFAULT_AMPLITUDE: f64 = 75.0;
pub const DEFAULT_FREQUENCY: f64 = 0.1047197551;
/// Horizontal pixels per sinusoid sample
pub const SINUSOID_X_TIMES: f64 = 2.0;
pub const OUTLINE_COLOR: Color = Color::rgb8(0x94, 0xa3, 0xb8);

/// Size of the area a phasor lays itself out in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Env {
    pub width: f64,
    pub height: f64,
}

/// The host-facing record for one phasor
#[derive(Debug, Clone, PartialEq)]
pub struct PhasorConfig {
    pub name: String,
    /// Radius of the rotating vector in pixels
    pub amplitude: f64,
    /// Cycles per time unit
    pub frequency: f64,
    /// Initial angle in radians
    pub phase: f64,
    pub color: Color,
}

impl PhasorConfig {
    pub fn new(
        name: impl Into<String>,
        amplitude: f64,
        frequency: f64,
        phase: f64,
        color: Color,
    ) -> Self {
        PhasorConfig {
            name: name.into(),
            amplitude,
            frequency,
            phase,
            color,
        }
    }
}

impl FromStr for PhasorConfig {
    type Err = PhasorError;

    /// Parses `name:amplitude:frequency:phase[:color]`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        if !(4..=5).contains(&parts.len()) {
            return Err(PhasorError::invalid_spec(
                s,
                "expected name:amplitude:frequency:phase[:color]",
            ));
        }
        if parts[0].is_empty() {
            return Err(PhasorError::invalid_spec(s, "name must not be empty"));
        }

        let number = |field: &str, value: &str| -> Result<f64, PhasorError> {
            value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    PhasorError::invalid_spec(s, format!("{field} '{value}' is not a number"))
                })
        };
        let color = match parts.get(4) {
            Some(hex) => hex.parse()?,
            None => Color::WHITE,
        };

        Ok(PhasorConfig {
            name: parts[0].to_string(),
            amplitude: number("amplitude", parts[1])?,
            frequency: number("frequency", parts[2])?,
            phase: number("phase", parts[3])?,
            color,
        })
    }
}

/// Stroke colors for a phasor; no circle color hides the chrome and construction lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasorColors {
    pub circle: Option<Color>,
    pub phasor: Color,
}

/// Everything a phasor needs to lay itself out and draw
#[derive(Debug, Clone, PartialEq)]
pub struct PhasorProps {
    pub name: String,
    pub top: f64,
    pub left: f64,
    pub height: f64,
    pub width: f64,
    pub circle_padding: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub sinusoid_x_times: f64,
    pub colors: PhasorColors,
    pub show_sinusoid: bool,
    pub show_labels: bool,
    pub show_outline: bool,
}

impl PhasorProps {
    /// Default props: a box just tall enough for the circle and its padding
    pub fn new(env: Env) -> Self {
        PhasorProps {
            name: String::new(),
            top: 0.0,
            left: 0.0,
            height: 2.0 * DEFAULT_AMPLITUDE + 2.0 * CIRCLE_PADDING,
            width: env.width,
            circle_padding: CIRCLE_PADDING,
            amplitude: DEFAULT_AMPLITUDE,
            frequency: DEFAULT_FREQUENCY,
            phase: 0.0,
            sinusoid_x_times: SINUSOID_X_TIMES,
            colors: PhasorColors {
                circle: Some(OUTLINE_COLOR),
                phasor: Color::WHITE,
            },
            show_sinusoid: true,
            show_labels: true,
            show_outline: true,
        }
    }

    /// Props for a host record drawn across the whole environment
    pub fn from_config(env: Env, config: &PhasorConfig, show_outline: bool) -> Self {
        PhasorProps {
            name: config.name.clone(),
            height: env.height,
            width: env.width,
            amplitude: config.amplitude,
            frequency: config.frequency,
            phase: config.phase,
            colors: PhasorColors {
                circle: Some(OUTLINE_COLOR),
                phasor: config.color,
            },
            show_outline,
            ..PhasorProps::new(env)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleRect {
    pub w: f64,
    pub h: f64,
    pub r: f64,
    pub d: f64,
    pub center: [f64; 2],
}

/// Pixel geometry derived from a phasor's props
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRect {
    pub t: f64,
    pub b: f64,
    pub l: f64,
    pub r: f64,
    pub w: f64,
    pub h: f64,
    pub center: [f64; 2],
    pub circle: CircleRect,
    /// Column where the sinusoid trace begins
    pub trace_start: f64,
}

impl LayoutRect {
    pub fn from_props(props: &PhasorProps) -> Self {
        let circle = CircleRect {
            w: props.height,
            h: props.height,
            r: props.amplitude,
            d: props.amplitude * 2.0,
            center: [
                props.height / 2.0 + props.left,
                props.height / 2.0 + props.top,
            ],
        };
        LayoutRect {
            t: props.top,
            b: props.height + props.top,
            l: props.left,
            r: props.width + props.left,
            w: props.width,
            h: props.height,
            center: [
                props.width / 2.0 + props.left,
                props.height / 2.0 + props.top,
            ],
            circle,
            trace_start: circle.w + props.left + props.circle_padding,
        }
    }
}

/// A single rotating vector with its layout
#[derive(Debug, Clone, PartialEq)]
pub struct Phasor {
    props: PhasorProps,
    rect: LayoutRect,
}

impl Phasor {
    pub fn new(props: PhasorProps) -> Self {
        let rect = LayoutRect::from_props(&props);
        Phasor { props, rect }
    }

    pub fn props(&self) -> &PhasorProps {
        &self.props
    }

    pub fn rect(&self) -> &LayoutRect {
        &self.rect
    }

    /// Replaces every prop at once and re-derives the layout
    pub fn change_props(&mut self, props: PhasorProps) {
        self.rect = LayoutRect::from_props(&props);
        self.props = props;
    }

    /// Angular frequency in radians per time unit
    pub fn omega(&self) -> f64 {
        TAU * self.props.frequency
    }

    /// Rotation angle at a given frame, before wrapping
    pub fn angle_at(&self, frame_count: u64) -> f64 {
        let time = frame_count as f64 / TIME_BASE_FPS;
        self.omega() * time + self.props.phase
    }

    /// Screen position of the vector tip for an angle
    pub fn tip(&self, angle: f64) -> [f64; 2] {
        let (quadrant, normalized) = resolve_quadrant(angle);
        let [dx, dy] = tip_offset(self.rect.circle.r, quadrant, normalized);
        let [cx, cy] = self.rect.circle.center;
        [cx + dx, cy + dy]
    }

    /// Vertices of the sinusoid trace, left to right
    pub fn sinusoid_points(&self, angle: f64) -> Vec<[f64; 2]> {
        let x_spacing = 1.0;
        let dx = TAU * x_spacing * self.props.frequency;
        let [_, cy] = self.rect.circle.center;

        let mut x = 0.0;
        let steps = self.rect.w.max(0.0) as usize;
        let mut points = Vec::with_capacity(steps);
        for i in 0..steps {
            let pos_x = self.rect.trace_start + i as f64 * x_spacing * self.props.sinusoid_x_times;
            let pos_y = cy + self.rect.circle.r * (-angle + x * self.props.frequency).sin();
            points.push([pos_x, pos_y]);
            x += dx;
        }
        points
    }

    /// Equation text shown under the diagram
    pub fn equation(&self) -> String {
        let phase_turns = (self.props.phase / PI * 100.0).round() / 100.0;
        format!(
            "{} = {} Sin({:.2} t {} {} π)",
            self.props.name,
            self.props.amplitude,
            self.omega(),
            if self.props.phase >= 0.0 { "+" } else { "-" },
            phase_turns.abs(),
        )
    }

    /// Draws this phasor's state at `frame_count`
    pub fn draw(&self, canvas: &mut Canvas, frame_count: u64) {
        let angle = self.angle_at(frame_count);

        self.draw_outline(canvas);
        self.draw_phasor_line(canvas, angle);
        if self.props.show_sinusoid {
            self.draw_sinusoid(canvas, angle);
        }
    }

    fn draw_outline(&self, canvas: &mut Canvas) {
        if !self.props.show_outline {
            return;
        }
        let Some(circle_color) = self.props.colors.circle else {
            return;
        };
        let stroke = Stroke::new(circle_color, 0.5);
        let rect = &self.rect;
        let [cx, cy] = rect.circle.center;
        let r = rect.circle.r;

        canvas.draw_rect(
            self.props.left,
            self.props.top,
            self.props.width,
            self.props.height,
            &stroke,
        );
        canvas.draw_circle(cx, cy, rect.circle.d, &stroke);
        canvas.draw_line(cx - r, cy, cx + r, cy, &stroke);
        canvas.draw_line(cx, cy - r, cx, cy + r, &stroke);

        if self.props.show_sinusoid {
            canvas.draw_line(rect.trace_start, rect.t, rect.trace_start, rect.b, &stroke);
            canvas.draw_line(rect.trace_start, cy, rect.w, cy, &stroke);
        }

        if self.props.show_labels {
            let ticks = [
                ("0", cx + r + 10.0, cy),
                ("π/2", cx, cy - r - 10.0),
                ("π", cx - r - 10.0, cy),
                ("3π/2", cx, cy + r + 10.0),
            ];
            for (text, x, y) in ticks {
                canvas.draw_text(TextLabel {
                    x,
                    y,
                    text: text.to_string(),
                    color: circle_color,
                    size: 12.0,
                    anchor: TextAnchor::Center,
                });
            }
        }
    }

    fn draw_phasor_line(&self, canvas: &mut Canvas, angle: f64) {
        let [x, y] = self.tip(angle);
        let [cx, cy] = self.rect.circle.center;

        if let Some(circle_color) = self.props.colors.circle {
            if self.props.show_sinusoid {
                canvas.draw_line(x, y, self.rect.trace_start, y, &Stroke::new(circle_color, 1.0));
            }
            let thin = Stroke::new(circle_color, 0.25);
            canvas.draw_line(x, cy, x, y, &thin);
            canvas.draw_line(cx, y, x, y, &thin);
        }

        canvas.draw_line(cx, cy, x, y, &Stroke::new(self.props.colors.phasor, 1.5));
    }

    fn draw_sinusoid(&self, canvas: &mut Canvas, angle: f64) {
        let points = self.sinusoid_points(angle);
        canvas.draw_polyline(&points, &Stroke::new(self.props.colors.phasor, 1.5));
    }
}
