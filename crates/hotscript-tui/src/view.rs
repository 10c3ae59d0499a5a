//! Frame rendering
//!
//! The virtual window maps onto a Braille canvas, so one terminal cell holds
//! a 2x4 block of dots. Script coordinates have y growing downwards; the
//! canvas has it growing upwards, so y is flipped on the way in.

use hotscript_scripting_host::{CircleShape, Vector2};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

/// Everything drawn in one frame
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub title: &'a str,
    /// Virtual window size in script coordinates
    pub size: Vector2<u32>,
    pub shapes: &'a [CircleShape],
    /// Latest diagnostic, shown under the canvas
    pub status: &'a str,
}

pub fn render_scene(frame: &mut Frame, scene: &Scene) {
    let [canvas_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    let width = f64::from(scene.size.x.max(1));
    let height = f64::from(scene.size.y.max(1));

    let canvas = Canvas::default()
        .block(Block::bordered().title(scene.title))
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for shape in scene.shapes {
                let (x, y) = canvas_center(shape, height);
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: f64::from(shape.radius()),
                    color: Color::Yellow,
                });
            }
        });
    frame.render_widget(canvas, canvas_area);

    let status = Paragraph::new(scene.status).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, status_area);
}

/// Centre of `shape` in canvas coordinates for a window `height` units tall
pub fn canvas_center(shape: &CircleShape, height: f64) -> (f64, f64) {
    let center = shape.center();
    (f64::from(center.x), height - f64::from(center.y))
}
