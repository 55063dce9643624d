//! Terminal view of the garden, drawn with ratatui's canvas widget.

use garden_core::{Position, RunConfig};
use garden_world::{Canvas, GardenStats, Rgb};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    symbols::Marker,
    text::Line as TextLine,
    widgets::{
        canvas::{self, Circle, Context, Line, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

/// A primitive recorded from the garden, in canvas coordinates (y up)
#[derive(Debug, Clone, PartialEq)]
enum Shape {
    Disc {
        center: (f64, f64),
        radius: f64,
        color: Color,
    },
    Path {
        points: Vec<(f64, f64)>,
        closed: bool,
        color: Color,
    },
}

/// Collects what the garden draws so it can be replayed inside a ratatui
/// canvas painter.
pub struct ShapeCanvas {
    width: f32,
    height: f32,
    shapes: Vec<Shape>,
}

impl ShapeCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    #[cfg(test)]
    fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Garden rows grow downwards, canvas rows grow upwards
    fn point(&self, position: Position) -> (f64, f64) {
        (position.x as f64, (self.height - position.y) as f64)
    }

    fn paint(&self, ctx: &mut Context<'_>) {
        for shape in &self.shapes {
            match shape {
                Shape::Disc {
                    center,
                    radius,
                    color,
                } => {
                    ctx.draw(&Circle {
                        x: center.0,
                        y: center.1,
                        radius: *radius,
                        color: *color,
                    });
                    ctx.draw(&Points {
                        coords: std::slice::from_ref(center),
                        color: *color,
                    });
                }
                Shape::Path {
                    points,
                    closed,
                    color,
                } => {
                    for pair in points.windows(2) {
                        ctx.draw(&Line::new(pair[0].0, pair[0].1, pair[1].0, pair[1].1, *color));
                    }
                    if let (true, Some(first), Some(last)) = (*closed, points.first(), points.last()) {
                        ctx.draw(&Line::new(last.0, last.1, first.0, first.1, *color));
                    }
                }
            }
        }
    }

    /// Canvas widget covering the whole arena
    pub fn widget(&self) -> canvas::Canvas<'_, impl Fn(&mut Context<'_>) + '_> {
        canvas::Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, self.width as f64])
            .y_bounds([0.0, self.height as f64])
            .paint(move |ctx| self.paint(ctx))
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

impl Canvas for ShapeCanvas {
    fn fill_circle(&mut self, center: Position, radius: f32, rgb: Rgb) {
        let center = self.point(center);
        self.shapes.push(Shape::Disc {
            center,
            radius: radius as f64,
            color: color(rgb),
        });
    }

    fn fill_polygon(&mut self, points: &[Position], rgb: Rgb) {
        let points = points.iter().map(|p| self.point(*p)).collect();
        self.shapes.push(Shape::Path {
            points,
            closed: true,
            color: color(rgb),
        });
    }

    fn stroke_polyline(&mut self, points: &[Position], rgb: Rgb) {
        let points = points.iter().map(|p| self.point(*p)).collect();
        self.shapes.push(Shape::Path {
            points,
            closed: false,
            color: color(rgb),
        });
    }
}

/// Lay out one frame: the garden panel sized from the run configuration
/// (clipped to the terminal) above a status bar.
pub fn draw_frame(frame: &mut Frame<'_>, shapes: &ShapeCanvas, stats: &GardenStats, config: &RunConfig) {
    let area = frame.area();
    let panel = Rect::new(
        area.x,
        area.y,
        (config.canvas_columns as u16).min(area.width),
        (config.canvas_rows as u16).min(area.height),
    );
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(panel.height.saturating_sub(3)), Constraint::Length(3)])
        .split(panel);

    let garden = shapes
        .widget()
        .block(Block::default().borders(Borders::ALL).title(" garden "));
    frame.render_widget(garden, chunks[0]);

    let status = TextLine::from(format!(
        "tick {} | t={:.3} | live {} | births {} | deaths {} | dropped {}",
        stats.tick, stats.elapsed, stats.live, stats.births, stats.deaths, stats.seeds_dropped
    ));
    frame.render_widget(
        Paragraph::new(status).block(Block::default().borders(Borders::ALL).title(" stats ")),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, buffer::Buffer, widgets::Widget, Terminal};

    const WHITE: Rgb = Rgb::new(255, 255, 255);

    fn painted(buffer: &Buffer) -> usize {
        buffer.content.iter().filter(|cell| cell.symbol() != " ").count()
    }

    #[test]
    fn test_records_in_canvas_coordinates() {
        let mut canvas = ShapeCanvas::new(100.0, 50.0);
        canvas.fill_circle(Position::new(10.0, 5.0), 2.0, WHITE);
        assert_eq!(
            canvas.shapes(),
            &[Shape::Disc {
                center: (10.0, 45.0),
                radius: 2.0,
                color: Color::Rgb(255, 255, 255),
            }]
        );
    }

    #[test]
    fn test_polygon_is_closed_and_polyline_is_not() {
        let mut canvas = ShapeCanvas::new(10.0, 10.0);
        let triangle = [Position::new(0.0, 0.0), Position::new(4.0, 0.0), Position::new(0.0, 4.0)];
        canvas.fill_polygon(&triangle, WHITE);
        canvas.stroke_polyline(&triangle, WHITE);
        assert!(matches!(canvas.shapes()[0], Shape::Path { closed: true, .. }));
        assert!(matches!(canvas.shapes()[1], Shape::Path { closed: false, .. }));
    }

    #[test]
    fn test_shapes_show_up_in_buffer() {
        let mut canvas = ShapeCanvas::new(100.0, 50.0);
        canvas.fill_circle(Position::new(50.0, 25.0), 10.0, WHITE);
        let area = Rect::new(0, 0, 20, 10);
        let mut buffer = Buffer::empty(area);
        canvas.widget().render(area, &mut buffer);
        assert!(painted(&buffer) > 0);
    }

    #[test]
    fn test_frame_has_status_line() {
        let config = RunConfig {
            canvas_columns: 60,
            canvas_rows: 20,
            ..Default::default()
        };
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let shapes = ShapeCanvas::new(config.garden.width, config.garden.height);
        let stats = GardenStats {
            tick: 7,
            elapsed: 0.007,
            live: 3,
            pending_add: 0,
            pending_destroy: 0,
            births: 4,
            deaths: 1,
            seeds_dropped: 0,
            mean_root_radius: 0.0,
        };
        terminal
            .draw(|frame| draw_frame(frame, &shapes, &stats, &config))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("tick 7"));
        assert!(text.contains("live 3"));
    }
}
