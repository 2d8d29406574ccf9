//! Scene descriptions
//!
//! A scene is a buffer size plus an ordered list of drawing commands, stored
//! as JSON. Commands map one-to-one onto rasterizer calls and are replayed
//! in order, so state changes (colours, modes, clip) affect what follows.

use crate::config::RasterConfig;
use crate::error::RasterResult;
use crate::math::{Colour4, Vec2, Vertex};
use crate::raster::{BlendMode, Circle, ClipRect, FillMode, GeometryMode, Rasterizer};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Clear {
        colour: Colour4,
    },
    Foreground {
        colour: Colour4,
    },
    Background {
        colour: Colour4,
    },
    GeometryMode {
        mode: GeometryMode,
    },
    FillMode {
        mode: FillMode,
    },
    BlendMode {
        mode: BlendMode,
    },
    Clip {
        rect: ClipRect,
    },
    ResetClip,
    Point {
        at: Vec2,
        #[serde(default = "one")]
        size: u32,
    },
    Line {
        from: Vertex,
        to: Vertex,
        #[serde(default = "one")]
        thickness: u32,
    },
    /// Outline or fill depending on the fill mode in effect
    Polygon {
        vertices: Vec<Vertex>,
    },
    Circle {
        circle: Circle,
        #[serde(default)]
        filled: bool,
    },
}

impl Command {
    pub fn apply(&self, r: &mut Rasterizer) {
        match self {
            Self::Clear { colour } => r.clear(*colour),
            Self::Foreground { colour } => r.set_foreground_colour(*colour),
            Self::Background { colour } => r.set_background_colour(*colour),
            Self::GeometryMode { mode } => r.set_geometry_mode(*mode),
            Self::FillMode { mode } => r.set_fill_mode(*mode),
            Self::BlendMode { mode } => r.set_blend_mode(*mode),
            Self::Clip { rect } => r.set_clip_rectangle(rect.left, rect.right, rect.bottom, rect.top),
            Self::ResetClip => r.reset_clip_rectangle(),
            Self::Point { at, size } => r.draw_point(*at, *size),
            Self::Line {
                from,
                to,
                thickness,
            } => r.draw_line(from, to, *thickness),
            Self::Polygon { vertices } => r.draw_polygon(vertices),
            Self::Circle { circle, filled } => r.draw_circle(circle, *filled),
        }
    }
}

/// A buffer size and the commands that draw into it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub config: Option<RasterConfig>,
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl Scene {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            config: None,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn with(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Replay every command into an existing rasterizer
    pub fn apply(&self, r: &mut Rasterizer) {
        debug!("applying scene '{}' ({} commands)", self.name, self.commands.len());
        for command in &self.commands {
            command.apply(r);
        }
    }

    /// Build a rasterizer of the scene's size and draw the scene into it
    pub fn render(&self) -> RasterResult<Rasterizer> {
        let config = self.config.unwrap_or_default();
        let mut r = Rasterizer::with_config(self.width, self.height, config)?;
        self.apply(&mut r);
        Ok(r)
    }

    /// Save scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> RasterResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load scene from a JSON file
    pub fn load(path: impl AsRef<Path>) -> RasterResult<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Built-in scene touching every primitive and mode
    pub fn demo(width: u32, height: u32) -> Self {
        let w = width as f32;
        let h = height as f32;
        let (cx, cy) = (w * 0.5, h * 0.5);

        let mut scene = Self::new("demo", width, height)
            .with(Command::Clear {
                colour: Colour4::rgb(0.1, 0.1, 0.15),
            });

        // Star of flat lines from the centre, every octant
        for i in 0..16 {
            let angle = i as f32 * std::f32::consts::TAU / 16.0;
            let reach = h * 0.2;
            scene.push(Command::Line {
                from: Vertex::at(cx, cy, Colour4::WHITE),
                to: Vertex::at(
                    cx + angle.cos() * reach,
                    cy + angle.sin() * reach,
                    Colour4::WHITE,
                ),
                thickness: 1 + (i % 3) as u32,
            });
        }

        // Outline, flat and interpolated triangles across the top
        let tri = |ox: f32, colours: [Colour4; 3]| {
            vec![
                Vertex::at(ox, h * 0.05, colours[0]),
                Vertex::at(ox + w * 0.25, h * 0.05, colours[1]),
                Vertex::at(ox + w * 0.125, h * 0.3, colours[2]),
            ]
        };
        let rgb = [Colour4::RED, Colour4::GREEN, Colour4::BLUE];
        scene.push(Command::Polygon {
            vertices: tri(w * 0.05, rgb),
        });
        scene.push(Command::FillMode {
            mode: FillMode::FlatFilled,
        });
        scene.push(Command::Polygon {
            vertices: tri(w * 0.375, rgb),
        });
        scene.push(Command::FillMode {
            mode: FillMode::InterpolatedFilled,
        });
        scene.push(Command::Polygon {
            vertices: tri(w * 0.7, rgb),
        });

        // Translucent quad over the lower half
        scene.push(Command::BlendMode {
            mode: BlendMode::AlphaBlend,
        });
        scene.push(Command::FillMode {
            mode: FillMode::FlatFilled,
        });
        let glass = Colour4::new(0.2, 0.6, 1.0, 0.4);
        scene.push(Command::Polygon {
            vertices: vec![
                Vertex::at(w * 0.1, h * 0.6, glass),
                Vertex::at(w * 0.9, h * 0.6, glass),
                Vertex::at(w * 0.9, h * 0.95, glass),
                Vertex::at(w * 0.1, h * 0.95, glass),
            ],
        });
        scene.push(Command::BlendMode {
            mode: BlendMode::None,
        });

        // Circles, one clipped
        scene.push(Command::Circle {
            circle: Circle::new(Vec2::new(w * 0.25, h * 0.78), h * 0.1, Colour4::rgb(1.0, 0.8, 0.0)),
            filled: true,
        });
        scene.push(Command::Clip {
            rect: ClipRect::new(w * 0.5, w, 0.0, h),
        });
        scene.push(Command::Circle {
            circle: Circle::new(Vec2::new(w * 0.5, h * 0.78), h * 0.1, Colour4::rgb(1.0, 0.3, 0.6)),
            filled: false,
        });
        scene.push(Command::ResetClip);

        scene.push(Command::Foreground {
            colour: Colour4::WHITE,
        });
        scene.push(Command::Point {
            at: Vec2::new(w * 0.75, h * 0.78),
            size: 5,
        });

        scene
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("untitled", crate::display::DEFAULT_WIDTH, crate::display::DEFAULT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_json_shape() {
        let json = r#"[
            {"op": "clear", "colour": {"r": 0.0, "g": 0.0, "b": 0.0}},
            {"op": "fill_mode", "mode": "interpolated_filled"},
            {"op": "point", "at": {"x": 2.0, "y": 3.0}},
            {"op": "line",
             "from": {"position": {"x": 1.0, "y": 1.0}, "colour": {"r": 1.0, "g": 0.0, "b": 0.0}},
             "to": {"position": {"x": 5.0, "y": 1.0}, "colour": {"r": 0.0, "g": 0.0, "b": 1.0}}},
            {"op": "reset_clip"}
        ]"#;
        let commands: Vec<Command> = serde_json::from_str(json).unwrap();
        assert_eq!(commands.len(), 5);
        assert_eq!(
            commands[1],
            Command::FillMode {
                mode: FillMode::InterpolatedFilled
            }
        );
        assert_eq!(
            commands[2],
            Command::Point {
                at: Vec2::new(2.0, 3.0),
                size: 1
            }
        );
        assert!(matches!(commands[3], Command::Line { thickness: 1, .. }));
    }

    #[test]
    fn test_render_replays_in_order() {
        let scene = Scene::new("t", 8, 8)
            .with(Command::Clear {
                colour: Colour4::BLUE,
            })
            .with(Command::Foreground {
                colour: Colour4::RED,
            })
            .with(Command::Point {
                at: Vec2::new(3.0, 3.0),
                size: 1,
            });
        let r = scene.render().unwrap();
        assert_eq!(r.pixel(3, 3), Some(Colour4::RED));
        assert_eq!(r.pixel(4, 4), Some(Colour4::BLUE));
        assert_eq!(r.background(), Colour4::BLUE);
    }

    #[test]
    fn test_demo_survives_json() {
        let scene = Scene::demo(64, 48);
        let json = serde_json::to_string(&scene).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back.commands, scene.commands);

        let r = back.render().unwrap();
        assert_eq!((r.width(), r.height()), (64, 48));
        assert_eq!(r.clip_rectangle(), ClipRect::full(64, 48));
    }
}
