//! Draw primitives and a recording canvas

/// Straight RGBA, components in 0..1
pub type Rgba = [f32; 4];

/// Minimal 2D surface the scene is drawn onto
pub trait Canvas {
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Rgba);
    /// Text centered on `(x, y)`
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgba);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear,
    FillRect { x: f32, y: f32, w: f32, h: f32, color: Rgba },
    StrokeRect { x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Rgba },
    Text { text: String, x: f32, y: f32, size: f32, color: Rgba },
}

/// Canvas that records every call, for headless hosts and tests
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for DrawList {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCmd::Clear);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.commands.push(DrawCmd::FillRect { x, y, w, h, color });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Rgba) {
        self.commands.push(DrawCmd::StrokeRect {
            x,
            y,
            w,
            h,
            line_width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgba) {
        self.commands.push(DrawCmd::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }
}
