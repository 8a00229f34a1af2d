use crate::colour::Colour;
use crate::error::ConfigurationError;
use crate::surface::{Rect, Surface};

/// How a button outline is drawn. The default draws a 5px magenta border,
/// `border_colour: None` draws no border at all.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderStyle {
    pub border_colour: Option<Colour>,
    pub border_width: u32,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            border_colour: Some(Colour::MAGENTA),
            border_width: 5,
        }
    }
}

impl BorderStyle {
    pub const fn none() -> Self {
        Self {
            border_colour: None,
            border_width: 5,
        }
    }
}

/// A rectangular click target. Geometry is fixed once constructed.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct Button {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Button {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self, ConfigurationError> {
        if width < 0 || height < 0 {
            return Err(ConfigurationError::NegativeDimensions { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width as u32, self.height as u32)
    }

    /// Hit-test with the right and bottom edge excluded.
    pub fn inside(&self, x: i32, y: i32) -> bool {
        self.rect().contains(x, y)
    }

    /// Fills the button with `colour` if given, then draws the border described by `border`.
    pub fn render(&self, surface: &mut dyn Surface, colour: Option<Colour>, border: BorderStyle) {
        if let Some(colour) = colour {
            surface.fill_rect(self.rect(), colour);
        }
        if let Some(border_colour) = border.border_colour {
            surface.draw_rect(self.rect(), border_colour, border.border_width);
        }
    }
}
