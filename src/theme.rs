#![allow(dead_code)]
use crossterm::style::Color;
use serde::Serialize;

/// An sRGB colour used by the document layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS hex notation, e.g. `#800000`.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

// Report palette
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const MAROON: Rgb = Rgb(128, 0, 0);
pub const PASSED_FILL: Rgb = Rgb(200, 255, 200);
pub const FAILED_FILL: Rgb = Rgb(255, 200, 200);
pub const ERROR_FILL: Rgb = Rgb(255, 255, 150);

// Catppuccin Mocha palette for the console summary
pub const TEXT: Color = Color::Rgb { r: 205, g: 214, b: 244 };
pub const SUBTEXT0: Color = Color::Rgb { r: 166, g: 173, b: 200 };
pub const OVERLAY0: Color = Color::Rgb { r: 108, g: 112, b: 134 };
pub const RED: Color = Color::Rgb { r: 243, g: 139, b: 168 };
pub const GREEN: Color = Color::Rgb { r: 166, g: 227, b: 161 };
pub const YELLOW: Color = Color::Rgb { r: 249, g: 226, b: 175 };
pub const BLUE: Color = Color::Rgb { r: 137, g: 180, b: 250 };
pub const MAUVE: Color = Color::Rgb { r: 203, g: 166, b: 247 };
