use std::io::IsTerminal;

use comfy_table::Color as CellColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

impl ColorMode {
  pub fn enabled(self) -> bool {
    match self {
      Self::Always => true,
      Self::Never => false,
      Self::Auto => std::io::stdout().is_terminal(),
    }
  }
}

/// What a piece of console output is, independent of how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  Timestamp,
  Primary,
  Accent,
  Success,
  Label,
  Value,
}

impl Role {
  const fn rgb(self) -> (u8, u8, u8) {
    match self {
      Self::Timestamp | Self::Success => (118, 166, 166),
      Self::Primary => (191, 126, 4),
      Self::Accent => (166, 84, 55),
      Self::Label => (217, 164, 4),
      Self::Value => (242, 211, 56),
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub struct Colors {
  enabled: bool,
}

impl Colors {
  pub const fn new(enabled: bool) -> Self {
    Self { enabled }
  }

  /// Terminal color for `role`; `Reset` when colors are off.
  pub const fn paint(&self, role: Role) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    let (r, g, b) = role.rgb();
    Color::Rgb { r, g, b }
  }

  /// Same as [`Colors::paint`], for table cells.
  pub const fn cell(&self, role: Role) -> CellColor {
    if !self.enabled {
      return CellColor::Reset;
    }
    let (r, g, b) = role.rgb();
    CellColor::Rgb { r, g, b }
  }
}
