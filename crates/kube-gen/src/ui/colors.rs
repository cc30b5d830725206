use std::io::IsTerminal;

use clap::builder::styling::{AnsiColor, Color as ClapColor, RgbColor, Style, Styles};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// What a piece of terminal output is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  Timestamp,
  Primary,
  Accent,
  Info,
  Success,
  Label,
  Value,
}

impl Role {
  /// `(dark, light)` RGB triples.
  const fn palette(self) -> ((u8, u8, u8), (u8, u8, u8)) {
    match self {
      Self::Timestamp => ((118, 166, 166), (92, 62, 38)),
      Self::Primary => ((191, 126, 4), (70, 42, 25)),
      Self::Accent => ((166, 84, 55), (211, 99, 70)),
      Self::Info => ((118, 166, 166), (40, 111, 170)),
      Self::Success => ((118, 166, 166), (34, 142, 90)),
      Self::Label => ((217, 164, 4), (176, 103, 66)),
      Self::Value => ((242, 211, 56), (199, 146, 76)),
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub struct Colors {
  enabled: bool,
  theme: Theme,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  pub fn from_modes(color: ColorMode, theme: ThemeMode) -> Self {
    Self::new(colors_enabled(color), detect_theme(theme))
  }

  /// The terminal color for `role`, or `Reset` when color output is off.
  pub const fn get(&self, role: Role) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    let (dark, light) = role.palette();
    let (r, g, b) = match self.theme {
      Theme::Dark => dark,
      Theme::Light => light,
    };
    Color::Rgb { r, g, b }
  }

  /// Same as [`Self::get`], for `comfy-table` cells.
  pub const fn cell(&self, role: Role) -> ComfyColor {
    match self.get(role) {
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      _ => ComfyColor::Reset,
    }
  }

  const fn clap_color(role: Role) -> Option<ClapColor> {
    let ((r, g, b), _) = role.palette();
    Some(ClapColor::Rgb(RgbColor(r, g, b)))
  }

  pub const fn clap_styles() -> Styles {
    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::clap_color(Role::Label)))
      .usage(Style::new().bold().fg_color(Self::clap_color(Role::Label)))
      .literal(Style::new().fg_color(Self::clap_color(Role::Success)))
      .placeholder(Style::new().fg_color(Self::clap_color(Role::Info)))
      .error(Style::new().bold().fg_color(Some(ClapColor::Ansi(AnsiColor::Red))))
      .valid(Style::new().fg_color(Self::clap_color(Role::Success)))
      .invalid(Style::new().bold().fg_color(Self::clap_color(Role::Accent)))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => std::env::var("COLORFGBG")
      .ok()
      .as_deref()
      .and_then(theme_from_colorfgbg)
      .unwrap_or(Theme::Dark),
  }
}

/// `COLORFGBG` is `fg;bg`; background indexes 8 and up are the bright half of the palette.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
  let background = value.rsplit(';').next()?.parse::<u8>().ok()?;
  Some(if background >= 8 { Theme::Light } else { Theme::Dark })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn disabled_colors_reset() {
    let colors = Colors::new(false, Theme::Light);
    assert_eq!(colors.get(Role::Accent), Color::Reset);
    assert_eq!(colors.cell(Role::Accent), ComfyColor::Reset);
  }

  #[test]
  fn theme_picks_palette() {
    let dark = Colors::new(true, Theme::Dark);
    let light = Colors::new(true, Theme::Light);
    assert_eq!(dark.get(Role::Primary), Color::Rgb { r: 191, g: 126, b: 4 });
    assert_eq!(light.get(Role::Primary), Color::Rgb { r: 70, g: 42, b: 25 });
    assert_eq!(light.cell(Role::Success), ComfyColor::Rgb { r: 34, g: 142, b: 90 });
  }

  #[test]
  fn colorfgbg_detection() {
    assert_eq!(theme_from_colorfgbg("15;0"), Some(Theme::Dark));
    assert_eq!(theme_from_colorfgbg("0;15"), Some(Theme::Light));
    assert_eq!(theme_from_colorfgbg("0;default;15"), Some(Theme::Light));
    assert_eq!(theme_from_colorfgbg("garbage"), None);
  }
}
