//! The BIFF color palette and color-to-index resolution
//!
//! Records refer to colors by palette index. Indices 8 through 15 repeat the
//! first eight entries, and a few indices above the palette are "automatic"
//! system colors resolved by [`resolve_special_index`].

use super::Color;
use crate::error::{Error, Result};

/// Number of palette entries
pub const PALETTE_SIZE: usize = 66;

/// Index used for a white font, which the file format treats as automatic
pub const WHITE_FONT_INDEX: u16 = 9;

/// Automatic font color
pub const AUTOMATIC_FONT_INDEX: u16 = 0x7FFF;

/// Default foreground of the sheet window
pub const SYSTEM_FOREGROUND_INDEX: u16 = 0x40;

/// Default background of the sheet window
pub const SYSTEM_BACKGROUND_INDEX: u16 = 0x41;

/// Which attribute a color is destined for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorChannel {
    #[default]
    Font,
    Background,
    Foreground,
    Border,
}

const PALETTE: [(Color, &str); PALETTE_SIZE] = [
    (Color::BLACK, "Black"),
    (Color::WHITE, "White"),
    (Color::RED, "Red"),
    (Color::BRIGHT_GREEN, "BrightGreen"),
    (Color::BLUE, "Blue"),
    (Color::YELLOW, "Yellow"),
    (Color::PINK, "Pink"),
    (Color::TURQUOISE, "Turquoise"),
    (Color::BLACK, "Black"),
    (Color::WHITE, "White"),
    (Color::RED, "Red"),
    (Color::BRIGHT_GREEN, "BrightGreen"),
    (Color::BLUE, "Blue"),
    (Color::YELLOW, "Yellow"),
    (Color::PINK, "Pink"),
    (Color::TURQUOISE, "Turquoise"),
    (Color::DARK_RED, "Dark_Red"),
    (Color::GREEN, "Green"),
    (Color::DARK_BLUE, "Dark_Blue"),
    (Color::DARK_YELLOW, "Dark_Yellow"),
    (Color::VIOLET, "Violet"),
    (Color::TEAL, "Teal"),
    (Color::GRAY25, "Gray25"),
    (Color::GRAY50, "Gray50"),
    (Color::MEDIUM_PURPLE, "Medium_Purple"),
    (Color::PLUM, "Plum"),
    (Color::LIGHT_YELLOW, "Light_Yellow"),
    (Color::LIGHT_TURQUOISE, "Light_Turquoise"),
    (Color::DARK_PURPLE, "Dark_Purple"),
    (Color::SALMON, "Salmon"),
    (Color::BLUE_GRAY, "BlueGray"),
    (Color::LIGHT_PURPLE, "Light_Purple"),
    (Color::DARK_BLUE, "Dark_Blue"),
    (Color::PINK, "Pink"),
    (Color::YELLOW, "Yellow"),
    (Color::TURQUOISE, "Turquoise"),
    (Color::VIOLET, "Violet"),
    (Color::DARK_RED, "Dark_Red"),
    (Color::TEAL, "Teal"),
    (Color::BLUE, "Blue"),
    (Color::SKY_BLUE, "SkyBlue"),
    (Color::LIGHT_TURQUOISE, "Light_Turquoise"),
    (Color::LIGHT_GREEN, "Light_Green"),
    (Color::LIGHT_YELLOW, "Light_Yellow"),
    (Color::PALE_BLUE, "PaleBlue"),
    (Color::ROSE, "Rose"),
    (Color::LAVENDER, "Lavender"),
    (Color::TAN, "Tan"),
    (Color::DARK_YELLOW, "Dark_Yellow"),
    (Color::AQUA, "Aqua"),
    (Color::LIME, "Lime"),
    (Color::GOLD, "Gold"),
    (Color::LIGHT_ORANGE, "Light_Orange"),
    (Color::ORANGE, "Orange"),
    (Color::BLUE_GRAY, "BlueGray"),
    (Color::GRAY40, "Gray40"),
    (Color::DARK_TEAL, "Dark_Teal"),
    (Color::SEA_GREEN, "SeaGreen"),
    (Color::DARK_GREEN, "Dark_Green"),
    (Color::OLIVE_GREEN, "OliveGreen"),
    (Color::BROWN, "Brown"),
    (Color::PLUM, "Plum"),
    (Color::INDIGO, "Indigo"),
    (Color::GRAY80, "Gray80"),
    (Color::WHITE, "White"),
    (Color::BLACK, "Black"),
];

/// Palette entry at `index`; anything outside the palette gives entry 0
pub fn index_to_color(index: i32) -> Color {
    usize::try_from(index)
        .ok()
        .and_then(|i| PALETTE.get(i))
        .map_or(PALETTE[0].0, |&(color, _)| color)
}

/// Display name of a palette entry
pub fn color_name(index: u16) -> Option<&'static str> {
    PALETTE.get(index as usize).map(|&(_, name)| name)
}

/// Palette index of `color`, or of the nearest entry when there is no exact
/// match; ties go to the lower index
pub fn color_to_index(color: Color) -> u16 {
    if let Some(exact) = exact_index(color) {
        return exact;
    }

    let mut best = 0;
    let mut best_distance = u32::MAX;
    for (i, (entry, _)) in PALETTE.iter().enumerate() {
        let distance = color.distance_squared(entry);
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best as u16
}

/// Palette index for a hex color, matching to the nearest entry
///
/// Malformed hex resolves to index 0.
pub fn hex_to_index_approx(hex: &str, channel: ColorChannel) -> u16 {
    let Some(color) = Color::from_hex(hex) else {
        log::warn!("malformed color {hex:?}, using palette index 0");
        return 0;
    };
    channel_index(color, channel)
}

/// Palette index of `color` for `channel`, matching to the nearest entry
///
/// White fonts resolve to [`WHITE_FONT_INDEX`].
pub fn channel_index(color: Color, channel: ColorChannel) -> u16 {
    white_font_index(color, channel).unwrap_or_else(|| color_to_index(color))
}

/// Palette index for a hex color that must be in the palette
pub fn hex_to_index_exact(hex: &str, channel: ColorChannel) -> Result<u16> {
    let color = Color::from_hex(hex).ok_or_else(|| Error::ColorNotFound(hex.to_string()))?;
    if let Some(index) = white_font_index(color, channel) {
        return Ok(index);
    }
    exact_index(color).ok_or_else(|| Error::ColorNotFound(hex.to_string()))
}

/// Concrete color for the automatic and system indices above the palette
pub fn resolve_special_index(index: u16) -> Color {
    match index {
        0x40 | 0x4D | 0x4F | 0x51 | AUTOMATIC_FONT_INDEX => Color::BLACK,
        _ => Color::WHITE,
    }
}

fn exact_index(color: Color) -> Option<u16> {
    PALETTE
        .iter()
        .position(|&(entry, _)| entry == color)
        .map(|i| i as u16)
}

fn white_font_index(color: Color, channel: ColorChannel) -> Option<u16> {
    (channel == ColorChannel::Font && color == Color::WHITE).then_some(WHITE_FONT_INDEX)
}
