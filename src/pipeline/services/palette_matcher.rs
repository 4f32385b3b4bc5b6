//! Nearest-swatch selection with a lipstick-darker-than-foundation rule.
use crate::error::PaletteError;
use crate::pipeline::types::{
    darken_color, Color, Palette, Swatch, SwatchCategory, Swatches, DARKEN_FACTOR,
};

/// Result of [`darken_until_below`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Darkened {
    pub color: Color,
    pub iterations: u32,
}

/// First swatch with the smallest distance to `target`.
pub fn nearest_swatch<'a>(
    swatches: &'a [Swatch],
    target: &Color,
    category: SwatchCategory,
) -> Result<&'a Swatch, PaletteError> {
    let mut best: Option<(&Swatch, f64)> = None;
    for swatch in swatches {
        let d = swatch.color.distance(target);
        // Strict comparison keeps the earliest swatch on ties.
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((swatch, d));
        }
    }
    best.map(|(s, _)| s)
        .ok_or(PaletteError::EmptyCategory(category))
}

/// Darkens `color` step by step until its brightness is strictly below
/// `target_brightness`.
///
/// Stops at black even if the target is not met (a target of 0 can never be
/// undercut), so the loop always terminates.
pub fn darken_until_below(color: Color, target_brightness: f64) -> Darkened {
    let mut color = color;
    let mut iterations = 0;
    while color.brightness() >= target_brightness && !color.is_black() {
        color = darken_color(color, DARKEN_FACTOR);
        iterations += 1;
    }
    Darkened { color, iterations }
}

/// Picks foundation and eyeshadow nearest to the skin color and lipstick
/// nearest to the lip color, then darkens the lipstick below the foundation.
pub fn select_swatches(
    skin_color: Color,
    lip_color: Color,
    palette: &Palette,
) -> Result<Swatches, PaletteError> {
    let foundation = nearest_swatch(&palette.foundation, &skin_color, SwatchCategory::Foundation)?;
    let eyeshadow = nearest_swatch(&palette.eyeshadow, &skin_color, SwatchCategory::Eyeshadow)?;
    let lipstick = nearest_swatch(&palette.lipstick, &lip_color, SwatchCategory::Lipstick)?;

    let darkened = darken_until_below(lipstick.color, foundation.color.brightness());
    if darkened.iterations > 0 {
        tracing::debug!(
            "Darkened lipstick {} -> {} in {} steps to sit below foundation {}",
            lipstick.color,
            darkened.color,
            darkened.iterations,
            foundation.color
        );
    }

    Ok(Swatches {
        foundation: foundation.color,
        eyeshadow: eyeshadow.color,
        lipstick: darkened.color,
        lipstick_darken_steps: darkened.iterations,
    })
}
