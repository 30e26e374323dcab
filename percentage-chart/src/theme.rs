//! Fallback accent color derived from a Material 3 scheme.

use std::sync::OnceLock;

use material_color_utilities::{
    dynamiccolor::{DynamicSchemeBuilder, MaterialDynamicColors, SpecVersion, Variant},
    hct::Hct,
};

use crate::Color;

/// Seed of the default scheme, #6750A4.
pub const DEFAULT_SEED: Color = Color::from_rgb(0x67, 0x50, 0xA4);

static DEFAULT_ACCENT: OnceLock<Color> = OnceLock::new();

/// Primary color of the light scheme generated from [`DEFAULT_SEED`].
pub fn default_accent_color() -> Color {
    *DEFAULT_ACCENT.get_or_init(|| accent_from_seed(DEFAULT_SEED, false))
}

/// Primary color of the Material 3 tonal-spot scheme generated from `seed`.
pub fn accent_from_seed(seed: Color, is_dark: bool) -> Color {
    let scheme = DynamicSchemeBuilder::default()
        .source_color_hct(Hct::from_int(seed.to_argb()))
        .variant(Variant::TonalSpot)
        .spec_version(SpecVersion::Spec2025)
        .is_dark(is_dark)
        .build();
    Color::from_argb(MaterialDynamicColors::new().primary().get_argb(&scheme))
}
