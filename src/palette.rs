//! Accent palette and the material recipe derived from it
//!
//! The palette index is the only piece of state the user changes. Every
//! connector material is a pure function of that index.

/// Linear RGB colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed sRGB hex value (0xRRGGBB), converting to linear
    pub fn from_srgb_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self::new(channel(16), channel(8), channel(0))
    }

    /// The dark grey used by the recipe (`#444`)
    pub fn graphite() -> Self {
        Self::from_srgb_hex(0x444444)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }

    /// Largest per-channel distance to another colour
    pub fn max_channel_distance(self, other: Color) -> f32 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Accent colours as sRGB hex, in cycling order
pub const ACCENTS: [u32; 4] = [0x4060ff, 0x20ffa0, 0xff4060, 0xffcc00];

/// Accent colour for an arbitrary index, wrapping around the palette
#[inline]
pub fn accent_color(index: usize) -> Color {
    Color::from_srgb_hex(ACCENTS[index % ACCENTS.len()])
}

/// Rotating index into [`ACCENTS`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccentPalette {
    index: usize,
}

impl AccentPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Step to the next accent, wrapping after the last one
    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % ACCENTS.len();
        self.index
    }

    pub fn current(&self) -> Color {
        accent_color(self.index)
    }

    /// Materials for the generated connectors under the current accent
    pub fn materials(&self) -> [MaterialSpec; 9] {
        material_recipe(self.index)
    }
}

/// Surface description of a connector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialSpec {
    pub color: Color,
    pub roughness: f32,
    /// Accent shapes carry a point light in their own colour
    pub accent: bool,
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            roughness: 0.0,
            accent: false,
        }
    }
}

impl MaterialSpec {
    pub fn new(color: Color, roughness: f32) -> Self {
        Self {
            color,
            roughness,
            accent: false,
        }
    }

    pub fn accent(color: Color, roughness: f32) -> Self {
        Self {
            color,
            roughness,
            accent: true,
        }
    }
}

/// How a model is shaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialKind {
    /// Opaque PBR surface
    Standard { metalness: f32 },
    /// Clear-coated glass
    Transmission {
        clearcoat: f32,
        thickness: f32,
        anisotropic_blur: f32,
        chromatic_aberration: f32,
    },
}

impl MaterialKind {
    pub fn standard() -> Self {
        MaterialKind::Standard {
            metalness: crate::consts::MODEL_METALNESS,
        }
    }

    pub fn glass() -> Self {
        MaterialKind::Transmission {
            clearcoat: 1.0,
            thickness: 0.1,
            anisotropic_blur: 0.1,
            chromatic_aberration: 0.1,
        }
    }

    pub fn is_transmissive(&self) -> bool {
        matches!(self, MaterialKind::Transmission { .. })
    }

    /// Glass is treated as a dielectric
    pub fn metalness(&self) -> f32 {
        match self {
            MaterialKind::Standard { metalness } => *metalness,
            MaterialKind::Transmission { .. } => 0.0,
        }
    }

    pub fn clearcoat(&self) -> f32 {
        match self {
            MaterialKind::Standard { .. } => 0.0,
            MaterialKind::Transmission { clearcoat, .. } => *clearcoat,
        }
    }
}

/// Nine materials for a palette index: three dark, three light, three accent
pub fn material_recipe(accent: usize) -> [MaterialSpec; 9] {
    let dark = Color::graphite();
    let light = Color::WHITE;
    let hue = accent_color(accent);
    [
        MaterialSpec::new(dark, 0.1),
        MaterialSpec::new(dark, 0.75),
        MaterialSpec::new(dark, 0.75),
        MaterialSpec::new(light, 0.1),
        MaterialSpec::new(light, 0.75),
        MaterialSpec::new(light, 0.1),
        MaterialSpec::accent(hue, 0.1),
        MaterialSpec::accent(hue, 0.75),
        MaterialSpec::accent(hue, 0.1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_after_four() {
        let mut palette = AccentPalette::new();
        assert_eq!(palette.index(), 0);
        assert_eq!(palette.advance(), 1);
        assert_eq!(palette.advance(), 2);
        assert_eq!(palette.advance(), 3);
        assert_eq!(palette.advance(), 0);
        assert_eq!(palette, AccentPalette::new());
    }

    #[test]
    fn recipe_layout() {
        let recipe = material_recipe(0);
        assert!(recipe[..3].iter().all(|m| m.color == Color::graphite() && !m.accent));
        assert!(recipe[3..6].iter().all(|m| m.color == Color::WHITE && !m.accent));
        assert!(recipe[6..].iter().all(|m| m.color == accent_color(0) && m.accent));

        let roughness: Vec<f32> = recipe.iter().map(|m| m.roughness).collect();
        assert_eq!(roughness, vec![0.1, 0.75, 0.75, 0.1, 0.75, 0.1, 0.1, 0.75, 0.1]);
    }

    #[test]
    fn recipe_only_changes_accents() {
        let a = material_recipe(0);
        let b = material_recipe(1);
        assert_eq!(a[..6], b[..6]);
        assert!(b[6..].iter().all(|m| m.color == accent_color(1)));
    }

    #[test]
    fn srgb_conversion_endpoints() {
        assert!(Color::from_srgb_hex(0xffffff).max_channel_distance(Color::WHITE) < 1e-6);
        assert_eq!(Color::from_srgb_hex(0x000000), Color::BLACK);
        // #444 is well below mid grey once linearised
        let g = Color::graphite();
        assert!((g.r - 0.0578).abs() < 1e-3);
        assert_eq!(g.r, g.g);
    }

    #[test]
    fn accent_index_wraps() {
        assert_eq!(accent_color(4), accent_color(0));
        assert_eq!(accent_color(7), accent_color(3));
    }

    #[test]
    fn material_defaults() {
        let m = MaterialSpec::default();
        assert_eq!(m.color, Color::WHITE);
        assert_eq!(m.roughness, 0.0);
        assert!(!m.accent);
    }

    #[test]
    fn glass_carries_the_shaded_parameters() {
        assert_eq!(
            MaterialKind::glass(),
            MaterialKind::Transmission {
                clearcoat: 1.0,
                thickness: 0.1,
                anisotropic_blur: 0.1,
                chromatic_aberration: 0.1,
            }
        );
        assert_eq!(MaterialKind::glass().metalness(), 0.0);
        assert_eq!(MaterialKind::glass().clearcoat(), 1.0);
        assert_eq!(MaterialKind::standard().clearcoat(), 0.0);
    }
}
