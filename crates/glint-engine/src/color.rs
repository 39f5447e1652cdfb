/// RGBA color with 0–255 integer components.
///
/// The harness clears the frame with a fixed color given in byte components;
/// this type owns the exact byte → `[0, 1]` normalization so the mapping is
/// testable in one place.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Normalizes each component to `[0, 1]` exactly: 0 → 0.0, 255 → 1.0.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64 / 255.0,
            g: self.g as f64 / 255.0,
            b: self.b as f64 / 255.0,
            a: self.a as f64 / 255.0,
        }
    }
}

impl Default for Rgba8 {
    /// The harness's fixed clear color, a muted steel blue.
    fn default() -> Self {
        Self::new(42, 94, 140, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_maps_to_ones() {
        let c = Rgba8::new(255, 255, 255, 255).to_wgpu();
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 1.0);
        assert_eq!(c.b, 1.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn transparent_black_maps_to_zeros() {
        let c = Rgba8::new(0, 0, 0, 0).to_wgpu();
        assert_eq!(c.r, 0.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 0.0);
    }

    #[test]
    fn mid_values_stay_in_range() {
        let c = Rgba8::new(42, 94, 140, 255).to_wgpu();
        assert!(c.r > 0.0 && c.r < 1.0);
        assert!(c.g > 0.0 && c.g < 1.0);
        assert!(c.b > 0.0 && c.b < 1.0);
        assert_eq!(c.a, 1.0);
    }
}
