//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, color).
//! Based on the Grammar of Graphics [Wilkinson 2005].

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
///
/// An inverted range (`range.0 > range.1`) is valid and used for the screen
/// y-axis, where the domain maximum maps to the top of the panel.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain(
                "Domain min and max cannot be equal".to_string(),
            ));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Named colormap for the density panel.
///
/// Blues is the default, matching the classic statistical jointplot look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    /// Sequential blues.
    #[default]
    Blues,
    /// Viridis (perceptually uniform, colorblind-safe).
    Viridis,
    /// Diverging red-blue.
    RedBlue,
    /// Magma (perceptually uniform).
    Magma,
    /// Heat (black-red-yellow-white).
    Heat,
    /// Greyscale.
    Greyscale,
}

impl Colormap {
    /// Build a [`ColorScale`] over the given domain.
    ///
    /// A degenerate domain (min == max) is widened by half a unit on each
    /// side so constant data still maps to a color.
    ///
    /// # Errors
    ///
    /// Returns an error if the widened domain is still invalid.
    pub fn color_scale(self, domain: (f32, f32)) -> Result<ColorScale> {
        let (min, max) = if (domain.1 - domain.0).abs() < f32::EPSILON {
            (domain.0 - 0.5, domain.1 + 0.5)
        } else {
            domain
        };

        let scale = match self {
            Self::Blues => ColorScale::blues((min, max)),
            Self::Viridis => ColorScale::viridis((min, max)),
            Self::RedBlue => ColorScale::red_blue((min, max)),
            Self::Magma => ColorScale::magma((min, max)),
            Self::Heat => ColorScale::heat((min, max)),
            Self::Greyscale => ColorScale::greyscale((min, max)),
        };

        scale.ok_or_else(|| Error::ScaleDomain("Colormap domain is invalid".to_string()))
    }
}

/// Color scale for mapping values to colors.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Create a new color scale.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty or domain is invalid.
    pub fn new(colors: Vec<Rgba>, domain: (f32, f32)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain(
                "Color scale requires at least one color".to_string(),
            ));
        }

        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain(
                "Domain min and max cannot be equal".to_string(),
            ));
        }

        Ok(Self {
            colors,
            domain_min: domain.0,
            domain_max: domain.1,
        })
    }

    /// Create a sequential blue scale.
    #[must_use]
    pub fn blues(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(247, 251, 255),
                Rgba::rgb(198, 219, 239),
                Rgba::rgb(107, 174, 214),
                Rgba::rgb(33, 113, 181),
                Rgba::rgb(8, 48, 107),
            ],
            domain,
        )
        .ok()
    }

    /// Create a diverging red-blue scale.
    #[must_use]
    pub fn red_blue(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(178, 24, 43),
                Rgba::rgb(239, 138, 98),
                Rgba::rgb(247, 247, 247),
                Rgba::rgb(103, 169, 207),
                Rgba::rgb(33, 102, 172),
            ],
            domain,
        )
        .ok()
    }

    /// Create a viridis color scale (perceptually uniform).
    #[must_use]
    pub fn viridis(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(68, 1, 84),
                Rgba::rgb(59, 82, 139),
                Rgba::rgb(33, 145, 140),
                Rgba::rgb(94, 201, 98),
                Rgba::rgb(253, 231, 37),
            ],
            domain,
        )
        .ok()
    }

    /// Create a magma color scale (sequential, perceptually uniform).
    #[must_use]
    pub fn magma(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(0, 0, 4),
                Rgba::rgb(81, 18, 124),
                Rgba::rgb(183, 55, 121),
                Rgba::rgb(252, 137, 97),
                Rgba::rgb(252, 253, 191),
            ],
            domain,
        )
        .ok()
    }

    /// Create a greyscale color scale.
    #[must_use]
    pub fn greyscale(domain: (f32, f32)) -> Option<Self> {
        Self::new(vec![Rgba::BLACK, Rgba::WHITE], domain).ok()
    }

    /// Create a heat color scale (black-red-yellow-white).
    #[must_use]
    pub fn heat(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(0, 0, 0),
                Rgba::rgb(128, 0, 0),
                Rgba::rgb(255, 0, 0),
                Rgba::rgb(255, 128, 0),
                Rgba::rgb(255, 255, 0),
                Rgba::rgb(255, 255, 255),
            ],
            domain,
        )
        .ok()
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let segment_count = self.colors.len() - 1;
        let segment = (t * segment_count as f32).floor() as usize;
        let segment = segment.min(segment_count - 1);

        let local_t = t * segment_count as f32 - segment as f32;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (
            *self.colors.first().unwrap_or(&Rgba::BLACK),
            *self.colors.last().unwrap_or(&Rgba::WHITE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert_relative_eq!(scale.scale(0.0), 0.0, epsilon = 0.001);
        assert_relative_eq!(scale.scale(50.0), 0.5, epsilon = 0.001);
        assert_relative_eq!(scale.scale(100.0), 1.0, epsilon = 0.001);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        // Screen y-axis: domain max maps to range start (top)
        let scale =
            LinearScale::new((0.0, 10.0), (100.0, 0.0)).expect("operation should succeed");
        assert_relative_eq!(scale.scale(0.0), 100.0, epsilon = 0.001);
        assert_relative_eq!(scale.scale(10.0), 0.0, epsilon = 0.001);
        assert_relative_eq!(scale.scale(5.0), 50.0, epsilon = 0.001);
    }

    #[test]
    fn test_linear_scale_domain_range() {
        let scale =
            LinearScale::new((10.0, 20.0), (100.0, 200.0)).expect("operation should succeed");
        assert_eq!(scale.domain(), (10.0, 20.0));
        assert_eq!(scale.range(), (100.0, 200.0));
    }

    #[test]
    fn test_linear_scale_equal_domain_error() {
        let result = LinearScale::new((5.0, 5.0), (0.0, 1.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_color_scale() {
        let scale = ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 1.0))
            .expect("color scale creation should succeed");

        let mid = scale.scale(0.5);
        assert!(mid.r > 100 && mid.r < 150);
    }

    #[test]
    fn test_color_scale_single_color() {
        let scale = ColorScale::new(vec![Rgba::RED], (0.0, 1.0))
            .expect("color scale creation should succeed");
        let color = scale.scale(0.5);
        assert_eq!(color, Rgba::RED);
    }

    #[test]
    fn test_color_scale_domain_range() {
        let scale = ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 10.0))
            .expect("color scale creation should succeed");
        assert_eq!(scale.domain(), (0.0, 10.0));
        let (range_start, range_end) = scale.range();
        assert_eq!(range_start, Rgba::BLACK);
        assert_eq!(range_end, Rgba::WHITE);
    }

    #[test]
    fn test_color_scale_clamping() {
        let scale = ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 1.0))
            .expect("color scale creation should succeed");
        // Values outside domain should be clamped
        let below = scale.scale(-1.0);
        let above = scale.scale(2.0);
        assert_eq!(below, Rgba::BLACK);
        assert_eq!(above, Rgba::WHITE);
    }

    #[test]
    fn test_color_scale_invalid_empty() {
        let result = ColorScale::new(vec![], (0.0, 1.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_color_scale_invalid_equal_domain() {
        let result = ColorScale::new(vec![Rgba::RED, Rgba::BLUE], (5.0, 5.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_colormap_default_is_blues() {
        assert_eq!(Colormap::default(), Colormap::Blues);
    }

    #[test]
    fn test_colormap_all_variants_build() {
        for cmap in [
            Colormap::Blues,
            Colormap::Viridis,
            Colormap::RedBlue,
            Colormap::Magma,
            Colormap::Heat,
            Colormap::Greyscale,
        ] {
            let scale = cmap.color_scale((0.0, 10.0));
            assert!(scale.is_ok(), "Failed for colormap {:?}", cmap);
        }
    }

    #[test]
    fn test_colormap_degenerate_domain_widens() {
        // Constant counts should not error; the domain widens instead
        let scale = Colormap::Blues.color_scale((5.0, 5.0)).unwrap();
        let (min, max) = scale.domain();
        assert!(min < 5.0);
        assert!(max > 5.0);
    }

    #[test]
    fn test_colormap_blues_low_is_light() {
        let scale = Colormap::Blues.color_scale((0.0, 1.0)).unwrap();
        let low = scale.scale(0.0);
        let high = scale.scale(1.0);
        // Sequential blues run light to dark
        assert!(low.r > 200 && low.g > 200 && low.b > 200);
        assert!(high.r < 50 && high.b > high.r);
    }

    #[test]
    fn test_color_scale_multi_segment() {
        let scale = ColorScale::new(
            vec![Rgba::RED, Rgba::GREEN, Rgba::BLUE, Rgba::WHITE],
            (0.0, 1.0),
        )
        .expect("operation should succeed");
        let _ = scale.scale(0.0);
        let _ = scale.scale(0.33);
        let _ = scale.scale(0.66);
        let _ = scale.scale(1.0);
    }

    #[test]
    fn test_color_scale_debug_clone() {
        let scale = ColorScale::new(vec![Rgba::RED, Rgba::BLUE], (0.0, 1.0))
            .expect("color scale creation should succeed");
        let scale2 = scale.clone();
        let _ = format!("{scale2:?}");
    }
}
