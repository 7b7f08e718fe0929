//! Vertical alignment helpers for text labels.
//!
//! Labels are positioned by their baseline. To make a row of labels look
//! vertically centred regardless of their text, layout managers add a
//! per-row Y offset to label nodes; [`baseline_offset_y_from_visual_center`]
//! computes a good value for that offset from font metrics supplied by the host.

/// Font metrics, in points, as reported by the host's font tables.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the tallest glyphs (positive).
    pub ascender: f64,
    /// Distance from the baseline to the bottom of descending glyphs (zero or negative).
    pub descender: f64,
}

impl FontMetrics {
    pub fn new(ascender: f64, descender: f64) -> Self {
        Self { ascender, descender }
    }

    /// Full line height of the font.
    pub fn height(&self) -> f64 {
        self.ascender - self.descender
    }
}

/// What part of a label counts when centring it visually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelHeightMode {
    /// The exact height of the current text.
    #[default]
    Text,
    /// The full font height: ascender and descender.
    Font,
    /// The font ascender only.
    FontAscender,
    /// The ascender plus half the descender.
    FontAscenderBias,
}

/// Offset from a label's visual centre to where its baseline should sit.
///
/// Position a baseline-aligned label at `center_y + offset`. Returns `0.0`
/// for [`LabelHeightMode::Text`], which cannot be derived from font metrics;
/// hosts centring by text height should centre-align the label instead.
pub fn baseline_offset_y_from_visual_center(mode: LabelHeightMode, metrics: FontMetrics) -> f64 {
    // descender is negative, so it moves the baseline up
    match mode {
        LabelHeightMode::Text => 0.0,
        LabelHeightMode::Font => -(metrics.ascender + metrics.descender) / 2.0,
        LabelHeightMode::FontAscender => -metrics.ascender / 2.0,
        LabelHeightMode::FontAscenderBias => -(metrics.ascender + metrics.descender / 2.0) / 2.0,
    }
}

/// Height of a label measured according to `mode`.
///
/// `text_height` is the measured height of the current text, used for
/// [`LabelHeightMode::Text`].
pub fn label_height(mode: LabelHeightMode, metrics: FontMetrics, text_height: f64) -> f64 {
    match mode {
        LabelHeightMode::Text => text_height,
        LabelHeightMode::Font => metrics.height(),
        LabelHeightMode::FontAscender => metrics.ascender,
        LabelHeightMode::FontAscenderBias => metrics.ascender - metrics.descender / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: FontMetrics = FontMetrics { ascender: 16.0, descender: -4.0 };

    #[test]
    fn test_text_mode_has_no_offset() {
        assert_eq!(baseline_offset_y_from_visual_center(LabelHeightMode::Text, METRICS), 0.0);
    }

    #[test]
    fn test_font_mode_centres_full_line() {
        let offset = baseline_offset_y_from_visual_center(LabelHeightMode::Font, METRICS);
        assert!((offset + 6.0).abs() < 1e-9);
        // baseline at -6: the line spans -10..10 around the centre
        assert!((offset + METRICS.ascender - 10.0).abs() < 1e-9);
        assert!((offset + METRICS.descender + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_ascender_modes() {
        let ascender = baseline_offset_y_from_visual_center(LabelHeightMode::FontAscender, METRICS);
        assert!((ascender + 8.0).abs() < 1e-9);

        let bias = baseline_offset_y_from_visual_center(LabelHeightMode::FontAscenderBias, METRICS);
        assert!((bias + 7.0).abs() < 1e-9);
        assert!((label_height(LabelHeightMode::FontAscenderBias, METRICS, 0.0) - 18.0).abs() < 1e-9);
    }
}
