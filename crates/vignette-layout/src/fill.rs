//! Fixed, fit and fill length resolution shared by table and stack.
//!
//! Each configured length is classified with [`LengthSpec::classify`]:
//! positive lengths are fixed, zero means fit the content, and negative
//! lengths claim a share of whatever space the constraint leaves over,
//! weighted by their magnitude. When fixed and fit cells already exceed the
//! constraint, fill cells collapse to zero and the total overflows.

use vignette_core::{repeat_last, LengthSpec};

/// Lengths of a run of cells after resolution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedLengths {
    /// One length per cell.
    pub lengths: Vec<f64>,
    /// Sum of cell lengths, separators between them, and a border at each end.
    pub total: f64,
}

/// Resolve cell lengths.
///
/// `configured` holds per-cell lengths with last-value-repeats semantics; an
/// empty list fits every cell. `fit_lengths` holds the content length of each
/// cell and fixes the cell count.
pub fn resolve_lengths(
    configured: &[f64],
    fit_lengths: &[f64],
    constrained: f64,
    border: f64,
    separator: f64,
    epsilon: f64,
) -> ResolvedLengths {
    let count = fit_lengths.len();
    let specs: Vec<LengthSpec> = (0..count)
        .map(|i| LengthSpec::classify(repeat_last(configured, i, 0.0), epsilon))
        .collect();

    let mut lengths = vec![0.0; count];
    let mut used = 0.0;
    let mut total_weight = 0.0;
    for (i, spec) in specs.iter().enumerate() {
        match *spec {
            LengthSpec::Fixed(length) => lengths[i] = length,
            LengthSpec::Fit => lengths[i] = fit_lengths[i],
            LengthSpec::Fill(weight) => total_weight += weight,
        }
        used += lengths[i];
    }

    let separators = separator * count.saturating_sub(1) as f64;
    if total_weight > 0.0 {
        let available = (constrained - 2.0 * border - separators - used).max(0.0);
        for (i, spec) in specs.iter().enumerate() {
            if let LengthSpec::Fill(weight) = *spec {
                lengths[i] = available * weight / total_weight;
            }
        }
    }

    let total = 2.0 * border + separators + lengths.iter().sum::<f64>();
    ResolvedLengths { lengths, total }
}

/// Offsets of each cell's near edge from the start of the run, border included.
pub fn cell_offsets(lengths: &[f64], border: f64, separator: f64) -> Vec<f64> {
    let mut offset = border;
    lengths
        .iter()
        .map(|length| {
            let start = offset;
            offset += length + separator;
            start
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vignette_core::EPSILON;

    #[test]
    fn test_fill_distribution_by_weight() {
        let resolved = resolve_lengths(&[-1.0, -2.0], &[0.0, 0.0], 90.0, 0.0, 0.0, EPSILON);
        assert!((resolved.lengths[0] - 30.0).abs() < 1e-9);
        assert!((resolved.lengths[1] - 60.0).abs() < 1e-9);
        assert!((resolved.total - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_fixed_fit_fill() {
        // 100 - 2*5 border - 2*5 separators - 20 fixed - 12 fit = 48 for the fill
        let resolved = resolve_lengths(&[20.0, 0.0, -1.0], &[3.0, 12.0, 7.0], 100.0, 5.0, 5.0, EPSILON);
        assert_eq!(resolved.lengths, vec![20.0, 12.0, 48.0]);
        assert!((resolved.total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_fill_collapses_on_overflow() {
        let resolved = resolve_lengths(&[60.0, -1.0, 50.0], &[0.0; 3], 100.0, 0.0, 0.0, EPSILON);
        assert_eq!(resolved.lengths, vec![60.0, 0.0, 50.0]);
        assert!(resolved.total > 100.0);
    }

    #[test]
    fn test_empty_configuration_fits_content() {
        let resolved = resolve_lengths(&[], &[4.0, 9.0], 0.0, 1.0, 2.0, EPSILON);
        assert_eq!(resolved.lengths, vec![4.0, 9.0]);
        assert!((resolved.total - 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_cells_is_just_border() {
        let resolved = resolve_lengths(&[10.0], &[], 50.0, 3.0, 4.0, EPSILON);
        assert!(resolved.lengths.is_empty());
        assert_eq!(resolved.total, 6.0);
    }

    #[test]
    fn test_cell_offsets() {
        assert_eq!(cell_offsets(&[10.0, 20.0, 5.0], 2.0, 1.0), vec![2.0, 13.0, 34.0]);
    }
}
