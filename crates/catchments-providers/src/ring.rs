//! Closed polygon rings from flat coordinate sequences.

use geojson::Position;

use crate::error::ParseError;

/// An axis-aligned box in the provider's own `(x, y)` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Reads `[min_x, min_y, max_x, max_y]`. Any other length yields `None`.
    #[must_use]
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match *values {
            [min_x, min_y, max_x, max_y] => Some(Self {
                min_x,
                min_y,
                max_x,
                max_y,
            }),
            _ => None,
        }
    }

    fn contains_x(&self, x: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x)
    }
}

/// Pairs up `flat` as `(x, y)` values and closes the ring.
///
/// With a `filter`, pairs whose x lies outside `[min_x, max_x]` are dropped
/// before closing. Order is preserved. The result always has one more
/// position than the number of surviving pairs.
///
/// # Errors
///
/// - [`ParseError::MalformedCoordinateData`] if `flat` has odd length.
/// - [`ParseError::EmptyGeometry`] if no pairs remain.
pub fn build_ring(flat: &[f64], filter: Option<&BoundingBox>) -> Result<Vec<Position>, ParseError> {
    if flat.len() % 2 != 0 {
        return Err(ParseError::MalformedCoordinateData(format!(
            "expected an even number of values, got {}",
            flat.len()
        )));
    }

    let mut ring: Vec<Position> = flat
        .chunks_exact(2)
        .filter(|pair| filter.map_or(true, |bbox| bbox.contains_x(pair[0])))
        .map(<[f64]>::to_vec)
        .collect();

    let first = ring.first().cloned().ok_or(ParseError::EmptyGeometry)?;
    ring.push(first);
    Ok(ring)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closes_ring_with_first_pair() {
        let ring = build_ring(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], None).unwrap();
        assert_eq!(
            ring,
            vec![
                vec![1.0, 2.0],
                vec![3.0, 4.0],
                vec![5.0, 6.0],
                vec![1.0, 2.0]
            ]
        );
    }

    #[test]
    fn single_pair_still_closes() {
        let ring = build_ring(&[7.5, 8.5], None).unwrap();
        assert_eq!(ring, vec![vec![7.5, 8.5], vec![7.5, 8.5]]);
    }

    #[test]
    fn already_closed_input_is_not_deduplicated() {
        let ring = build_ring(&[1.0, 1.0, 2.0, 2.0, 1.0, 1.0], None).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(build_ring(&[], None), Err(ParseError::EmptyGeometry));
    }

    #[test]
    fn odd_length_fails() {
        assert!(matches!(
            build_ring(&[1.0, 2.0, 3.0], None),
            Err(ParseError::MalformedCoordinateData(_))
        ));
    }

    #[test]
    fn filter_drops_world_bbox_sentinels() {
        let bbox = BoundingBox::from_slice(&[10.0, 45.0, 16.0, 52.0]).unwrap();
        let flat = [
            -180.0, 85.05, 180.0, 85.05, 180.0, -85.05, -180.0, -85.05, 10.1, 45.2, 11.1, 46.2,
        ];
        let ring = build_ring(&flat, Some(&bbox)).unwrap();
        assert_eq!(
            ring,
            vec![vec![10.1, 45.2], vec![11.1, 46.2], vec![10.1, 45.2]]
        );
    }

    #[test]
    fn filter_removing_everything_is_empty_geometry() {
        let bbox = BoundingBox::from_slice(&[10.0, 45.0, 16.0, 52.0]).unwrap();
        assert_eq!(
            build_ring(&[-180.0, 85.05, 180.0, -85.05], Some(&bbox)),
            Err(ParseError::EmptyGeometry)
        );
    }

    #[test]
    fn bbox_from_slice_requires_four_values() {
        assert!(BoundingBox::from_slice(&[1.0, 2.0, 3.0]).is_none());
        assert!(BoundingBox::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_none());
    }

    #[test]
    fn ring_length_is_pairs_plus_one() {
        let flat: Vec<f64> = (0..40).map(f64::from).collect();
        let ring = build_ring(&flat, None).unwrap();
        assert_eq!(ring.len(), 21);
        assert_eq!(ring[0], ring[20]);
    }
}
