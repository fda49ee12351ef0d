use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::Pt2D;

/// Noisy observations as callers hand them over. Some producers wrap every observation in its own
/// single-element list (`[[x, y]]` per sample); both shapes mean the same flat sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointList {
    Flat(Vec<Pt2D>),
    Wrapped(Vec<Vec<Pt2D>>),
}

impl PointList {
    pub fn len(&self) -> usize {
        match self {
            PointList::Flat(pts) => pts.len(),
            PointList::Wrapped(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops the singleton inner dimension, if there is one.
    pub fn squeeze(&self) -> Result<Vec<Pt2D>> {
        match self {
            PointList::Flat(pts) => Ok(pts.clone()),
            PointList::Wrapped(rows) => {
                let mut pts = Vec::with_capacity(rows.len());
                for (idx, row) in rows.iter().enumerate() {
                    if row.len() != 1 {
                        bail!(
                            "Observation {idx} wraps {} points; only a single point per row can \
                             be squeezed",
                            row.len()
                        );
                    }
                    pts.push(row[0]);
                }
                Ok(pts)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_and_flat_squeeze_identically() {
        let flat: PointList = serde_json::from_str("[[1.0, 2.0], [3.0, 4.5]]").unwrap();
        let wrapped: PointList = serde_json::from_str("[[[1.0, 2.0]], [[3.0, 4.5]]]").unwrap();
        assert!(matches!(flat, PointList::Flat(_)));
        assert!(matches!(wrapped, PointList::Wrapped(_)));
        assert_eq!(flat.squeeze().unwrap(), wrapped.squeeze().unwrap());
        assert_eq!(
            wrapped.squeeze().unwrap(),
            vec![Pt2D::new(1.0, 2.0), Pt2D::new(3.0, 4.5)]
        );
    }

    #[test]
    fn only_singleton_rows_squeeze() {
        let bad: PointList = serde_json::from_str("[[[1.0, 2.0]], [[3.0, 4.0], [5.0, 6.0]]]").unwrap();
        let err = bad.squeeze().unwrap_err();
        assert!(err.to_string().contains("Observation 1 wraps 2 points"));
    }

    #[test]
    fn empty_list_is_flat() {
        let empty: PointList = serde_json::from_str("[]").unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.squeeze().unwrap(), Vec::new());
    }
}
