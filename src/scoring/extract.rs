//! Attribution Extractor - Positive-class vector extraction
//!
//! Reduces a tagged [`RawAttribution`] to one flat value per canonical
//! feature for the single scored instance. Dispatch is exhaustive and
//! ordered; anything outside the variant set fails instead of guessing,
//! and an extracted length that differs from the schema is a hard fault
//! (it means the explainer was fit against a different schema).

use ndarray::{s, Array2};

use super::attribution::{ClassArray, RawAttribution};
use super::ScoringError;

/// Extract the positive-class attribution vector for instance 0.
///
/// Dispatch order, first match wins:
/// 1. two-element class list → entry 1 (positive class), row 0 if rank-2;
/// 2. any other non-empty class list → entry 0, same row handling
///    (first-entry fallback kept from the historical behavior; with more
///    than two classes it is not guaranteed to be the positive class);
/// 3. rank-3 tensor → axes read as (instance, feature, class), slice
///    `[0, .., 1]`; the (instance, class, feature) layout is unsupported;
/// 4. rank-2 matrix → row 0;
/// 5. rank-1 array → taken directly.
pub fn positive_class_attributions(
    raw: &RawAttribution,
    expected: usize,
) -> Result<Vec<f64>, ScoringError> {
    let values = match raw {
        RawAttribution::ClassList(classes) => match classes.as_slice() {
            [_, positive] => instance_row(positive)?,
            [first, ..] => instance_row(first)?,
            [] => return Err(ScoringError::UnrecognizedShape("empty class list".to_string())),
        },
        RawAttribution::Rank3(tensor) => {
            let shape = tensor.shape();
            if shape[0] == 0 {
                return Err(ScoringError::UnrecognizedShape(
                    "rank-3 tensor without instances".to_string(),
                ));
            }
            if shape[2] < 2 {
                return Err(ScoringError::UnrecognizedShape(format!(
                    "rank-3 tensor with {} class lanes (positive class needs 2)",
                    shape[2]
                )));
            }
            tensor.slice(s![0, .., 1]).to_vec()
        }
        RawAttribution::Rank2(matrix) => first_row(matrix)?,
        RawAttribution::Rank1(array) => array.to_vec(),
    };

    if values.len() != expected {
        return Err(ScoringError::LengthMismatch {
            got: values.len(),
            expected,
        });
    }
    Ok(values)
}

fn instance_row(class: &ClassArray) -> Result<Vec<f64>, ScoringError> {
    match class {
        ClassArray::Rank1(array) => Ok(array.to_vec()),
        ClassArray::Rank2(matrix) => first_row(matrix),
    }
}

fn first_row(matrix: &Array2<f64>) -> Result<Vec<f64>, ScoringError> {
    if matrix.nrows() == 0 {
        return Err(ScoringError::UnrecognizedShape(
            "attribution matrix without rows".to_string(),
        ));
    }
    Ok(matrix.row(0).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, Array3};

    const N: usize = 5;

    fn sample_values() -> Vec<f64> {
        vec![0.1, -0.2, 0.05, 0.0, 0.15]
    }

    #[test]
    fn test_two_class_list_takes_positive_class_row() {
        let raw = RawAttribution::ClassList(vec![
            ClassArray::Rank2(arr2(&[[-0.1, 0.2, -0.05, 0.0, -0.15]])),
            ClassArray::Rank2(arr2(&[[0.1, -0.2, 0.05, 0.0, 0.15]])),
        ]);
        assert_eq!(positive_class_attributions(&raw, N).unwrap(), sample_values());
    }

    #[test]
    fn test_two_class_list_of_flat_arrays() {
        let raw = RawAttribution::ClassList(vec![
            ClassArray::Rank1(arr1(&[-0.1, 0.2, -0.05, 0.0, -0.15])),
            ClassArray::Rank1(arr1(&[0.1, -0.2, 0.05, 0.0, 0.15])),
        ]);
        assert_eq!(positive_class_attributions(&raw, N).unwrap(), sample_values());
    }

    #[test]
    fn test_other_class_list_falls_back_to_first_entry() {
        let raw = RawAttribution::ClassList(vec![
            ClassArray::Rank1(arr1(&[0.1, -0.2, 0.05, 0.0, 0.15])),
            ClassArray::Rank1(arr1(&[9.0, 9.0, 9.0, 9.0, 9.0])),
            ClassArray::Rank1(arr1(&[8.0, 8.0, 8.0, 8.0, 8.0])),
        ]);
        assert_eq!(positive_class_attributions(&raw, N).unwrap(), sample_values());
    }

    #[test]
    fn test_single_entry_class_list_uses_that_entry() {
        let raw = RawAttribution::ClassList(vec![ClassArray::Rank2(arr2(&[
            [0.1, -0.2, 0.05, 0.0, 0.15],
            [7.0, 7.0, 7.0, 7.0, 7.0],
        ]))]);
        assert_eq!(positive_class_attributions(&raw, N).unwrap(), sample_values());
    }

    #[test]
    fn test_rank3_slices_instance_then_class_one() {
        // (instance, feature, class): class lane 1 holds the positive values
        let mut tensor = Array3::<f64>::zeros((1, N, 2));
        for (i, value) in sample_values().into_iter().enumerate() {
            tensor[[0, i, 0]] = -value;
            tensor[[0, i, 1]] = value;
        }
        assert_eq!(
            positive_class_attributions(&RawAttribution::Rank3(tensor), N).unwrap(),
            sample_values()
        );
    }

    #[test]
    fn test_rank3_axis_swap_is_caught_by_length_check() {
        // A (instance, class, feature) tensor slices to a class-count-sized
        // vector under our (instance, feature, class) reading. With 2 ≠ 5
        // that surfaces as a length mismatch rather than silent garbage.
        let swapped = Array3::<f64>::zeros((1, 2, N));
        let err = positive_class_attributions(&RawAttribution::Rank3(swapped), N).unwrap_err();
        match err {
            ScoringError::LengthMismatch { got, expected } => {
                assert_eq!(got, 2);
                assert_eq!(expected, 5);
            }
            other => panic!("expected LengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_rank3_without_class_lane_is_unrecognized() {
        let tensor = Array3::<f64>::zeros((1, N, 1));
        let err = positive_class_attributions(&RawAttribution::Rank3(tensor), N).unwrap_err();
        assert!(matches!(err, ScoringError::UnrecognizedShape(_)));
    }

    #[test]
    fn test_rank2_takes_first_row() {
        let raw = RawAttribution::Rank2(arr2(&[
            [0.1, -0.2, 0.05, 0.0, 0.15],
            [9.0, 9.0, 9.0, 9.0, 9.0],
        ]));
        assert_eq!(positive_class_attributions(&raw, N).unwrap(), sample_values());
    }

    #[test]
    fn test_rank1_taken_directly() {
        let raw = RawAttribution::Rank1(arr1(&[0.1, -0.2, 0.05, 0.0, 0.15]));
        assert_eq!(positive_class_attributions(&raw, N).unwrap(), sample_values());
    }

    #[test]
    fn test_empty_class_list_is_unrecognized() {
        let err = positive_class_attributions(&RawAttribution::ClassList(vec![]), N).unwrap_err();
        assert!(matches!(err, ScoringError::UnrecognizedShape(_)));
    }

    #[test]
    fn test_empty_matrix_is_unrecognized() {
        let raw = RawAttribution::Rank2(Array2::<f64>::zeros((0, N)));
        let err = positive_class_attributions(&raw, N).unwrap_err();
        assert!(matches!(err, ScoringError::UnrecognizedShape(_)));
    }

    #[test]
    fn test_length_mismatch_names_both_counts() {
        let raw = RawAttribution::Rank1(arr1(&[0.1, -0.2, 0.05, 0.0]));
        let err = positive_class_attributions(&raw, N).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains('4') && msg.contains('5'), "message was: {}", msg);
    }
}
