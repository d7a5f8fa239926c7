use crate::rating_matrix::UNRATED;

/// Cosine similarity of two users over the items both of them rated.
///
/// Only positions where both rows are non-zero contribute, to the dot product
/// as well as to the two sums of squares. Without such an overlap the
/// similarity is `0.0`.
pub fn co_rated_cosine(a: &[f64], b: &[f64]) -> f64 {
    let mut dot_product = 0.0;
    let mut sum_of_squares_a = 0.0;
    let mut sum_of_squares_b = 0.0;

    for (&value_a, &value_b) in a.iter().zip(b.iter()) {
        if value_a != UNRATED && value_b != UNRATED {
            dot_product += value_a * value_b;
            sum_of_squares_a += value_a * value_a;
            sum_of_squares_b += value_b * value_b;
        }
    }

    cosine_from_sums(dot_product, sum_of_squares_a, sum_of_squares_b)
}

pub(crate) fn cosine_from_sums(dot_product: f64, sum_of_squares_a: f64, sum_of_squares_b: f64) -> f64 {
    if sum_of_squares_a == 0.0 || sum_of_squares_b == 0.0 {
        return 0.0;
    }

    let similarity = dot_product / (sum_of_squares_a.sqrt() * sum_of_squares_b.sqrt());
    // Overflowing sums end up as inf / inf.
    if similarity.is_finite() { similarity } else { 0.0 }
}
