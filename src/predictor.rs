use crate::error::{RecommenderError, Result};
use crate::rating_matrix::{RatingMatrix, UNRATED};
use crate::row_accumulator::RowAccumulator;
use crate::similarity::co_rated_cosine;
use crate::topk::TopK;
use crate::types::SimilarUser;

/// Outcome of a k-nearest-neighbor prediction.
#[derive(Clone, Debug)]
pub struct Prediction {
    /// Similarity-weighted average of the neighbors' ratings, `0.0` when
    /// there was nothing to base it on.
    pub rating: f64,
    /// Other users who rated the target item.
    pub candidates: usize,
    /// The neighbors that entered the average, best first.
    pub neighbors: Vec<SimilarUser>,
}

impl Prediction {

    fn without_basis(candidates: usize, neighbors: Vec<SimilarUser>) -> Self {
        Self { rating: 0.0, candidates, neighbors }
    }

    /// False when the returned `0.0` means "cannot predict": no candidates,
    /// or only candidates with zero similarity.
    pub fn has_basis(&self) -> bool {
        self.neighbors.iter().any(|neighbor| neighbor.similarity != 0.0)
    }
}

/// Predicts how `user` would rate `item` (both 1-based) from the `k` most
/// similar users who rated it.
pub fn predict_rating(matrix: &RatingMatrix, user: i64, item: i64, k: usize) -> Result<f64> {
    predict(matrix, user, item, k).map(|prediction| prediction.rating)
}

/// Like [`predict_rating`], but also reports the neighbors that were used.
///
/// Every other user with a non-zero rating for `item` is a candidate. The
/// candidates are ranked by co-rated cosine similarity with `user` (ties go
/// to the smaller user id), and the best `k` are averaged, weighted by their
/// similarity and normalized by the sum of absolute similarities.
pub fn predict(matrix: &RatingMatrix, user: i64, item: i64, k: usize) -> Result<Prediction> {
    let target = matrix.user_index(user)?;
    let target_item = matrix.item_index(item)?;
    if k == 0 {
        return Err(RecommenderError::OutOfRange {
            field: "k",
            value: 0,
            expected: "at least 1".to_string(),
        });
    }

    let candidates: Vec<(usize, f64)> = match matrix.raters_of(target_item) {
        Some(raters) => raters.iter()
            .filter(|&(other_user, _)| other_user != target)
            .map(|(other_user, &rating)| (other_user, rating))
            .collect(),
        None => Vec::new(),
    };

    if candidates.is_empty() {
        tracing::debug!(user, item, "No other user rated the item");
        return Ok(Prediction::without_basis(0, Vec::new()));
    }

    // One sweep over the target's rated items yields the co-rated sums for
    // every user sharing at least one of them.
    let mut accumulator = RowAccumulator::new(matrix.num_users());
    for (item_index, &own_rating) in matrix.row(target).iter().enumerate() {
        if own_rating == UNRATED {
            continue;
        }
        if let Some(raters) = matrix.raters_of(item_index) {
            for (other_user, &other_rating) in raters.iter() {
                accumulator.add_to(other_user, own_rating, other_rating);
            }
        }
    }

    let mut topk = TopK::new(k);
    for &(other_user, rating) in candidates.iter() {
        topk.offer(SimilarUser::new(other_user, accumulator.similarity(other_user), rating));
    }
    accumulator.clear();

    let neighbors = topk.into_ranked();

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for neighbor in neighbors.iter() {
        numerator += neighbor.similarity * neighbor.rating;
        denominator += neighbor.similarity.abs();
    }

    tracing::debug!(
        user,
        item,
        k,
        candidates = candidates.len(),
        neighbors = neighbors.len(),
        denominator,
        "Aggregated neighbor ratings"
    );

    if denominator == 0.0 {
        return Ok(Prediction::without_basis(candidates.len(), neighbors));
    }

    Ok(Prediction {
        rating: numerator / denominator,
        candidates: candidates.len(),
        neighbors,
    })
}

/// Co-rated cosine similarity between two users, given by 1-based ids.
pub fn user_similarity(matrix: &RatingMatrix, user_a: i64, user_b: i64) -> Result<f64> {
    let a = matrix.user_index(user_a)?;
    let b = matrix.user_index(user_b)?;
    Ok(co_rated_cosine(matrix.row(a), matrix.row(b)))
}
