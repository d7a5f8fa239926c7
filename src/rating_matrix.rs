use std::collections::BTreeMap;

use sprs::{CsMat, CsVecView, TriMat};

use crate::error::{RecommenderError, Result};
use crate::types::{MatrixStats, Observation};

/// Value stored in every cell nobody rated.
pub const UNRATED: f64 = 0.0;

/// Dense user x item rating matrix, built once and read-only afterwards.
///
/// Row `u` holds the ratings of user id `u + 1`, column `i` those of item id
/// `i + 1`. A `0.0` cell means "unrated"; a genuine rating of zero cannot be
/// told apart from a missing one.
///
/// Next to the dense cells the matrix keeps a compressed sparse column copy of
/// the non-zero ratings, so the users who rated a given item can be listed
/// without scanning every row.
#[derive(Clone, Debug)]
pub struct RatingMatrix {
    num_users: usize,
    num_items: usize,
    ratings: Vec<f64>,
    raters: CsMat<f64>,
}

impl RatingMatrix {

    /// Builds the matrix from raw observations.
    ///
    /// The first pass deduplicates `(user, item)` pairs with last-write-wins
    /// and tracks the largest user and item ids, the latter across all users.
    /// The second pass materializes the dense matrix and the sparse column
    /// view. Nothing is returned unless every observation is valid.
    pub fn build<'a, I>(observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let mut latest: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        let mut num_users: usize = 0;
        let mut num_items: usize = 0;
        let mut num_cells: usize = 0;
        // The observation that last grew the matrix, blamed if allocation fails.
        let mut widest: Option<(usize, &Observation)> = None;

        for (index, observation) in observations.into_iter().enumerate() {
            let (user, item) = validate(index, observation)?;
            if user >= num_users || item >= num_items {
                num_users = num_users.max(user + 1);
                num_items = num_items.max(item + 1);
                num_cells = dense_len(num_users, num_items)
                    .ok_or_else(|| invalid_identifier(index, observation))?;
                widest = Some((index, observation));
            }
            latest.insert((user, item), observation.rating);
        }

        let (widest_index, widest_observation) = match widest {
            Some(widest) => widest,
            None => return Err(RecommenderError::EmptyDataset),
        };

        let mut ratings: Vec<f64> = Vec::new();
        ratings.try_reserve_exact(num_cells)
            .map_err(|_| invalid_identifier(widest_index, widest_observation))?;
        ratings.resize(num_cells, UNRATED);
        let mut triplets = TriMat::new((num_users, num_items));

        for (&(user, item), &rating) in latest.iter() {
            ratings[user * num_items + item] = rating;
            if rating != UNRATED {
                triplets.add_triplet(user, item, rating);
            }
        }

        let raters: CsMat<f64> = triplets.to_csc();

        tracing::debug!(
            num_users,
            num_items,
            num_ratings = raters.nnz(),
            "Built rating matrix"
        );

        Ok(Self { num_users, num_items, ratings, raters })
    }

    pub fn stats(&self) -> MatrixStats {
        MatrixStats {
            num_users: self.num_users,
            num_items: self.num_items,
            num_ratings: self.raters.nnz(),
        }
    }

    pub fn num_users(&self) -> usize {
        self.num_users
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// Rating of the 0-based `(user, item)` cell, `0.0` when unrated.
    pub fn rating(&self, user: usize, item: usize) -> f64 {
        self.ratings[user * self.num_items + item]
    }

    /// The dense row of a 0-based user index.
    pub fn row(&self, user: usize) -> &[f64] {
        let start = user * self.num_items;
        &self.ratings[start..start + self.num_items]
    }

    /// Users (0-based, ascending) with a non-zero rating for a 0-based item.
    pub(crate) fn raters_of(&self, item: usize) -> Option<CsVecView<'_, f64>> {
        self.raters.outer_view(item)
    }

    /// Maps a 1-based user id to its row, failing with `OutOfRange`.
    pub fn user_index(&self, user: i64) -> Result<usize> {
        to_index(user, self.num_users)
            .ok_or_else(|| RecommenderError::out_of_range("user", user, self.num_users))
    }

    /// Maps a 1-based item id to its column, failing with `OutOfRange`.
    pub fn item_index(&self, item: i64) -> Result<usize> {
        to_index(item, self.num_items)
            .ok_or_else(|| RecommenderError::out_of_range("item", item, self.num_items))
    }
}

fn to_index(id: i64, len: usize) -> Option<usize> {
    usize::try_from(id).ok()
        .filter(|&id| id >= 1 && id <= len)
        .map(|id| id - 1)
}

/// Number of dense cells, if their byte size stays addressable.
fn dense_len(num_users: usize, num_items: usize) -> Option<usize> {
    num_users.checked_mul(num_items)
        .filter(|&cells| {
            cells.checked_mul(std::mem::size_of::<f64>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
}

fn invalid_identifier(index: usize, observation: &Observation) -> RecommenderError {
    RecommenderError::InvalidIdentifier {
        index,
        user: observation.user,
        item: observation.item,
        rating: observation.rating,
    }
}

fn validate(index: usize, observation: &Observation) -> Result<(usize, usize)> {
    let invalid = || invalid_identifier(index, observation);

    if !observation.rating.is_finite() {
        return Err(invalid());
    }

    let user = usize::try_from(observation.user).ok().filter(|&id| id >= 1).ok_or_else(invalid)?;
    let item = usize::try_from(observation.item).ok().filter(|&id| id >= 1).ok_or_else(invalid)?;

    Ok((user - 1, item - 1))
}
