use std::cmp::Ordering;
use std::fmt;

/// A single `(user, item, rating)` triple as it arrives from the ratings file.
///
/// Identifiers are 1-based. They are kept signed so that a zero or negative id
/// reaches the builder and can be rejected there instead of wrapping around.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    pub user: i64,
    pub item: i64,
    pub rating: f64,
}

impl Observation {
    pub fn new(user: i64, item: i64, rating: f64) -> Self {
        Self { user, item, rating }
    }
}

/// A neighbor of the target user, with its similarity and its rating for the
/// target item. `user` is the 0-based row index.
///
/// The ordering is "better first": higher similarity sorts before lower, and
/// equal similarities fall back to the smaller user index. A max-heap of
/// `SimilarUser` therefore keeps its weakest entry at the top.
#[derive(Clone, Copy, Debug)]
pub struct SimilarUser {
    pub user: usize,
    pub similarity: f64,
    pub rating: f64,
}

impl SimilarUser {
    pub fn new(user: usize, similarity: f64, rating: f64) -> Self {
        Self { user, similarity, rating }
    }

    /// 1-based id of this neighbor, as used in the ratings file.
    pub fn user_id(&self) -> i64 {
        self.user as i64 + 1
    }
}

impl Ord for SimilarUser {
    fn cmp(&self, other: &Self) -> Ordering {
        other.similarity.total_cmp(&self.similarity)
            .then_with(|| self.user.cmp(&other.user))
    }
}

impl PartialOrd for SimilarUser {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SimilarUser {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimilarUser {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatrixStats {
    pub num_users: usize,
    pub num_items: usize,
    /// Cells holding a non-zero rating.
    pub num_ratings: usize,
}

impl fmt::Display for MatrixStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of Users: {}", self.num_users)?;
        write!(f, "Number of Items: {}", self.num_items)
    }
}
