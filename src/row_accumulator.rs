use crate::similarity::cosine_from_sums;

/// Sparse accumulator over all users, holding the partial co-rated cosine
/// sums of one target user against every other user it shares an item with.
///
/// Touched users are chained into an intrusive linked list through
/// `non_zeros`, so clearing costs only as much as the users that were touched.
pub(crate) struct RowAccumulator {
    dot_products: Vec<f64>,
    own_squares: Vec<f64>,
    other_squares: Vec<f64>,
    non_zeros: Vec<isize>,
    head: isize,
}

const NONE: f64 = 0.0;
const NOT_OCCUPIED: isize = -1;
const NO_HEAD: isize = -2;

impl RowAccumulator {

    pub(crate) fn new(num_users: usize) -> Self {
        RowAccumulator {
            dot_products: vec![NONE; num_users],
            own_squares: vec![NONE; num_users],
            other_squares: vec![NONE; num_users],
            non_zeros: vec![NOT_OCCUPIED; num_users],
            head: NO_HEAD,
        }
    }

    /// Records one co-rated item: `own_value` is the target's rating,
    /// `other_value` the rating of `other_user` for the same item.
    pub(crate) fn add_to(&mut self, other_user: usize, own_value: f64, other_value: f64) {
        self.dot_products[other_user] += own_value * other_value;
        self.own_squares[other_user] += own_value * own_value;
        self.other_squares[other_user] += other_value * other_value;

        if self.non_zeros[other_user] == NOT_OCCUPIED {
            self.non_zeros[other_user] = self.head;
            self.head = other_user as isize;
        }
    }

    /// Similarity accumulated so far for `other_user`, zero if never touched.
    pub(crate) fn similarity(&self, other_user: usize) -> f64 {
        cosine_from_sums(
            self.dot_products[other_user],
            self.own_squares[other_user],
            self.other_squares[other_user],
        )
    }

    pub(crate) fn clear(&mut self) {
        while self.head != NO_HEAD {
            let other_user = self.head as usize;

            self.head = self.non_zeros[other_user];
            self.dot_products[other_user] = NONE;
            self.own_squares[other_user] = NONE;
            self.other_squares[other_user] = NONE;
            self.non_zeros[other_user] = NOT_OCCUPIED;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_per_user() {

        let mut accumulator = RowAccumulator::new(3);
        accumulator.add_to(1, 5.0, 4.0);
        accumulator.add_to(1, 3.0, 3.0);
        accumulator.add_to(2, 3.0, 5.0);

        assert_eq!(accumulator.similarity(0), 0.0);
        assert!((accumulator.similarity(1) - 0.99469179).abs() < 0.0001);
        assert!((accumulator.similarity(2) - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_clear_resets_touched_users() {

        let mut accumulator = RowAccumulator::new(4);
        accumulator.add_to(3, 1.0, 2.0);
        accumulator.add_to(0, 2.0, 1.0);
        accumulator.clear();

        assert_eq!(accumulator.head, NO_HEAD);
        for user in 0..4 {
            assert_eq!(accumulator.similarity(user), 0.0);
            assert_eq!(accumulator.non_zeros[user], NOT_OCCUPIED);
        }

        accumulator.add_to(3, 1.0, 1.0);
        assert!((accumulator.similarity(3) - 1.0).abs() < 0.0001);
    }
}
