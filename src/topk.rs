use std::collections::BinaryHeap;

use crate::types::SimilarUser;

/// Bounded heap holding the `k` best neighbors seen so far.
///
/// `SimilarUser` orders better entries first, so the max-heap keeps the
/// weakest retained neighbor at its root, ready to be displaced.
pub(crate) struct TopK {
    heap: BinaryHeap<SimilarUser>,
    k: usize,
}

impl TopK {

    pub(crate) fn new(k: usize) -> Self {
        Self { heap: BinaryHeap::with_capacity(k), k }
    }

    /// Offers a neighbor, displacing the weakest one once `k` are held.
    pub(crate) fn offer(&mut self, offered_entry: SimilarUser) {
        if self.heap.len() < self.k {
            self.heap.push(offered_entry);
            return
        }

        if let Some(mut top) = self.heap.peek_mut() {
            if offered_entry < *top {
                *top = offered_entry;
            }
        }
    }

    /// The retained neighbors, best first.
    pub(crate) fn into_ranked(self) -> Vec<SimilarUser> {
        self.heap.into_sorted_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_best_k() {

        let mut topk = TopK::new(3);
        topk.offer(SimilarUser::new(1, 1.0, 4.0));
        topk.offer(SimilarUser::new(2, 0.8, 3.0));
        topk.offer(SimilarUser::new(3, 0.5, 2.0));

        topk.offer(SimilarUser::new(4, 0.9, 5.0));
        topk.offer(SimilarUser::new(5, 0.1, 1.0));

        let n = topk.into_ranked();
        assert_eq!(n.len(), 3);
        check_entry(&n[0], 1, 1.0);
        check_entry(&n[1], 4, 0.9);
        check_entry(&n[2], 2, 0.8);
    }

    #[test]
    fn test_weaker_entry_does_not_displace() {

        let mut topk = TopK::new(1);
        topk.offer(SimilarUser::new(3, 0.6, 2.0));
        topk.offer(SimilarUser::new(1, 0.2, 4.0));
        topk.offer(SimilarUser::new(8, 0.6, 5.0));

        let n = topk.into_ranked();
        assert_eq!(n.len(), 1);
        check_entry(&n[0], 3, 0.6);
    }

    #[test]
    fn test_not_full() {

        let mut topk = TopK::new(5);
        topk.offer(SimilarUser::new(3, 0.5, 2.0));
        topk.offer(SimilarUser::new(1, 1.0, 4.0));

        let n = topk.into_ranked();
        assert_eq!(n.len(), 2);
        check_entry(&n[0], 1, 1.0);
        check_entry(&n[1], 3, 0.5);
    }

    #[test]
    fn test_equal_similarity_prefers_smaller_user() {

        let mut topk = TopK::new(2);
        topk.offer(SimilarUser::new(6, 0.7, 1.0));
        topk.offer(SimilarUser::new(4, 0.7, 1.0));

        topk.offer(SimilarUser::new(2, 0.7, 1.0));
        topk.offer(SimilarUser::new(9, 0.7, 1.0));

        let n = topk.into_ranked();
        check_entry(&n[0], 2, 0.7);
        check_entry(&n[1], 4, 0.7);
    }

    #[test]
    fn test_negative_similarities_rank_last() {

        let mut topk = TopK::new(2);
        topk.offer(SimilarUser::new(0, -0.5, 1.0));
        topk.offer(SimilarUser::new(1, 0.0, 1.0));
        topk.offer(SimilarUser::new(2, 0.3, 1.0));

        let n = topk.into_ranked();
        check_entry(&n[0], 2, 0.3);
        check_entry(&n[1], 1, 0.0);
    }

    fn check_entry(entry: &SimilarUser, expected_user: usize, expected_similarity: f64) {
        assert_eq!(entry.user, expected_user);
        assert!((entry.similarity - expected_similarity).abs() < 0.0001);
    }
}
