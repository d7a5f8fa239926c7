//! Memory-based collaborative filtering: predicts a user's rating for an item
//! as the similarity-weighted average over the k most similar users who rated
//! it, with cosine similarity restricted to co-rated items.
//!
//! A [`RatingMatrix`] is built once from the observations and never mutated,
//! so predictions may run concurrently against a shared reference.

pub mod config;
pub mod error;
pub mod ingest;
pub mod predictor;
pub mod rating_matrix;
pub mod similarity;
pub mod types;

mod row_accumulator;
mod topk;

pub use error::{RecommenderError, Result};
pub use predictor::{predict, predict_rating, user_similarity, Prediction};
pub use rating_matrix::RatingMatrix;
pub use types::{MatrixStats, Observation, SimilarUser};
