//! Context vector assembly.
//!
//! The learner's context is the concatenation of two one-hot encodings:
//! `one-hot(topic) ++ one-hot(cohort)`, a dense vector of fixed dimension
//! [`CONTEXT_DIM`]. The learner itself imposes no structure beyond the fixed
//! length; this module is the only place the encoding is defined.

use crate::types::{Cohort, Topic};
use ndarray::Array1;

/// Dimension of the encoded context vector.
pub const CONTEXT_DIM: usize = Topic::ALL.len() + Cohort::ALL.len();

pub fn topic_to_vec(topic: Topic) -> Array1<f64> {
    let mut vec = Array1::zeros(Topic::ALL.len());
    vec[topic.index()] = 1.0;
    vec
}

pub fn cohort_to_vec(cohort: Cohort) -> Array1<f64> {
    let mut vec = Array1::zeros(Cohort::ALL.len());
    vec[cohort.index()] = 1.0;
    vec
}

/// Encode a (topic, cohort) pair as the learner's context vector.
pub fn encode_context(topic: Topic, cohort: Cohort) -> Array1<f64> {
    let mut vec = Array1::zeros(CONTEXT_DIM);
    vec[topic.index()] = 1.0;
    vec[Topic::ALL.len() + cohort.index()] = 1.0;
    vec
}
