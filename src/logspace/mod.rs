//! Log-space arithmetic: stable log-sum-exp, the softmax family built on it, and a
//! naive Bayes classifier that scores in log space.
pub mod lse;
pub mod softmax;
pub mod sample;
pub mod naive_bayes;

pub use naive_bayes::NaiveBayes;
pub use lse::{log_add_exp, log_sum_exp};
pub use sample::sample_categorical;
pub use softmax::{log_softmax, naive_softmax, softmax, softmax_with_temperature};
