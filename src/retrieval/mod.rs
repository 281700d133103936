//! Embedding-ranked passage retrieval.
//!
//! Given a textual query and two pools of pre-embedded passages, [`Retriever`] ranks
//! each pool by cosine similarity to the query embedding, takes a fixed quota from
//! each (exam-style first), and cuts the result to an overall cap.
//!
//! # Policy notes
//!
//! - Passages with no embedding are excluded from ranking, not scored as zero. They
//!   exist in the pool but can never be selected.
//! - Empty or zero-magnitude vectors score `0.0`; mismatched dimensions are an error.
//! - Ties keep the pool's input order.
//! - Scale assumption: pools of tens to low hundreds of passages, ranked with a
//!   linear scan and a full stable sort. There is no index.

pub mod error;
pub mod passage;
pub mod retriever;
pub mod selector;
pub mod similarity;


pub use error::RetrievalError;
pub use passage::{Passage, PoolTag, RetrievalResult, ScoredPassage};
pub use retriever::{RetrievalConfig, Retriever};
pub use selector::select_top_k;
pub use similarity::cosine_similarity;
