//! The visuals pipeline: anchor extraction, domain detection, address
//! normalization, and the batch validator.
//!
//! This is the component that keeps the generative model honest about what
//! it can visualize. Anchors extracted from the transcript both steer the
//! prompt and bound the validator: every anchor must be covered by a
//! visual's `anchor_quote`, and every `anchor_quote` must occur verbatim in
//! the transcript chunk.

pub mod anchors;
pub mod domains;
pub mod normalize;
pub mod validator;
