//! Common utilities for integration tests
#![allow(dead_code)]

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{FailingTracer, LayeredModel, MockElement, MockInhom, StraightTracer};
pub use test_helpers::{
    assert_bbox_close,
    hlines,
    leaky_top_stack,
    mixed_stack,
    single_aquifer,
    spans,
    texts,
};
