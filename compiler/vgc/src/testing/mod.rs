//! Test infrastructure for driving the pipeline without a real parser.
//!
//! - **mocks**: an in-memory [`Frontend`](vg_frontend::Frontend) and
//!   declaration-tree builders
//!
//! # Usage
//!
//! ```ignore
//! use vgc::testing::mocks::{public, tagged, MockFrontend, VISITOR_TAG};
//!
//! let mut frontend = MockFrontend::new()
//!     .with_file("point.hpp", tagged(VISITOR_TAG, "Point", vec![public("x", "int")]));
//! ```

pub mod mocks;
