//! Store pairs of texts and show how they differ, line by line.
//!
//! Two texts are compared by index: line `n` of the old text against line `n` of the new one, with
//! a character level diff inside each line. A [`DiffService`] keeps submitted pairs in a
//! [`DiffStore`] under a random [`DiffId`] and renders them again on every retrieval.
//!
//! ## Rendering
//!
//! ```
//! use diffkeep::{split_lines, Renderer};
//!
//! let old = split_lines("The cat\nsat on\nthe mat");
//! let new = split_lines("The cat\nsat upon\nthe mat");
//!
//! let renderer = Renderer::default();
//! let full = renderer.render(&old, &new).unwrap();
//! assert_eq!(full.to_string(), " The cat\n-sat on\n+sat upon\n the mat\n");
//!
//! let document = full.document().to_string();
//! assert!(document.starts_with("--- Old\n+++ New\n@@ -1,3 +1,3 @@\n"));
//! ```
//!
//! Which segments end up on each side of a changed line is controlled by [`SegmentPolicy`], and
//! texts with a different number of lines by [`LengthPolicy`].
//!
//! ## Storing
//!
//! ```
//! use diffkeep::{DiffService, ErrorKind, MemoryStore};
//!
//! let service = DiffService::new(MemoryStore::new());
//!
//! let err = service.submit("same", "same").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NoChangeDetected);
//!
//! let submission = service.submit("one\ntwo", "one\nthree").unwrap();
//! let retrieval = service.retrieve(&submission.id.to_string()).unwrap();
//! assert_eq!(retrieval.record.new_text(), "one\nthree");
//! ```

mod diff;
mod error;
mod id;
mod lines;
mod render;
mod service;
mod store;

pub mod config;
pub mod logging;
#[cfg(feature = "server")]
pub mod server;

pub use diff::{diff_chars, LineDiff, Segment};
pub use error::{Error, ErrorKind, Result};
pub use id::{DiffId, IdGenerator, RandomIds};
pub use lines::split_lines;
pub use render::{
    DiffFormatter, DiffLine, LengthMismatch, LengthPolicy, RenderOptions, Renderer, Rendering,
    SegmentPolicy, Side, View,
};
pub use service::{DiffService, Retrieval, Submission};
pub use store::{DiffRecord, DiffStore, FileStore, MemoryStore, StoreError};
