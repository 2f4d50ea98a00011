//! Image lookup backends.
//!
//! An [`ImageSource`] turns a query into candidate image references and never
//! fails: link-resolving sources fall back to deterministic suggestions.

pub(crate) mod source;
pub(crate) mod suggestion;
pub(crate) mod unsplash;

pub use source::{ImageBank, ImageSource, ImageSourceFactory};
pub use suggestion::{SuggestionSource, SUGGESTIONS};
pub use unsplash::UnsplashSource;
