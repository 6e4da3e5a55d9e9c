//! Recipe catalog query library.
//!
//! The core of a Lithuanian recipe site backend: given a page scope (category,
//! subcategory, or tag), a serialized facet-filter expression, an optional
//! free-text query, and pagination/sort parameters, it produces a filtered,
//! sorted, paginated result set together with facet counts for the
//! available-filter UI — with counts and applied filters kept consistent.
//!
//! The document store is an injected [`StoreClient`] with an explicit
//! connect/close lifecycle owned by the process entry point; every request is
//! processed statelessly from its inputs.

pub mod catalog;
pub mod error;
pub mod listing;
pub mod query;
pub mod suggest;
pub mod types;

pub use catalog::store::{StoreClient, StoreConfig};
pub use error::{CatalogError, Result};
pub use listing::{run_listing, ListingOutcome, ListingParams};
pub use query::dimension::Dimension;
pub use query::selection::FilterSelection;
pub use query::time_bucket::TimeBucket;
pub use types::{Localized, RecipeDoc, ScopeFilter};
