//! The filter/facet query core: classifier, token parser, selection state,
//! predicate builder, facet counter, paginator/sorter, and result projector.
//! Everything here is a pure function over request inputs and documents.

pub mod dimension;
pub mod facets;
pub mod filter;
pub mod page;
pub mod project;
pub mod selection;
pub mod time_bucket;
pub mod tokens;
