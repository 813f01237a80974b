//! Shared logic that every provider family would otherwise duplicate:
//! collapsing a stream into a single non-streaming result, the word-vs-
//! sentence heuristic that decides whether a dictionary lookup is
//! worthwhile, and mapping `reqwest` failures onto [`translate_types::ErrorKind`].

pub mod collapse;
pub mod transport_error;
pub mod word_query;

pub use collapse::{collapse_stream, trim_and_unquote};
pub use transport_error::{map_transport_error, parse_retry_after, status_to_kind};
pub use word_query::looks_like_word_query;
