use futures::Stream;
use std::pin::Pin;
use translate_types::TranslationError;

/// A lazy, finite, non-restartable sequence of decoded text chunks.
///
/// Chunks arrive in wire order; a `translate_stream` caller owns this box
/// and drops it to cancel consumption, but the
/// producing side should additionally honor the
/// [`tokio_util::sync::CancellationToken`] passed into
/// [`crate::Translator::translate_stream`] so that in-flight network I/O is
/// aborted rather than merely ignored.
pub type TranslationStream = Pin<Box<dyn Stream<Item = Result<String, TranslationError>> + Send>>;
