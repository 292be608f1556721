use crate::Result;

use futures::{future, stream, StreamExt, TryStreamExt};
use std::future::Future;

/// Run `futures` concurrently, keeping at most `limit` in flight.
///
/// Resolves once every future succeeded, with outputs in input order, or
/// with the first error. Futures still pending when an error arrives are
/// dropped.
pub(crate) async fn try_join<I, F, T>(limit: Option<usize>, futures: I) -> Result<Vec<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T>>,
{
    match limit {
        None => future::try_join_all(futures).await,
        Some(limit) => {
            stream::iter(futures)
                .buffered(limit.max(1))
                .try_collect()
                .await
        }
    }
}
