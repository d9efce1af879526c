use crate::model::{Chunk, PreprocessedData};

pub const DEFAULT_MAX_ITEMS: usize = 5;
pub const MAX_NEWS_ITEMS: usize = 20;
pub const MAX_SEARCH_LINES: usize = 10;

/// Splits preprocessed data into prompt-sized chunks, news first.
///
/// News items are only emitted in full batches of `max_items`; a trailing
/// partial batch is dropped. Search lines always keep their remainder batch.
/// The asymmetry is kept for compatibility with existing reports.
///
/// Search text is split on `\n` only, so empty text still yields one search
/// chunk holding a single empty line.
pub fn chunk_data(data: &PreprocessedData, max_items: usize) -> Vec<Chunk> {
    let max_items = max_items.max(1);

    let news = data
        .news
        .iter()
        .take(MAX_NEWS_ITEMS)
        .cloned()
        .collect::<Vec<_>>();
    let mut chunks: Vec<Chunk> = news
        .chunks_exact(max_items)
        .map(|batch| Chunk::News(batch.to_vec()))
        .collect();

    let lines: Vec<String> = data
        .search_results
        .split('\n')
        .take(MAX_SEARCH_LINES)
        .map(str::to_owned)
        .collect();
    chunks.extend(
        lines
            .chunks(max_items)
            .map(|batch| Chunk::SearchResults(batch.to_vec())),
    );

    chunks
}
