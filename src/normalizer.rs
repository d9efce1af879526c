use crate::model::{PreprocessedData, RawMarketData};

/// Only the first results of a web search are worth prompting with.
pub const MAX_SEARCH_RESULTS: usize = 20;

/// Flattens raw collector output into prompt-ready text fields.
pub fn preprocess(raw: &RawMarketData) -> PreprocessedData {
    PreprocessedData {
        news: extract_news(raw),
        search_results: join_search_results(raw),
    }
}

fn extract_news(raw: &RawMarketData) -> Vec<String> {
    raw.news_articles
        .iter()
        .filter_map(|article| match article.description.as_deref() {
            Some(description) if !description.is_empty() => {
                Some(format!("{}: {}", article.title, description))
            }
            _ => None,
        })
        .collect()
}

fn join_search_results(raw: &RawMarketData) -> String {
    raw.search_results
        .iter()
        .take(MAX_SEARCH_RESULTS)
        .map(|r| format!("{}: {}", r.title, r.snippet))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewsArticle, SearchResult};
    use proptest::prelude::*;

    fn article(title: &str, description: Option<&str>) -> NewsArticle {
        NewsArticle {
            title: title.into(),
            description: description.map(Into::into),
        }
    }

    #[test]
    fn drops_articles_without_description() {
        let raw = RawMarketData {
            news_articles: vec![
                article("BYD expands", Some("New plant in Hungary")),
                article("No body", None),
                article("Empty body", Some("")),
            ],
            search_results: vec![],
        };
        let data = preprocess(&raw);
        assert_eq!(data.news, vec!["BYD expands: New plant in Hungary".to_string()]);
        assert_eq!(data.search_results, "");
    }

    #[test]
    fn keeps_only_first_twenty_search_results() {
        let raw = RawMarketData {
            news_articles: vec![],
            search_results: (0..25)
                .map(|i| SearchResult {
                    title: format!("t{i}"),
                    snippet: format!("s{i}"),
                })
                .collect(),
        };
        let data = preprocess(&raw);
        let lines: Vec<&str> = data.search_results.split('\n').collect();
        assert_eq!(lines.len(), MAX_SEARCH_RESULTS);
        assert_eq!(lines[0], "t0: s0");
        assert_eq!(lines[19], "t19: s19");
    }

    #[test]
    fn empty_input_is_total() {
        assert_eq!(preprocess(&RawMarketData::default()), PreprocessedData::default());
    }

    proptest! {
        #[test]
        fn never_gains_news_items(
            articles in proptest::collection::vec(
                ("[a-z]{0,8}", proptest::option::of("[a-z]{0,8}")),
                0..40,
            )
        ) {
            let raw = RawMarketData {
                news_articles: articles
                    .into_iter()
                    .map(|(title, description)| NewsArticle { title, description })
                    .collect(),
                search_results: vec![],
            };
            let data = preprocess(&raw);
            prop_assert!(data.news.len() <= raw.news_articles.len());
        }
    }
}
