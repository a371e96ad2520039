use super::dto::{NewsDigest, NewsHeadline};
use crate::common::error::{AppError, AppResult};
use crate::state::AppState;
use std::time::Duration;
use tracing::info;

const NEWS_CACHE_KEY: &str = "latest_news";
const NEWS_TTL: Duration = Duration::from_secs(8 * 60 * 60);

const HEADLINE_COUNT: u8 = 10;

pub struct NewsService;

impl NewsService {
    /// Current digest, served from the cache while fresh.
    pub async fn latest(state: AppState) -> AppResult<NewsDigest> {
        let llm = state.llm.clone();
        state
            .news_cache
            .get_or_refresh(NEWS_CACHE_KEY, NEWS_TTL, || async move {
                let digest = fetch_digest(&llm).await?;
                Ok(digest)
            })
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))
    }

    /// Force a re-fetch, replacing whatever the cache holds.
    pub async fn refresh(state: AppState) -> AppResult<NewsDigest> {
        let llm = state.llm.clone();
        let digest = state
            .news_cache
            .refresh(NEWS_CACHE_KEY, NEWS_TTL, || async move {
                let digest = fetch_digest(&llm).await?;
                Ok(digest)
            })
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;
        info!(headlines = digest.headlines.len(), "news digest refreshed");
        Ok(digest)
    }
}

async fn fetch_digest(llm: &crate::providers::llm::LlmClient) -> anyhow::Result<NewsDigest> {
    let prompt = format!(
        "List {HEADLINE_COUNT} current trending news stories that would make good \
         material for comedic parody. One story per line, in the exact format:\n\
         Title :: one-sentence summary\n\
         No numbering, no extra commentary."
    );
    let raw = llm
        .chat("You curate trending news for comedy writers.", &prompt)
        .await?;

    let digest = parse_digest(&raw);
    if digest.headlines.is_empty() {
        anyhow::bail!("news model returned no parseable headlines");
    }
    Ok(digest)
}

fn parse_digest(raw: &str) -> NewsDigest {
    let headlines = raw
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let (title, summary) = match line.split_once("::") {
                Some((title, summary)) => (title.trim(), summary.trim()),
                None => (line, ""),
            };
            if title.is_empty() {
                return None;
            }
            Some(NewsHeadline {
                title: title.to_string(),
                summary: summary.to_string(),
            })
        })
        .collect();
    NewsDigest { headlines }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_title_and_summary_pairs() {
        let digest = parse_digest(
            "Moon base opens gift shop :: The first lunar retail outlet sells regolith snow globes.\n\
             \n\
             Parliament debates sandwich tax :: A proposed levy on lunch splits the coalition.",
        );
        assert_eq!(digest.headlines.len(), 2);
        assert_eq!(digest.headlines[0].title, "Moon base opens gift shop");
        assert!(digest.headlines[1].summary.contains("levy on lunch"));
    }

    #[test]
    fn line_without_separator_becomes_bare_title() {
        let digest = parse_digest("Just a headline with no summary");
        assert_eq!(digest.headlines.len(), 1);
        assert_eq!(digest.headlines[0].title, "Just a headline with no summary");
        assert!(digest.headlines[0].summary.is_empty());
    }

    #[test]
    fn blank_output_yields_empty_digest() {
        assert!(parse_digest("\n  \n").headlines.is_empty());
    }
}
