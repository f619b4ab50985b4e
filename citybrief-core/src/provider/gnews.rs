use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::ProviderError,
    model::{Headlines, NewsArticle},
};

use super::{NewsSource, get_json_any_status, require};

const SERVICE: &str = "GNews";

/// Number of articles kept from a search, in upstream order.
pub const MAX_HEADLINES: usize = 3;

/// GNews search API client. Language and country are fixed to English / US.
#[derive(Clone)]
pub struct GNewsProvider {
    api_key: String,
    url: String,
    http: Client,
}

impl std::fmt::Debug for GNewsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GNewsProvider").field("url", &self.url).finish_non_exhaustive()
    }
}

impl GNewsProvider {
    pub fn new(api_key: String, url: String) -> Self {
        Self {
            api_key,
            url,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GnSearchResponse {
    articles: Option<Vec<GnArticle>>,
}

#[derive(Debug, Deserialize)]
struct GnArticle {
    title: Option<String>,
    url: Option<String>,
}

impl GnSearchResponse {
    fn into_headlines(self) -> Result<Headlines, ProviderError> {
        let Some(articles) = self.articles else {
            return Ok(Headlines::Missing);
        };

        let kept = articles
            .into_iter()
            .take(MAX_HEADLINES)
            .map(|article| {
                Ok(NewsArticle {
                    title: require(article.title, SERVICE, "title")?,
                    url: require(article.url, SERVICE, "url")?,
                })
            })
            .collect::<Result<Vec<_>, ProviderError>>()?;

        Ok(Headlines::Found(kept))
    }
}

#[async_trait]
impl NewsSource for GNewsProvider {
    #[instrument(skip(self))]
    async fn headlines(&self, query: &str) -> Result<Headlines, ProviderError> {
        let parsed: GnSearchResponse = get_json_any_status(
            &self.http,
            SERVICE,
            &self.url,
            &[
                ("q", query),
                ("lang", "en"),
                ("max", "10"),
                ("country", "us"),
                ("token", self.api_key.as_str()),
            ],
        )
        .await?;

        let headlines = parsed.into_headlines()?;
        debug!(count = headlines.articles().len(), "news search finished");
        Ok(headlines)
    }
}
