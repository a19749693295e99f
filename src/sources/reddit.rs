//! Reddit listing source (reddit.com OAuth API).
//!
//! Authenticates as a script app, then pages through a subreddit listing
//! (`/r/all/hot` by default) until enough titles are collected.

use super::PostSource;
use crate::config::{RedditConfig, RedditCredentials};
use crate::error::{ApiFailure, SourceError};
use crate::utils::{check_response_status, create_http_client};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Largest page the listing endpoint serves.
const MAX_PAGE_SIZE: usize = 100;

/// Response from the OAuth token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

/// A listing page.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    title: String,
}

/// Pagination parameters for one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PageRequest {
    /// Fullname of the last post of the previous page.
    after: Option<String>,
    /// Posts wanted from this page.
    limit: usize,
    /// Posts already seen.
    count: usize,
}

/// Reads titles from a subreddit listing.
pub struct RedditSource {
    client: reqwest::Client,
    credentials: RedditCredentials,
    config: RedditConfig,
}

impl RedditSource {
    /// Creates a source authenticating with the given credentials.
    pub fn new(credentials: RedditCredentials, config: RedditConfig) -> Result<Self, SourceError> {
        let client = create_http_client(&credentials.user_agent, config.timeout_sec)?;

        Ok(Self {
            client,
            credentials,
            config,
        })
    }

    fn token_url(&self) -> Result<Url, SourceError> {
        Ok(Url::parse(&self.config.auth_url)?.join("api/v1/access_token")?)
    }

    fn listing_url(&self, page: &PageRequest) -> Result<Url, SourceError> {
        let path = format!("r/{}/{}", self.config.subreddit, self.config.sort);
        let mut url = Url::parse(&self.config.api_url)?.join(&path)?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("limit", &page.limit.to_string())
                .append_pair("count", &page.count.to_string())
                .append_pair("raw_json", "1");
            if let Some(after) = &page.after {
                query.append_pair("after", after);
            }
        }

        Ok(url)
    }

    /// Maps auth failures to [`SourceError::Unauthorized`].
    fn classify(failure: ApiFailure) -> SourceError {
        match failure.status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                SourceError::Unauthorized(failure.to_string())
            }
            _ => SourceError::ApiError(failure),
        }
    }

    /// Urlencoded token request body: a password grant when a user login is
    /// configured, client credentials otherwise.
    fn token_form(&self) -> String {
        let mut form = url::form_urlencoded::Serializer::new(String::new());
        if let Some((username, password)) = self.credentials.user_login() {
            form.append_pair("grant_type", "password")
                .append_pair("username", username)
                .append_pair("password", password);
        } else {
            form.append_pair("grant_type", "client_credentials");
        }
        form.finish()
    }

    /// Requests an application access token.
    async fn authenticate(&self) -> Result<String, SourceError> {
        let body = self.token_form();

        let response = self
            .client
            .post(self.token_url()?)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let response = check_response_status(response)
            .await
            .map_err(Self::classify)?;

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SourceError::ParseError(e.to_string()))?;

        match token {
            TokenResponse {
                access_token: Some(access_token),
                ..
            } => {
                debug!("reddit access token acquired");
                Ok(access_token)
            }
            TokenResponse { error, .. } => Err(SourceError::Unauthorized(
                error.unwrap_or_else(|| "no access token in response".to_string()),
            )),
        }
    }

    async fn fetch_page(&self, token: &str, page: PageRequest) -> Result<Listing, SourceError> {
        let url = self.listing_url(&page)?;
        debug!("fetching listing page {}", url);

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let response = check_response_status(response)
            .await
            .map_err(Self::classify)?;

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| SourceError::ParseError(e.to_string()))?;

        debug!(posts = listing.data.children.len(), "listing page received");
        Ok(listing)
    }
}

/// Pages through a listing until `limit` titles are collected or it runs out.
async fn collect_titles<F, Fut>(limit: usize, mut fetch_page: F) -> Result<Vec<String>, SourceError>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Listing, SourceError>>,
{
    let mut titles = Vec::with_capacity(limit);
    let mut after: Option<String> = None;

    while titles.len() < limit {
        let remaining = limit - titles.len();
        let listing = fetch_page(PageRequest {
            after: after.take(),
            limit: remaining.min(MAX_PAGE_SIZE),
            count: titles.len(),
        })
        .await?;

        let ListingData { children, after: next } = listing.data;
        if children.is_empty() {
            break;
        }
        titles.extend(children.into_iter().take(remaining).map(|c| c.data.title));

        match next {
            Some(next) => after = Some(next),
            None => break,
        }
    }

    Ok(titles)
}

#[async_trait]
impl PostSource for RedditSource {
    fn name(&self) -> &'static str {
        "Reddit"
    }

    async fn fetch_titles(&self, limit: usize) -> Result<Vec<String>, SourceError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let token = self.authenticate().await?;
        let token = token.as_str();
        collect_titles(limit, move |page| self.fetch_page(token, page)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn credentials() -> RedditCredentials {
        RedditCredentials {
            user_agent: "Test Platform:Test App:0.1.0 (by /u/test_user)".to_string(),
            client_id: "client_id".to_string(),
            client_secret: "client_secret_string".to_string(),
            username: None,
            password: None,
        }
    }

    fn source() -> RedditSource {
        RedditSource::new(credentials(), RedditConfig::default()).unwrap()
    }

    /// Builds a listing page whose titles are `"<prefix> <n>"`.
    fn listing(prefix: &str, count: usize, after: Option<&str>) -> Listing {
        Listing {
            data: ListingData {
                children: (0..count)
                    .map(|n| ListingChild {
                        data: PostData {
                            title: format!("{} {}", prefix, n),
                        },
                    })
                    .collect(),
                after: after.map(str::to_string),
            },
        }
    }

    #[test]
    fn test_listing_url() {
        let url = source()
            .listing_url(&PageRequest {
                after: Some("t3_abc".to_string()),
                limit: 100,
                count: 100,
            })
            .unwrap();

        assert_eq!(url.host_str(), Some("oauth.reddit.com"));
        assert_eq!(url.path(), "/r/all/hot");
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(query.contains(&("limit".to_string(), "100".to_string())));
        assert!(query.contains(&("after".to_string(), "t3_abc".to_string())));
        assert!(query.contains(&("raw_json".to_string(), "1".to_string())));
    }

    #[test]
    fn test_token_form() {
        assert_eq!(source().token_form(), "grant_type=client_credentials");

        let mut credentials = credentials();
        credentials.username = Some("bob".to_string());
        credentials.password = Some("p&ss word".to_string());
        let source = RedditSource::new(credentials, RedditConfig::default()).unwrap();
        assert_eq!(
            source.token_form(),
            "grant_type=password&username=bob&password=p%26ss+word"
        );
    }

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn test_requests_are_send() {
        let source = source();
        let auth = source.authenticate();
        assert_send(&auth);
        let fetch = source.fetch_titles(1);
        assert_send(&fetch);
    }

    #[test]
    fn test_token_url() {
        assert_eq!(
            source().token_url().unwrap().as_str(),
            "https://www.reddit.com/api/v1/access_token"
        );
    }

    #[test]
    fn test_parse_listing() {
        let json = r#"{
            "kind": "Listing",
            "data": {
                "after": "t3_xyz",
                "dist": 2,
                "children": [
                    {"kind": "t3", "data": {"title": "A cat & a dog", "score": 10}},
                    {"kind": "t3", "data": {"title": "Second post"}}
                ]
            }
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.data.after.as_deref(), Some("t3_xyz"));
        assert_eq!(listing.data.children[0].data.title, "A cat & a dog");
    }

    #[test]
    fn test_classify_auth_failures() {
        let failure = ApiFailure {
            status: StatusCode::UNAUTHORIZED,
            body: "{}".to_string(),
        };
        assert!(matches!(RedditSource::classify(failure), SourceError::Unauthorized(_)));

        let failure = ApiFailure {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        };
        assert!(matches!(RedditSource::classify(failure), SourceError::ApiError(_)));
    }

    #[tokio::test]
    async fn test_collect_exactly_limit_titles() {
        let requests = RefCell::new(Vec::new());

        let titles = collect_titles(300, |page: PageRequest| {
            requests.borrow_mut().push(page.clone());
            let n = requests.borrow().len();
            async move { Ok(listing(&format!("page{}", n), page.limit, Some("t3_next"))) }
        })
        .await
        .unwrap();

        assert_eq!(titles.len(), 300);
        assert_eq!(titles[0], "page1 0");
        assert_eq!(titles[299], "page3 99");

        let requests = requests.into_inner();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].after, None);
        assert_eq!(requests[1].after.as_deref(), Some("t3_next"));
        assert_eq!(requests[2].count, 200);
        assert!(requests.iter().all(|r| r.limit == 100));
    }

    #[tokio::test]
    async fn test_collect_trims_oversized_page() {
        let titles = collect_titles(3, |_page| async { Ok(listing("post", 5, None)) })
            .await
            .unwrap();
        assert_eq!(titles, vec!["post 0", "post 1", "post 2"]);
    }

    #[tokio::test]
    async fn test_collect_stops_when_listing_runs_out() {
        let titles = collect_titles(250, |page: PageRequest| async move {
            match page.after {
                None => Ok(listing("first", 100, Some("t3_a"))),
                Some(_) => Ok(listing("last", 20, None)),
            }
        })
        .await
        .unwrap();
        assert_eq!(titles.len(), 120);
    }

    #[tokio::test]
    async fn test_collect_propagates_errors() {
        let result = collect_titles(10, |_page| async {
            Err(SourceError::Unauthorized("bad credentials".to_string()))
        })
        .await;
        assert!(matches!(result, Err(SourceError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_zero_limit_makes_no_requests() {
        assert!(source().fetch_titles(0).await.unwrap().is_empty());
    }
}
