//! LeetCode problem fetcher.
//!
//! Uses the public GraphQL endpoint to get a problem's title, statement and
//! starter snippet, then leaves the starter in the solution store. The HTML
//! statement is flattened to plain text for the prompt.

use async_trait::async_trait;
use dsa_core::{DsaError, Language, Problem, ProblemFetcher, Result, SolutionStore};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://leetcode.com/graphql";

const QUESTION_QUERY: &str = r#"query questionData($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    title
    content
    codeSnippets {
      langSlug
      code
    }
  }
}"#;

static BREAK_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>|</p>|</li>|</pre>").expect("valid regex"));
static TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// [`ProblemFetcher`] backed by leetcode.com.
pub struct LeetCodeProblemFetcher {
    client: Client,
    endpoint: String,
    store: Arc<dyn SolutionStore>,
}

impl LeetCodeProblemFetcher {
    pub fn new(store: Arc<dyn SolutionStore>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DsaError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            store,
        })
    }

    /// Overrides the GraphQL endpoint (e.g., a mock server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn query(&self, slug: &str) -> Result<QuestionData> {
        let body = json!({
            "operationName": "questionData",
            "query": QUESTION_QUERY,
            "variables": { "titleSlug": slug },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("Referer", format!("https://leetcode.com/problems/{slug}/"))
            .json(&body)
            .send()
            .await
            .map_err(|e| DsaError::fetch(slug, format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DsaError::fetch(
                slug,
                format!("LeetCode returned {}", response.status()),
            ));
        }

        let parsed: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| DsaError::fetch(slug, format!("unexpected response: {e}")))?;

        parsed
            .data
            .and_then(|data| data.question)
            .ok_or_else(|| DsaError::fetch(slug, "no such problem"))
    }
}

#[async_trait]
impl ProblemFetcher for LeetCodeProblemFetcher {
    async fn fetch(&self, slug: &str, language: &str) -> Result<Problem> {
        let lang = Language::from_tag(language)?;
        tracing::info!("[LeetCode] Fetching '{}' ({})", slug, lang);

        let question = self.query(slug).await?;
        let description = html_to_text(question.content.as_deref().unwrap_or_default());
        let starter = pick_snippet(lang, question.code_snippets.unwrap_or_default());

        self.store
            .write_starter(&question.title, language, &starter)
            .await?;

        Ok(Problem::new(question.title, description))
    }
}

/// LeetCode's `langSlug` values for a language, preferred first.
fn snippet_slugs(language: Language) -> &'static [&'static str] {
    match language {
        Language::Python => &["python3", "python"],
        Language::Go => &["golang"],
    }
}

/// Starter code for `language`, honouring the slug preference order rather
/// than the order LeetCode lists snippets in.
fn pick_snippet(language: Language, snippets: Vec<CodeSnippet>) -> String {
    snippet_slugs(language)
        .iter()
        .find_map(|slug| {
            snippets
                .iter()
                .find(|snippet| snippet.lang_slug == *slug)
                .map(|snippet| snippet.code.clone())
        })
        .unwrap_or_default()
}

/// Flattens a LeetCode HTML statement to plain text.
pub fn html_to_text(html: &str) -> String {
    let text = BREAK_TAGS.replace_all(html, "\n");
    let text = TAGS.replace_all(&text, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    BLANK_LINES.replace_all(text.trim(), "\n\n").into_owned()
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<QuestionWrapper>,
}

#[derive(Deserialize)]
struct QuestionWrapper {
    question: Option<QuestionData>,
}

#[derive(Deserialize)]
struct QuestionData {
    title: String,
    content: Option<String>,
    #[serde(rename = "codeSnippets")]
    code_snippets: Option<Vec<CodeSnippet>>,
}

#[derive(Deserialize)]
struct CodeSnippet {
    #[serde(rename = "langSlug")]
    lang_slug: String,
    code: String,
}
