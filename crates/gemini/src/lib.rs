use anyhow::{Context, Result};
use reqwest::Client as Http;
use serde_json::{json, Value};

use protocol::{AnalysisError, AnalysisRequest, AnalysisResult};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone, Debug)]
pub struct Client {
    http: Http,
    api_key: String,
    model: String,
    base_url: String,
}

impl Client {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Ok(Self {
            http: Http::builder().pool_max_idle_per_host(8).build()?,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Convenience: pick up GEMINI_API_KEY from env.
    pub fn from_env(model: &str) -> Result<Self> {
        let key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY not set")?;
        Self::new(key, model.to_string())
    }

    /// Runs one deep analysis. Transport problems come back as
    /// `AnalysisError::Network`, everything the service itself gets wrong as
    /// `AnalysisError::Service`.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let mut parts = vec![json!({ "text": build_prompt(request) })];
        if let Some(image) = &request.image_base64 {
            parts.push(json!({
                "inline_data": {
                    "mime_type": "image/png",
                    "data": strip_data_url(image),
                }
            }));
        }
        let body = json!({
            "contents": [{ "parts": parts }],
            "generationConfig": { "temperature": 0.2 }
        });

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(AnalysisError::Service(format!("gemini {}: {}", status, text)));
        }

        let v: Value = resp
            .json()
            .await
            .map_err(|e| AnalysisError::Service(format!("invalid json: {}", e)))?;
        let text = v
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|x| x.as_str())
            .ok_or_else(|| {
                AnalysisError::Service("missing candidates[0].content.parts[0].text".into())
            })?;

        let (summary, detail) = split_analysis(text);
        Ok(AnalysisResult::new(
            request.term.as_str(),
            request.context.as_str(),
            summary,
            detail,
        ))
    }
}

fn build_prompt(request: &AnalysisRequest) -> String {
    let mut prompt = format!(
        "You are a lexical analyst. Provide a deep analysis of the term \"{}\" \
         as it is used in the following context:\n\n{}\n\n\
         Start with a single-line summary, then the full analysis: literal \
         meaning, figurative meaning, register, and a usage example.",
        request.term, request.context
    );
    if request.image_base64.is_some() {
        prompt.push_str("\n\nAn image with additional visual context is attached.");
    }
    prompt
}

/// First non-empty line becomes the summary; the whole text stays as detail.
fn split_analysis(text: &str) -> (&str, &str) {
    let summary = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("Analysis ready");
    (summary, text)
}

/// Accepts either bare base64 or a browser-style data URL.
fn strip_data_url(data: &str) -> &str {
    match data.split_once("base64,") {
        Some((_, rest)) => rest,
        None => data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_mentions_term_and_context() {
        let request = AnalysisRequest::new("Silver Lining", "a dark cloud", None);
        let prompt = build_prompt(&request);
        assert!(prompt.contains("Silver Lining"));
        assert!(prompt.contains("a dark cloud"));
        assert!(!prompt.contains("image"));
    }

    #[test]
    fn summary_is_first_nonempty_line() {
        let (summary, detail) = split_analysis("\n  A hopeful aspect.\nMore detail here.");
        assert_eq!(summary, "A hopeful aspect.");
        assert!(detail.contains("More detail here."));
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        assert_eq!(strip_data_url("data:image/png;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_url("QUJD"), "QUJD");
    }

    // Requires GEMINI_API_KEY; run with --ignored against the live service.
    #[tokio::test]
    #[ignore]
    async fn live_analyze() {
        dotenv::dotenv().ok();
        let client = Client::from_env("gemini-2.0-flash").unwrap();
        let request = AnalysisRequest::new(
            "Silver Lining",
            "It's a silver lining in a dark cloud.",
            None,
        );
        let result = client.analyze(&request).await.unwrap();
        assert_eq!(result.term, "Silver Lining");
        assert!(!result.summary.is_empty());
    }
}
