use crate::core::description::NodeDescription;
use crate::core::{ExecutionContext, Item, NodeType};
use crate::domain::model::{Bounds, HttpMethod, HttpRequestOptions};
use crate::utils::error::{NodeError, Result};
use chrono::{SecondsFormat, Utc};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::OnceLock;

pub const RANDOM_ORG_ENDPOINT: &str = "https://www.random.org/integers/";
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const USER_AGENT: &str = "n8n-random-node/1.0.0";
pub const SOURCE: &str = "random.org";

fn digit_run() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"))
}

/// Fetches one true random integer per input item from random.org.
#[derive(Debug, Clone)]
pub struct RandomNode {
    endpoint: String,
    timeout_ms: u64,
    user_agent: String,
}

impl Default for RandomNode {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomNode {
    pub fn new() -> Self {
        Self {
            endpoint: RANDOM_ORG_ENDPOINT.to_string(),
            timeout_ms: REQUEST_TIMEOUT_MS,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Points the node at another integer generator with the same query API.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_request(&self, bounds: Bounds) -> HttpRequestOptions {
        let url = format!(
            "{}?num=1&min={}&max={}&col=1&base=10&format=plain&rnd=new",
            self.endpoint, bounds.min, bounds.max
        );

        HttpRequestOptions {
            method: HttpMethod::Get,
            url,
            timeout_ms: self.timeout_ms,
            headers: HashMap::from([("User-Agent".to_string(), self.user_agent.clone())]),
        }
    }

    async fn process_item<C: ExecutionContext>(
        &self,
        ctx: &C,
        item: &Item,
        index: usize,
    ) -> Result<Item> {
        let bounds = Bounds::new(
            resolve_integer(ctx, "min", index)?,
            resolve_integer(ctx, "max", index)?,
        );
        bounds.validate(index)?;

        let request = self.build_request(bounds);
        tracing::debug!("🎲 Item {}: requesting {}", index, request.url);

        let response = ctx
            .http_request(&request)
            .await
            .map_err(|e| e.with_item_index(index))?;

        let text = response_text(&response);
        let random_number = extract_number(&text, index)?;
        tracing::debug!("🎲 Item {}: received {}", index, random_number);

        let mut overlay = Map::new();
        overlay.insert("randomNumber".to_string(), Value::from(random_number));
        overlay.insert("min".to_string(), Value::from(bounds.min));
        overlay.insert("max".to_string(), Value::from(bounds.max));
        overlay.insert("source".to_string(), Value::from(SOURCE));
        overlay.insert("timestamp".to_string(), Value::from(iso_timestamp()));

        Ok(Item::merged(&item.json, overlay, index))
    }
}

#[async_trait::async_trait]
impl NodeType for RandomNode {
    type Description = NodeDescription;

    fn description(&self) -> NodeDescription {
        NodeDescription::random()
    }

    async fn execute<C: ExecutionContext>(&self, ctx: &C) -> Result<Vec<Vec<Item>>> {
        let items = ctx.input_data();
        let mut return_data = Vec::with_capacity(items.len());
        let mut recorded_errors = 0usize;

        tracing::info!(
            "🚀 {}: processing {} item(s)",
            ctx.node().name,
            items.len()
        );

        for (index, item) in items.iter().enumerate() {
            match self.process_item(ctx, item, index).await {
                Ok(output) => return_data.push(output),
                Err(e) if ctx.continue_on_fail() => {
                    tracing::warn!(
                        "⚠️ {}: item {} failed, recording error: {}",
                        ctx.node().name,
                        index,
                        e
                    );
                    let mut overlay = Map::new();
                    overlay.insert("error".to_string(), Value::from(e.to_string()));
                    return_data.push(Item::merged(&item.json, overlay, index));
                    recorded_errors += 1;
                }
                Err(e) => {
                    tracing::error!("❌ {}: item {} failed: {}", ctx.node().name, index, e);
                    return Err(e);
                }
            }
        }

        tracing::info!(
            "✅ {}: produced {} item(s), {} recorded error(s)",
            ctx.node().name,
            return_data.len(),
            recorded_errors
        );
        Ok(vec![return_data])
    }
}

/// Reads an integral parameter. Accepts JSON integers, floats without a
/// fractional part and numeric strings.
fn resolve_integer<C: ExecutionContext>(ctx: &C, name: &str, index: usize) -> Result<i64> {
    let value = ctx.node_parameter(name, index)?;
    let invalid = |reason: &str| NodeError::ParameterError {
        item_index: index,
        name: name.to_string(),
        reason: format!("{} (got {})", reason, value),
    };

    match &value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
                        Ok(f as i64)
                    }
                    _ => Err(invalid("expected an integer")),
                }
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid("expected an integer")),
        Value::Null => Err(invalid("value is required")),
        _ => Err(invalid("expected a number")),
    }
}

/// Text form of a response body, whatever shape the HTTP capability gave it.
pub fn response_text(response: &Value) -> String {
    match response {
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => response.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}

/// Parses the first run of decimal digits in `text`.
pub fn extract_number(text: &str, item_index: usize) -> Result<i64> {
    let digits = digit_run()
        .find(text)
        .ok_or_else(|| NodeError::ParseError {
            item_index,
            message: format!("Could not extract a number from response: {}", text),
        })?
        .as_str();

    digits.parse::<i64>().map_err(|_| NodeError::ParseError {
        item_index,
        message: format!("Invalid number extracted: {}", digits),
    })
}

fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
