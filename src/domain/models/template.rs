#[cfg(test)]
#[path = "template_test.rs"]
mod tests;

use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

pub const DEFAULT_TEMPLATE_FILE: &str = "log-template.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: u32,
    pub query: String,
    pub duration_ms: f64,
    pub rows: u64,
    pub calls: u64,
}

/// Example of the log shape the analysis service expects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogTemplate {
    pub logs: Vec<LogRecord>,
}

impl LogTemplate {
    pub fn example() -> LogTemplate {
        return LogTemplate {
            logs: vec![
                LogRecord {
                    id: 1,
                    query: "SELECT * FROM orders WHERE customer_id = $1".to_string(),
                    duration_ms: 1250.5,
                    rows: 340,
                    calls: 1200,
                },
                LogRecord {
                    id: 2,
                    query: "UPDATE inventory SET quantity = quantity - $1 WHERE product_id = $2"
                        .to_string(),
                    duration_ms: 85.2,
                    rows: 1,
                    calls: 5400,
                },
                LogRecord {
                    id: 3,
                    query: "SELECT p.name, SUM(oi.quantity) FROM order_items oi JOIN products p ON p.id = oi.product_id GROUP BY p.name".to_string(),
                    duration_ms: 4320.0,
                    rows: 15000,
                    calls: 12,
                },
            ],
        };
    }

    /// Copy and export both go through here so they always match byte for
    /// byte.
    pub fn text() -> Result<String> {
        let mut text = serde_json::to_string_pretty(&LogTemplate::example())?;
        text.push('\n');
        return Ok(text);
    }
}
