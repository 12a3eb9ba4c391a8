// ============================================================================
// Image Info
// ============================================================================
// Turns the wallhaven record into `key: value` lines in document order.
// Nested objects (thumbs, uploader, ...) are listed on tab-indented lines
// under their key; url / short_url / path are shown as links.
// ============================================================================

use colored::*;
use serde_json::Value;

use crate::wallhaven::ImageMetadata;

const LINK_KEYS: [&str; 3] = ["url", "short_url", "path"];
const NO_INFO: &str = "No wallhaven image fetched yet";

#[derive(Debug, PartialEq)]
pub enum Field {
    Text(String),
    Link(String),
    Nested(Vec<String>),
}

pub fn fields(metadata: &ImageMetadata) -> Vec<(String, Field)> {
    metadata
        .fields()
        .iter()
        .map(|(key, value)| {
            let field = match value {
                Value::Object(inner) => Field::Nested(
                    inner
                        .iter()
                        .map(|(k, v)| format!("{}: {}", k, plain(v)))
                        .collect(),
                ),
                _ if LINK_KEYS.contains(&key.as_str()) => Field::Link(plain(value)),
                _ => Field::Text(plain(value)),
            };
            (key.clone(), field)
        })
        .collect()
}

/// Plain-text lines, one per key plus one per nested entry
pub fn render(metadata: Option<&ImageMetadata>) -> Vec<String> {
    let Some(metadata) = metadata else {
        return vec![NO_INFO.to_string()];
    };
    let mut lines = Vec::new();
    for (key, field) in fields(metadata) {
        match field {
            Field::Text(v) | Field::Link(v) => lines.push(format!("{}: {}", key, v)),
            Field::Nested(inner) => {
                lines.push(format!("{}:", key));
                lines.extend(inner.into_iter().map(|l| format!("\t{}", l)));
            }
        }
    }
    lines
}

pub fn print(metadata: Option<&ImageMetadata>) {
    println!();
    println!("{}", "+ Random wallhaven wallpaper".green().bold());
    println!();
    let Some(metadata) = metadata else {
        println!("{}", NO_INFO.cyan());
        println!();
        return;
    };
    for (key, field) in fields(metadata) {
        match field {
            Field::Text(v) => println!("{}: {}", key.bold(), v),
            Field::Link(v) => println!("{}: {}", key.bold(), v.bright_blue().underline()),
            Field::Nested(inner) => {
                println!("{}:", key.bold());
                for line in inner {
                    println!("\t{}", line.cyan());
                }
            }
        }
    }
    println!();
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
