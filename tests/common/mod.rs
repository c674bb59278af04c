use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use cairuilin::config::GeminiConfig;
use cairuilin::providers::GeminiProvider;
use serde_json::{json, Value};

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Gemini provider pointed at a mock server
#[allow(dead_code)]
pub fn mock_gemini(api_base: &str) -> GeminiProvider {
    let config = GeminiConfig {
        api_base: api_base.to_string(),
        ..Default::default()
    };
    GeminiProvider::with_api_key(config, "test-key").expect("failed to build provider")
}

/// A generateContent response body with one candidate
#[allow(dead_code)]
pub fn candidate_body(text: &str, sources: &[(&str, &str)]) -> Value {
    let chunks: Vec<Value> = sources
        .iter()
        .map(|(title, uri)| json!({ "web": { "uri": uri, "title": title } }))
        .collect();

    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP",
            "groundingMetadata": {
                "webSearchQueries": ["query"],
                "groundingChunks": chunks
            }
        }]
    })
}
