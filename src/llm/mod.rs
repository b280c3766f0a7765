pub mod parse;

use langchain_rust::language_models::llm::LLM;
use langchain_rust::language_models::options::CallOptions;
use langchain_rust::llm::openai::{OpenAI, OpenAIConfig};
use serde::{Deserialize, Serialize};

use crate::core::config::ProspectorConfig;

/// Soft cap requested from the model for the description field. Advisory
/// only; replies are not validated against it.
pub const DESCRIPTION_CHAR_CAP: usize = 180;

/// What the model is asked to pull out of a filing. Any field the model
/// omits decodes as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductInfo {
    pub company_name: String,
    pub new_product: String,
    pub product_description: String,
}

/// Wraps the chat model used to turn raw filing text into a `ProductInfo`.
/// The model is an untrusted oracle: equivalent inputs may produce
/// different or malformed replies across runs, so everything downstream of
/// `invoke` goes through the tolerant decoder and failure means `None`.
pub struct ProductExtractor {
    llm: OpenAI<OpenAIConfig>,
}

impl ProductExtractor {
    pub fn new(config: &ProspectorConfig) -> Self {
        let options = CallOptions::new()
            .with_temperature(0.2)
            .with_max_tokens(500);

        let llm = OpenAI::default()
            .with_config(OpenAIConfig::default().with_api_key(config.openai_key.clone()))
            .with_model(config.model.clone())
            .with_options(options);

        Self { llm }
    }

    pub async fn extract(&self, filing_text: &str) -> Option<ProductInfo> {
        let prompt = build_prompt(filing_text);

        match self.llm.invoke(&prompt).await {
            Ok(content) => {
                log::debug!("LLM raw output: {}", content);
                parse::parse_product_info(&content)
            }
            Err(e) => {
                log::error!("LLM error: {}", e);
                None
            }
        }
    }
}

fn build_prompt(filing_text: &str) -> String {
    format!(
        "You are a helpful assistant. Extract only the new product announcement info \
         from the SEC filing below.\n\
         Output only in JSON format with fields: company_name, new_product, \
         product_description (<{} characters).\n\n\
         SEC Filing:\n{}",
        DESCRIPTION_CHAR_CAP, filing_text
    )
}
