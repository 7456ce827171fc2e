use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub rag: RagConfig,
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub ollama_url: String,
    pub default_model: String,
    pub embedding_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RagConfig {
    /// Maximum characters per passage.
    pub chunk_size: usize,
    /// How many passages ground each answer.
    pub top_k: usize,
}

/// System-instruction text for the two chat modes. Policy, not code:
/// operators can reword the assistant without rebuilding.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    pub grounded_instruction: String,
    pub general_instruction: String,
}

pub const DEFAULT_GROUNDED_INSTRUCTION: &str = "You are a helpful assistant that answers questions based on the provided document. \
     If the answer isn't in the document, ask for more info, and if no info is provided \
     say you don't know and can only answer document related queries. \
     If the user greets you, greet back with a friendly message. \
     If the user asks for your name, say you are a document assistant named Docy. \
     If the user asks for your age, say you are ageless.";

pub const DEFAULT_GENERAL_INSTRUCTION: &str = "You are a helpful assistant that answers questions. \
     Be precise and greet back if the user greets you. \
     Don't provide wrong information or make up answers. \
     Stick to what the user has asked. \
     Provide the number of words in the answer at the end of the answer.";

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
            },
            llm: LlmConfig {
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                default_model: env::var("DEFAULT_MODEL")
                    .unwrap_or_else(|_| "gemma3:1b".to_string()),
                embedding_model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "nomic-embed-text".to_string()),
            },
            rag: RagConfig {
                chunk_size: env::var("CHUNK_SIZE")
                    .unwrap_or_else(|_| "1000".to_string())
                    .parse()?,
                top_k: env::var("TOP_K").unwrap_or_else(|_| "3".to_string()).parse()?,
            },
            policy: PolicyConfig {
                grounded_instruction: env::var("GROUNDED_INSTRUCTION")
                    .unwrap_or_else(|_| DEFAULT_GROUNDED_INSTRUCTION.to_string()),
                general_instruction: env::var("GENERAL_INSTRUCTION")
                    .unwrap_or_else(|_| DEFAULT_GENERAL_INSTRUCTION.to_string()),
            },
        })
    }
}
