use std::fmt;

#[derive(Debug)]
pub enum ProviderError {
    Transport(String),
    Status(u16),
    Document(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProviderError::Transport(e) => write!(f, "ProviderError::Transport: {}", e),
            ProviderError::Status(code) => write!(f, "ProviderError::Status: provider returned status code {}", code),
            ProviderError::Document(e) => write!(f, "ProviderError::Document: {}", e),
        }
    }
}
impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ProviderError::Status(status.as_u16()),
            None => ProviderError::Transport(e.to_string()),
        }
    }
}
impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Document(e.to_string())
    }
}
