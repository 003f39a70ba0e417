//! Text analysis DTOs

use serde::Deserialize;

/// Raw claim text submitted for analysis
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}
