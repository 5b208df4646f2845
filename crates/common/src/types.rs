use serde::{Deserialize, Serialize};

/// Asset categories the relay can query upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Erc20,
    Erc721,
    Erc1155,
}

impl TokenKind {
    /// Recognize the asset kind from a request path substring.
    ///
    /// Matches anywhere in the path (`/api/erc20/latest` selects `Erc20`),
    /// first hit wins in the order erc20, erc721, erc1155.
    pub fn from_path(path: &str) -> Option<Self> {
        if path.contains("/erc20") {
            Some(TokenKind::Erc20)
        } else if path.contains("/erc721") {
            Some(TokenKind::Erc721)
        } else if path.contains("/erc1155") {
            Some(TokenKind::Erc1155)
        } else {
            None
        }
    }

    /// Whether upstream queries for this kind request spam tokens as well.
    /// Only the fungible kind carries `include_spam=true`.
    pub fn include_spam(self) -> bool {
        matches!(self, TokenKind::Erc20)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Erc20 => write!(f, "erc20"),
            TokenKind::Erc721 => write!(f, "erc721"),
            TokenKind::Erc1155 => write!(f, "erc1155"),
        }
    }
}
