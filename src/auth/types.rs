use serde::{Deserialize, Serialize};

/// Claims carried by a member token.
///
/// Only the claims the relay cares about are modeled; unknown claims are
/// ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberClaims {
    /// Display name of the member, when the issuer included one.
    pub name: Option<String>,
    pub exp: usize, // Expiration timestamp (standard JWT claim)
    pub iat: Option<usize>, // Issued at timestamp (standard JWT claim)
}

impl MemberClaims {
    /// Name to display for this member, falling back when the token
    /// carries none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("member")
    }
}

/// Who a connection descriptor identifies as.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberIdentity {
    /// No member token; the chat service assigns a guest identity.
    Guest,
    /// A member token with decodable claims.
    Member(MemberClaims),
}
