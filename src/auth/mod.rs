// Member-token reading and guest identity

// Public API - what other modules can use
pub use generators::{NicknameGenerator, PetNameNicknameGenerator};
pub use token::{classify_token, decode_member_claims, AuthError};
pub use types::{MemberClaims, MemberIdentity};

// Internal modules
mod generators;
mod token;
mod types;
