use async_trait::async_trait;

/// Trait for generating guest nicknames
#[async_trait]
pub trait NicknameGenerator: Send + Sync {
    async fn generate(&self) -> String;
}

/// Pet name-based guest nickname generator
pub struct PetNameNicknameGenerator;

impl PetNameNicknameGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PetNameNicknameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NicknameGenerator for PetNameNicknameGenerator {
    async fn generate(&self) -> String {
        format!("guest-{}", petname::Petnames::default().generate_one(2, "-"))
    }
}
