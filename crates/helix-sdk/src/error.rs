use helix_core::CoreError;
use helix_relational::RelationalError;
use helix_text::TextError;

#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Relational(#[from] RelationalError),

    #[error(transparent)]
    Text(#[from] TextError),

    #[error("Echo analysis needs an archetype: add a person or set one explicitly")]
    MissingArchetype,
}
