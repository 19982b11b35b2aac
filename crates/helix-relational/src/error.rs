use helix_core::error::CoreError;
use helix_core::model::Body;

#[derive(Debug, thiserror::Error)]
pub enum RelationalError {
    #[error("Blueprint for person {person} has no {body} longitude")]
    MissingLongitude { person: char, body: Body },

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}
