#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid evidence signature `{signature}`: {source}")]
    Signature {
        signature: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid signature pattern definition: {reason}")]
    Pattern { reason: String },
    #[error("signature pattern `{id}` is already registered")]
    Duplicate { id: String },
}
