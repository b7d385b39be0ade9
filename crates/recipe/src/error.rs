use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("failed to read recipe catalog {path}: {source}")]
    CatalogRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid recipe catalog {path}: {source}")]
    CatalogParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
