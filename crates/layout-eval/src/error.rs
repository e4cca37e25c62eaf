pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid layout config: `{field}` = {value}")]
    InvalidConfig { field: &'static str, value: f64 },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
