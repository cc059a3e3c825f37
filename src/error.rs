#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("status code {code} is already registered")]
    DuplicateCode { code: String },
}
