use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("signed hash entry has an invalid signature")]
    BadSignature,

    #[error("no trusted source for this block's work hash")]
    NoTrustedSource,

    #[error("proof-of-work error: {0}")]
    Pow(#[from] boulder_pow::PowError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("config error: {0}")]
    Config(String),
}
