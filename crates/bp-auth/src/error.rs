use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password must not be empty")]
    EmptyPassword,

    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}
