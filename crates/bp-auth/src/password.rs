use crate::error::AuthError;

/// Hash a plaintext password with the given bcrypt cost.
///
/// # Errors
///
/// Returns [`AuthError::EmptyPassword`] for an empty input and
/// [`AuthError::Hashing`] if bcrypt rejects the cost.
pub fn hash_password(plain: &str, cost: u32) -> Result<String, AuthError> {
    if plain.is_empty() {
        return Err(AuthError::EmptyPassword);
    }
    Ok(bcrypt::hash(plain, cost)?)
}

/// Check a plaintext password against a stored hash.
///
/// A malformed stored hash counts as a mismatch rather than an error, so a
/// corrupt row can never be logged into.
#[must_use]
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    match bcrypt::verify(plain, stored_hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash could not be parsed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MIN_COST;
    use rstest::rstest;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("s3cret", MIN_COST).unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("S3cret", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same", MIN_COST).unwrap();
        let b = hash_password("same", MIN_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_password_rejected() {
        assert!(matches!(
            hash_password("", MIN_COST),
            Err(AuthError::EmptyPassword)
        ));
    }

    #[test]
    fn cost_out_of_range_rejected() {
        assert!(matches!(hash_password("pw", 2), Err(AuthError::Hashing(_))));
    }

    #[rstest]
    #[case("")]
    #[case("12345")]
    #[case("not-a-hash")]
    #[case("$2b$04$short")]
    fn malformed_hash_never_verifies(#[case] stored: &str) {
        assert!(!verify_password("12345", stored));
    }
}
