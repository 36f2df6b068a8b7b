use validator::ValidationError;

pub const USERNAME_MAX_LEN: usize = 255;

/// 用户名校验：非空、最长 255 个字符、不含控制字符
pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len == 0 || len > USERNAME_MAX_LEN {
        return Err(ValidationError::new("username.length"));
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(ValidationError::new("username.control.char"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("Алиса").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("bad\nname").is_err());
        assert!(validate_username(&"x".repeat(255)).is_ok());
        assert!(validate_username(&"x".repeat(256)).is_err());
    }
}
