/// Validate a required text field with a max length.
pub fn validate_required(value: Option<&str>, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.unwrap_or("").trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    let Some((local, domain)) = trimmed.split_once('@') else {
        return Some("Email must be a valid address (contain '@' and '.')".to_string());
    };
    if local.is_empty()
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Some("Email must be a valid address (contain '@' and '.')".to_string());
    }
    None
}

/// Validate a phone number: 10-15 digits, optionally with '+', spaces or dashes.
pub fn validate_phone(phone: &str, field_name: &str) -> Option<String> {
    let trimmed = phone.trim();
    if !trimmed.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-')) {
        return Some(format!("{field_name} may only contain digits, spaces, '+' and '-'"));
    }
    let digits = trimmed.chars().filter(char::is_ascii_digit).count();
    if !(10..=15).contains(&digits) {
        return Some(format!("{field_name} must have 10 to 15 digits"));
    }
    None
}

/// Validate an age: 1-120.
pub fn validate_age(age: i64, field_name: &str) -> Option<String> {
    if !(1..=120).contains(&age) {
        return Some(format!("{field_name} must be between 1 and 120"));
    }
    None
}

/// Validate an age stored as text.
pub fn validate_age_text(age: &str, field_name: &str) -> Option<String> {
    match age.trim().parse::<i64>() {
        Ok(n) => validate_age(n, field_name),
        Err(_) => Some(format!("{field_name} must be a number")),
    }
}

/// Validate a password: min 8 chars on create.
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Password is required".to_string());
    }
    if password.len() < 8 {
        return Some("Password must be at least 8 characters".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_missing_and_blank() {
        assert_eq!(validate_required(None, "Name", 10), Some("Name is required".into()));
        assert_eq!(validate_required(Some("  "), "Name", 10), Some("Name is required".into()));
        assert!(validate_required(Some("Asha"), "Name", 10).is_none());
        assert!(validate_required(Some("abcdefghijk"), "Name", 10).is_some());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("asha@example.in").is_none());
        assert!(validate_email("asha.example.in").is_some());
        assert!(validate_email("@example.in").is_some());
        assert!(validate_email("asha@localhost").is_some());
    }

    #[test]
    fn phone_digits() {
        assert!(validate_phone("9876543210", "Phone").is_none());
        assert!(validate_phone("+91 98765-43210", "Phone").is_none());
        assert!(validate_phone("12345", "Phone").is_some());
        assert!(validate_phone("98765x3210", "Phone").is_some());
    }

    #[test]
    fn ages() {
        assert!(validate_age(35, "Age").is_none());
        assert!(validate_age(0, "Age").is_some());
        assert!(validate_age(121, "Age").is_some());
        assert!(validate_age_text(" 42 ", "Age").is_none());
        assert_eq!(validate_age_text("forty", "Age"), Some("Age must be a number".into()));
    }

    #[test]
    fn password_length() {
        assert!(validate_password("").is_some());
        assert!(validate_password("short").is_some());
        assert!(validate_password("long enough").is_none());
    }
}
