use crate::error::ApiError;

/// Maximum prompt length for AI requests
const MAX_PROMPT_LENGTH: usize = 8000;
/// Maximum topic length for the blog idea generator
const MAX_TOPIC_LENGTH: usize = 200;
/// Bounds for generated passwords
const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_PASSWORD_LENGTH: usize = 128;
/// Maximum input size for the text tools
const MAX_TEXT_LENGTH: usize = 100_000;

/// Validate an AI prompt
pub fn validate_prompt(prompt: &str) -> Result<(), ApiError> {
    if prompt.trim().is_empty() {
        return Err(ApiError::InvalidInput("Prompt cannot be empty".to_string()));
    }
    if prompt.len() > MAX_PROMPT_LENGTH {
        return Err(ApiError::InvalidInput(format!(
            "Prompt too long (max {} characters)",
            MAX_PROMPT_LENGTH
        )));
    }
    Ok(())
}

/// Validate a blog topic
pub fn validate_topic(topic: &str) -> Result<(), ApiError> {
    if topic.trim().is_empty() {
        return Err(ApiError::InvalidInput("Topic cannot be empty".to_string()));
    }
    if topic.len() > MAX_TOPIC_LENGTH {
        return Err(ApiError::InvalidInput(format!(
            "Topic too long (max {} characters)",
            MAX_TOPIC_LENGTH
        )));
    }
    Ok(())
}

/// Validate the size of a base64 media payload before decoding it
pub fn validate_payload_size(base64_len: usize, max_bytes: usize) -> Result<(), ApiError> {
    if base64_len == 0 {
        return Err(ApiError::InvalidInput("Payload cannot be empty".to_string()));
    }
    // Base64 inflates by 4/3, so this bounds the decoded size.
    if base64_len / 4 * 3 > max_bytes {
        return Err(ApiError::InvalidInput(format!(
            "Payload too large (max {} bytes decoded)",
            max_bytes
        )));
    }
    Ok(())
}

/// Validate a trim selection before decoding anything
pub fn validate_trim_range(start_secs: f64, end_secs: f64) -> Result<(), ApiError> {
    if !start_secs.is_finite() || !end_secs.is_finite() {
        return Err(ApiError::InvalidInput(
            "Trim bounds must be finite numbers".to_string(),
        ));
    }
    if start_secs < 0.0 {
        return Err(ApiError::InvalidInput(
            "Trim start cannot be negative".to_string(),
        ));
    }
    if end_secs <= start_secs {
        return Err(ApiError::InvalidInput(
            "Trim end must be after trim start".to_string(),
        ));
    }
    Ok(())
}

/// Validate a requested password length
pub fn validate_password_length(length: usize) -> Result<(), ApiError> {
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        return Err(ApiError::InvalidInput(format!(
            "Password length must be between {} and {}",
            MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Validate input for the text tools
pub fn validate_text_input(text: &str) -> Result<(), ApiError> {
    if text.len() > MAX_TEXT_LENGTH {
        return Err(ApiError::InvalidInput(format!(
            "Text too long (max {} characters)",
            MAX_TEXT_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_prompt() {
        assert!(validate_prompt("Hello there").is_ok());
        assert!(validate_prompt("").is_err());
        assert!(validate_prompt("   ").is_err());
        assert!(validate_prompt(&"a".repeat(9000)).is_err());
    }

    #[test]
    fn test_validate_topic() {
        assert!(validate_topic("Remote Work").is_ok());
        assert!(validate_topic("").is_err());
        assert!(validate_topic(&"t".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_payload_size() {
        assert!(validate_payload_size(1000, 1024).is_ok());
        assert!(validate_payload_size(0, 1024).is_err());
        // 2000 base64 chars decode to ~1500 bytes.
        assert!(validate_payload_size(2000, 1024).is_err());
    }

    #[test]
    fn test_validate_trim_range() {
        assert!(validate_trim_range(0.0, 10.0).is_ok());
        assert!(validate_trim_range(2.5, 2.5).is_err());
        assert!(validate_trim_range(5.0, 2.0).is_err());
        assert!(validate_trim_range(-1.0, 2.0).is_err());
        assert!(validate_trim_range(f64::NAN, 2.0).is_err());
        assert!(validate_trim_range(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password_length(12).is_ok());
        assert!(validate_password_length(6).is_ok());
        assert!(validate_password_length(128).is_ok());
        assert!(validate_password_length(5).is_err());
        assert!(validate_password_length(129).is_err());
    }

    #[test]
    fn test_validate_text_input() {
        assert!(validate_text_input("short").is_ok());
        assert!(validate_text_input(&"x".repeat(100_001)).is_err());
    }
}
