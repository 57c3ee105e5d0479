//! Phone number normalization.

/// Normalize a phone number to E.164 format.
///
/// Formatting characters are dropped. A number without a leading `+` is
/// accepted only when it is long enough to carry a country code.
pub fn normalize_phone_number(number: &str) -> Result<String, String> {
    let has_plus = number.trim_start().starts_with('+');
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        0 => Err("Phone number must contain at least one digit".into()),
        1..=6 => Err("Phone number too short".into()),
        16.. => Err("Phone number too long".into()),
        n if has_plus || n >= 10 => Ok(format!("+{}", digits)),
        _ => Err("Phone number must include country code".into()),
    }
}
