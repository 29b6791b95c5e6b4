//! Common validation utilities.

use validator::ValidationError;

/// Maximum tolerance window in minutes (4 hours).
const MAX_TOLERANCE_MINUTES: i32 = 240;

/// Maximum meal break in minutes (4 hours).
const MAX_MEAL_MINUTES: i32 = 240;

/// Validates a schedule time-of-day in `HH:MM` form (seconds tolerated).
pub fn validate_hhmm(value: &str) -> Result<(), ValidationError> {
    let b = value.as_bytes();
    let ok = (b.len() == 5 || (b.len() == 8 && b[5] == b':'))
        && b[2] == b':'
        && b.iter()
            .enumerate()
            .take(5)
            .all(|(i, c)| i == 2 || c.is_ascii_digit())
        && &value[..2] < "24"
        && &value[3..5] < "60";
    if ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("hhmm_format");
        err.message = Some("Time must be HH:MM".into());
        Err(err)
    }
}

/// Validates that a tolerance window is within 0-240 minutes.
pub fn validate_tolerance_minutes(minutes: i32) -> Result<(), ValidationError> {
    if (0..=MAX_TOLERANCE_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        let mut err = ValidationError::new("tolerance_range");
        err.message = Some("Tolerance must be between 0 and 240 minutes".into());
        Err(err)
    }
}

/// Validates that a meal break is within 0-240 minutes.
pub fn validate_meal_minutes(minutes: i32) -> Result<(), ValidationError> {
    if (0..=MAX_MEAL_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        let mut err = ValidationError::new("meal_range");
        err.message = Some("Meal minutes must be between 0 and 240".into());
        Err(err)
    }
}

/// Validates a month key in `YYYY-MM` form.
pub fn validate_month_key(value: &str) -> Result<(), ValidationError> {
    let b = value.as_bytes();
    let ok = b.len() == 7
        && b[4] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || c.is_ascii_digit())
        && &value[5..7] >= "01"
        && &value[5..7] <= "12";
    if ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("month_key");
        err.message = Some("Month must be YYYY-MM".into());
        Err(err)
    }
}

/// Validates a day key in `YYYY-MM-DD` form.
pub fn validate_day_key(value: &str) -> Result<(), ValidationError> {
    let b = value.as_bytes();
    let ok = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| matches!(i, 4 | 7) || c.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("day_key");
        err.message = Some("Day must be YYYY-MM-DD".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_hhmm() {
        assert!(validate_hhmm("09:00").is_ok());
        assert!(validate_hhmm("00:00").is_ok());
        assert!(validate_hhmm("23:59").is_ok());
        assert!(validate_hhmm("09:00:00").is_ok());
    }

    #[test]
    fn test_validate_hhmm_rejects() {
        assert!(validate_hhmm("24:00").is_err());
        assert!(validate_hhmm("09:60").is_err());
        assert!(validate_hhmm("9:00").is_err());
        assert!(validate_hhmm("0900").is_err());
        assert!(validate_hhmm("").is_err());
    }

    #[test]
    fn test_validate_tolerance_minutes() {
        assert!(validate_tolerance_minutes(0).is_ok());
        assert!(validate_tolerance_minutes(19).is_ok());
        assert!(validate_tolerance_minutes(240).is_ok());
        assert!(validate_tolerance_minutes(-1).is_err());
        assert!(validate_tolerance_minutes(241).is_err());
    }

    #[test]
    fn test_validate_meal_minutes() {
        assert!(validate_meal_minutes(60).is_ok());
        assert!(validate_meal_minutes(-5).is_err());
        assert!(validate_meal_minutes(500).is_err());
    }

    #[test]
    fn test_validate_month_key() {
        assert!(validate_month_key("2024-03").is_ok());
        assert!(validate_month_key("2024-12").is_ok());
        assert!(validate_month_key("2024-00").is_err());
        assert!(validate_month_key("2024-13").is_err());
        assert!(validate_month_key("2024-3").is_err());
        assert!(validate_month_key("garbage").is_err());
    }

    #[test]
    fn test_validate_day_key() {
        assert!(validate_day_key("2024-03-01").is_ok());
        assert!(validate_day_key("2024-3-1").is_err());
        assert!(validate_day_key("2024-03-01T00:00").is_err());
        assert!(validate_day_key("").is_err());
    }
}
