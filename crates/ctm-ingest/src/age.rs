use chrono::NaiveDate;

/// Whole years between `birthdate` (`YYYY-MM-DD`) and `reference_date`,
/// counted as elapsed days divided by 365.
///
/// Unparseable or future birthdates yield 0.
pub fn compute_age(birthdate: &str, reference_date: NaiveDate) -> u32 {
    let Ok(birthdate) = NaiveDate::parse_from_str(birthdate.trim(), "%Y-%m-%d") else {
        return 0;
    };
    let days = reference_date.signed_duration_since(birthdate).num_days();
    if days <= 0 {
        return 0;
    }
    u32::try_from(days / 365).unwrap_or(u32::MAX)
}
