use chrono::{Datelike, NaiveDate};

use crate::errors::CredentialError;

pub const MINIMUM_AGE: i32 = 18;

/// Whole years between `birth_date` and `today`. A year only counts once its
/// anniversary has been reached, so someone born on 29 February turns a year
/// older on 1 March in non-leap years. Future birth dates give a negative age.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years - 1
    } else {
        years
    }
}

pub fn check_age(birth_date: NaiveDate, today: NaiveDate) -> Result<(), CredentialError> {
    if age_on(birth_date, today) < MINIMUM_AGE {
        return Err(CredentialError::IneligibleAge {
            minimum: MINIMUM_AGE,
        });
    }
    Ok(())
}
