use chrono::{Datelike, NaiveDate};

/// Submissions from candidates at or above this age are silently dropped.
/// Product policy lives here and nowhere else, so changing it never
/// touches upload or persistence code.
const AGE_CUTOFF_YEARS: i32 = 30;

/// Whole-year age with calendar-aware subtraction: a birthday not yet
/// reached in the reference year decrements the naive year difference.
pub fn age_in_years(date_of_birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - date_of_birth.year();
    if (reference.month(), reference.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Eligible iff computed age is strictly under the cutoff. Callers must
/// run this before any upload or persistence so an ineligible submission
/// leaves no trace.
pub fn is_eligible(date_of_birth: NaiveDate, reference: NaiveDate) -> bool {
    age_in_years(date_of_birth, reference) < AGE_CUTOFF_YEARS
}
