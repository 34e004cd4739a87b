use crate::catalog::DegreeRecord;
use regex::Regex;
use std::sync::OnceLock;

fn minimum_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)minimum\s+([0-9]+)%").expect("minimum percentage pattern compiles")
    })
}

/// Percentage a student needs for `degree`.
///
/// A structured `minimum_percentage` wins. Otherwise every criterion is scanned for
/// "minimum N%" and the largest N is used. Text that does not match, such as
/// "Minimum 45-50%", imposes no requirement. A matched number too large for `u32`
/// saturates, so it still rejects every student.
pub fn required_percentage(degree: &DegreeRecord) -> u32 {
    degree
        .minimum_percentage
        .unwrap_or_else(|| scan_minimum(&degree.eligibility_criteria))
}

pub fn scan_minimum<S: AsRef<str>>(criteria: &[S]) -> u32 {
    let pattern = minimum_pattern();

    criteria
        .iter()
        .filter_map(|criterion| pattern.captures(criterion.as_ref()))
        .filter_map(|captures| captures.get(1))
        // The capture is all digits, so parsing only fails on overflow.
        .map(|digits| digits.as_str().parse::<u32>().unwrap_or(u32::MAX))
        .max()
        .unwrap_or(0)
}
