//! Text shown on a person box.

use crate::model::Person;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub name: String,
    pub details: Vec<String>,
}

impl Card {
    pub fn for_person(person: &Person, current_year: i32) -> Self {
        let mut details = vec![format!("Gender: {}", person.gender.label())];

        if let Some(birth) = &person.birth {
            let shown = format_birth_date(birth);
            let line = match &person.death {
                Some(death) => {
                    let mut line = format!("{} - {}", shown, death);
                    if let Some(age) = age(birth, leading_year(death)) {
                        line.push_str(&format!(" (lived {} years)", age));
                    }
                    line
                }
                None => {
                    let mut line = format!("Born: {}", shown);
                    if let Some(age) = age(birth, Some(current_year)) {
                        line.push_str(&format!(" ({} years)", age));
                    }
                    line
                }
            };
            details.push(line);
        }

        if let Some(info) = &person.additional_info {
            details.push(format!("Info: {}", info));
        }

        Self {
            name: person.name.clone(),
            details,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.details.iter().map(String::as_str))
    }
}

/// Calendar year used for the age of living people.
pub fn current_year() -> i32 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::new_0().get_full_year() as i32
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use chrono::Datelike;
        chrono::Local::now().year()
    }
}

/// Age in whole years at `until`. `None` when either year is unreadable or
/// the result would be negative or out of range.
pub fn age(birth: &str, until: Option<i32>) -> Option<i32> {
    let born = leading_year(birth)?;
    let years = until?.checked_sub(born)?;
    (years >= 0).then_some(years)
}

/// Year prefix of `"1950"`, `"1950-03-12"` or `"1950 (approx.)"`.
pub fn leading_year(text: &str) -> Option<i32> {
    let trimmed = text.trim_start();
    let digits: String = trimmed
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || (i == 0 && c == '-'))
        .map(|(_, c)| c)
        .collect();
    digits.parse().ok()
}

/// ISO dates read as `"March 12, 1950"`; anything else is shown as written.
pub fn format_birth_date(birth: &str) -> String {
    match NaiveDate::parse_from_str(birth.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => birth.to_string(),
    }
}
