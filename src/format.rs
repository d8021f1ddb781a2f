//! Number display: digit grouping and at most a few fraction digits,
//! trailing zeros dropped (`1234.5` renders as `1,234.5`, `100` as `100`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub max_fraction_digits: u8,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
            max_fraction_digits: 2,
        }
    }
}

impl NumberFormat {
    pub fn format(&self, value: f64) -> String {
        let precision = self.max_fraction_digits as usize;
        let mut body = format!("{:.*}", precision, value);
        if body.contains('.') {
            let trimmed = body.trim_end_matches('0').trim_end_matches('.');
            body = trimmed.to_string();
        }
        if body == "-0" {
            body = "0".into();
        }

        let (int_part, fraction) = match body.split_once('.') {
            Some((int_part, fraction)) => (int_part, Some(fraction)),
            None => (body.as_str(), None),
        };

        let grouped = match int_part.strip_prefix('-') {
            Some(digits) => format!("-{}", group_digits(digits, self.grouping_separator)),
            None => group_digits(int_part, self.grouping_separator),
        };

        match fraction {
            Some(fraction) => format!("{}{}{}", grouped, self.decimal_separator, fraction),
            None => grouped,
        }
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}
