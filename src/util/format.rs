//! Display formatting for counts and timestamps in pt-BR conventions
//! (`1.234.567`, `24/05/2013, 16:15:54`, `24 de maio de 2013`).

use std::fmt::Display;

use chrono::{DateTime, Datelike, TimeZone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Date and time, used for issue timestamps
    Short,
    /// Spelled-out date, used for repository creation
    Long,
}

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Group thousands with '.'
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

pub fn format_date<Tz>(date: &DateTime<Tz>, style: DateStyle) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match style {
        DateStyle::Short => date.format("%d/%m/%Y, %H:%M:%S").to_string(),
        DateStyle::Long => {
            let month = MONTHS[date.month0() as usize];
            format!("{} de {} de {}", date.day(), month, date.year())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn numbers_group_by_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(46600), "46.600");
        assert_eq!(format_number(228000), "228.000");
        assert_eq!(format_number(1234567), "1.234.567");
    }

    #[test]
    fn short_date_has_time() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        assert_eq!(format_date(&date, DateStyle::Short), "01/03/2024, 12:30:05");
    }

    #[test]
    fn long_date_spells_month() {
        let date = Utc.with_ymd_and_hms(2013, 5, 24, 16, 15, 54).unwrap();
        assert_eq!(format_date(&date, DateStyle::Long), "24 de maio de 2013");
        let date = Utc.with_ymd_and_hms(2026, 10, 6, 0, 0, 0).unwrap();
        assert_eq!(format_date(&date, DateStyle::Long), "6 de outubro de 2026");
    }

    #[test]
    fn formatting_uses_the_given_offset() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap();
        let brt = utc.with_timezone(&FixedOffset::west_opt(3 * 3600).unwrap());
        assert_eq!(format_date(&brt, DateStyle::Short), "31/12/2023, 22:00:00");
        assert_eq!(format_date(&brt, DateStyle::Long), "31 de dezembro de 2023");
    }
}
