use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::model::{BillStatus, DisplayBill, RawBill};

const ISO_DATE: &str = "%Y-%m-%d";
const MONTHS_FR: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

pub const STATUS_FALLBACK: &str = "Inconnu";

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("bill has no date")]
    MissingDate,
    #[error("invalid date {0:?}: {1}")]
    InvalidDate(String, chrono::ParseError),
}

/// How dates are rendered for the employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// `4 Avr. 04`
    #[default]
    Fr,
    /// `2004-04-04`
    Iso,
}

impl DateFormat {
    pub fn render(&self, date: NaiveDate) -> String {
        match self {
            DateFormat::Fr => format!(
                "{} {}. {:02}",
                date.day(),
                MONTHS_FR[date.month0() as usize],
                date.year().rem_euclid(100)
            ),
            DateFormat::Iso => date.format(ISO_DATE).to_string(),
        }
    }
}

pub fn parse_date(raw: Option<&str>) -> Result<NaiveDate, FormatError> {
    let raw = raw.ok_or(FormatError::MissingDate)?;

    NaiveDate::parse_from_str(raw, ISO_DATE).or_else(|e| {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .map_err(|_| FormatError::InvalidDate(raw.to_string(), e))
    })
}

pub fn format_status(status: Option<BillStatus>) -> &'static str {
    match status {
        Some(BillStatus::Pending) => "En attente",
        Some(BillStatus::Accepted) => "Accepté",
        Some(BillStatus::Refused) => "Refused",
        None => STATUS_FALLBACK,
    }
}

/// Turns one raw bill into its display form. A bad date or status only
/// degrades this record.
pub fn normalize(raw: RawBill, format: DateFormat) -> DisplayBill {
    let (date, display_date) = match parse_date(raw.date.as_deref()) {
        Ok(date) => (Some(date), format.render(date)),
        Err(e) => {
            warn!(bill = %raw.id, error = %e, "keeping raw date");
            (None, raw.date.clone().unwrap_or_default())
        }
    };

    let status = raw.status.as_deref().and_then(|s| s.parse::<BillStatus>().ok());
    if status.is_none() {
        warn!(bill = %raw.id, status = ?raw.status, "unrecognized bill status");
    }

    DisplayBill {
        id: raw.id,
        email: raw.email,
        bill_type: raw.bill_type,
        name: raw.name,
        date,
        display_date,
        amount: raw.amount,
        vat: raw.vat,
        pct: raw.pct,
        commentary: raw.commentary,
        status,
        display_status: format_status(status).to_string(),
        file_url: raw.file_url,
        file_name: raw.file_name,
        comment_admin: raw.comment_admin,
    }
}

/// Most recent first. Undated bills go last.
pub fn sort_antichrono(bills: &mut [DisplayBill]) {
    bills.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, date: Option<&str>, status: Option<&str>) -> RawBill {
        RawBill {
            id: id.to_string(),
            date: date.map(String::from),
            status: status.map(String::from),
            ..Default::default()
        }
    }

    fn format_date(raw: Option<&str>, format: DateFormat) -> Result<String, FormatError> {
        parse_date(raw).map(|date| format.render(date))
    }

    #[test]
    fn formats_french_short_dates() {
        assert_eq!(format_date(Some("2004-04-04"), DateFormat::Fr).unwrap(), "4 Avr. 04");
        assert_eq!(format_date(Some("2021-12-25"), DateFormat::Fr).unwrap(), "25 Déc. 21");
        assert_eq!(format_date(Some("2001-02-09"), DateFormat::Fr).unwrap(), "9 Fév. 01");
    }

    #[test]
    fn formats_iso_dates() {
        assert_eq!(format_date(Some("2004-04-04"), DateFormat::Iso).unwrap(), "2004-04-04");
        assert_eq!(
            format_date(Some("2022-03-01T10:00:00+01:00"), DateFormat::Iso).unwrap(),
            "2022-03-01"
        );
    }

    #[test]
    fn rejects_missing_and_malformed_dates() {
        assert!(matches!(format_date(None, DateFormat::Fr), Err(FormatError::MissingDate)));
        assert!(matches!(
            format_date(Some("2004-13-45"), DateFormat::Fr),
            Err(FormatError::InvalidDate(_, _))
        ));
    }

    #[test]
    fn malformed_date_falls_back_to_raw_value() {
        for bad in ["not a date", "2004-13-45", "", "04/04/2004"] {
            let bill = normalize(raw("1", Some(bad), Some("pending")), DateFormat::Fr);

            assert_eq!(bill.display_date, bad);
            assert_eq!(bill.date, None);
            assert_eq!(bill.display_status, "En attente");
        }
    }

    #[test]
    fn missing_date_renders_empty() {
        let bill = normalize(raw("1", None, None), DateFormat::Fr);
        assert_eq!(bill.display_date, "");
    }

    #[test]
    fn normalizing_a_formatted_date_does_not_panic() {
        let once = normalize(raw("1", Some("2004-04-04"), None), DateFormat::Fr);
        let twice = normalize(raw("1", Some(once.display_date.as_str()), None), DateFormat::Fr);

        assert_eq!(twice.display_date, "4 Avr. 04");
    }

    #[test]
    fn maps_statuses_to_labels() {
        let cases = [
            (Some("pending"), "En attente"),
            (Some("accepted"), "Accepté"),
            (Some("refused"), "Refused"),
            (Some("archived"), STATUS_FALLBACK),
            (Some(""), STATUS_FALLBACK),
            (None, STATUS_FALLBACK),
        ];

        for (status, label) in cases {
            let bill = normalize(raw("1", Some("2004-04-04"), status), DateFormat::Fr);
            assert_eq!(bill.display_status, label, "status {:?}", status);
        }
    }

    #[test]
    fn sorts_most_recent_first_with_undated_last() {
        let mut bills: Vec<DisplayBill> = [
            Some("2002-02-02"),
            Some("garbage"),
            Some("2004-04-04"),
            None,
            Some("2003-03-03"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, date)| normalize(raw(&i.to_string(), date, None), DateFormat::Fr))
        .collect();

        sort_antichrono(&mut bills);

        let dates: Vec<Option<String>> = bills
            .iter()
            .map(|b| b.date.map(|d| d.format(ISO_DATE).to_string()))
            .collect();
        assert_eq!(
            dates[..3],
            [
                Some("2004-04-04".to_string()),
                Some("2003-03-03".to_string()),
                Some("2002-02-02".to_string())
            ]
        );
        assert!(dates[3..].iter().all(Option::is_none));
        for pair in bills.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }
}
