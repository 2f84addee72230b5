use crate::error::RecordError;

pub const DELIMITER: char = '|';

const RECIPIENT: usize = 0;
const ZIP_CODE: usize = 10;
const TRANSACTION_DATE: usize = 13;
const TRANSACTION_AMOUNT: usize = 14;
const OTHER_ID: usize = 15;
const FIELDS: usize = OTHER_ID + 1;

pub const ZIP_LEN: usize = 5;
pub const DATE_LEN: usize = 8;

/// One individual contribution, borrowing its text fields from the input line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution<'s> {
    pub recipient_id: &'s str,
    /// At most [`ZIP_LEN`] characters; shorter when the source field was.
    pub zip_code: &'s str,
    pub transaction_date: &'s str,
    pub transaction_amount: f64,
    pub other_id: &'s str,
}

impl<'s> Contribution<'s> {
    pub fn parse(line: &'s str) -> Result<Self, RecordError> {
        let mut fields: [&str; FIELDS] = [""; FIELDS];
        let mut found = 0;
        for (slot, field) in fields.iter_mut().zip(line.split(DELIMITER)) {
            *slot = field;
            found += 1;
        }
        if found < FIELDS {
            let (index, name) = first_missing(found);
            return Err(RecordError::MissingField { index, name, found });
        }

        Ok(Contribution {
            recipient_id: fields[RECIPIENT],
            zip_code: truncate_chars(fields[ZIP_CODE], ZIP_LEN),
            transaction_date: fields[TRANSACTION_DATE],
            transaction_amount: parse_amount(fields[TRANSACTION_AMOUNT])?,
            other_id: fields[OTHER_ID],
        })
    }

    /// Contributions from committees or joint sources carry an other-id.
    #[inline]
    pub fn is_individual(&self) -> bool {
        self.other_id.is_empty()
    }
}

fn first_missing(found: usize) -> (usize, &'static str) {
    [
        (RECIPIENT, "CMTE_ID"),
        (ZIP_CODE, "ZIP_CODE"),
        (TRANSACTION_DATE, "TRANSACTION_DT"),
        (TRANSACTION_AMOUNT, "TRANSACTION_AMT"),
        (OTHER_ID, "OTHER_ID"),
    ]
    .into_iter()
    .find(|&(index, _)| index >= found)
    .unwrap_or((OTHER_ID, "OTHER_ID"))
}

#[inline]
fn parse_amount(raw: &str) -> Result<f64, RecordError> {
    let value = fast_float::parse::<f64, _>(raw).map_err(|_| RecordError::InvalidAmount {
        raw: raw.to_owned(),
    })?;
    if !value.is_finite() {
        return Err(RecordError::NonFiniteAmount { raw: raw.to_owned() });
    }
    Ok(value)
}

#[inline]
pub(crate) fn truncate_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

#[inline]
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
pub(crate) fn line(recipient: &str, zip: &str, date: &str, amount: &str, other: &str) -> String {
    let mut fields = vec![""; FIELDS + 5];
    fields[RECIPIENT] = recipient;
    fields[ZIP_CODE] = zip;
    fields[TRANSACTION_DATE] = date;
    fields[TRANSACTION_AMOUNT] = amount;
    fields[OTHER_ID] = other;
    fields.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fec_line() {
        let raw = "C00629618|N|TER|P|201701230300133512|15C|IND|PEREZ, JOHN A|LOS ANGELES|CA|90017|PRINCIPAL|DOUBLE NICKEL ADVISORS|01032017|40|H6CA34245|SA01251735122|1141239|||2012520171368850783";
        let c = Contribution::parse(raw).unwrap();
        assert_eq!(c.recipient_id, "C00629618");
        assert_eq!(c.zip_code, "90017");
        assert_eq!(c.transaction_date, "01032017");
        assert_eq!(c.transaction_amount, 40.0);
        assert_eq!(c.other_id, "H6CA34245");
        assert!(!c.is_individual());
    }

    #[test]
    fn zip_is_cut_to_five_characters() {
        let raw = line("C1", "028956146", "01122017", "384", "");
        assert_eq!(Contribution::parse(&raw).unwrap().zip_code, "02895");

        let raw = line("C1", "021", "01122017", "384", "");
        assert_eq!(Contribution::parse(&raw).unwrap().zip_code, "021");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("äöüßé12", 5), "äöüßé");
        assert_eq!(char_len("äöüßé"), 5);
    }

    #[test]
    fn decimal_amounts() {
        let raw = line("C1", "90210", "20170101", "100.40", "");
        assert_eq!(Contribution::parse(&raw).unwrap().transaction_amount, 100.40);
    }

    #[test]
    fn empty_amount_is_malformed() {
        let raw = line("C1", "90210", "20170101", "", "");
        assert_eq!(
            Contribution::parse(&raw),
            Err(RecordError::InvalidAmount { raw: String::new() })
        );
    }

    #[test]
    fn non_numeric_amount_is_malformed() {
        let raw = line("C1", "90210", "20170101", "12abc", "");
        assert!(matches!(
            Contribution::parse(&raw),
            Err(RecordError::InvalidAmount { .. })
        ));
        let raw = line("C1", "90210", "20170101", "inf", "");
        assert!(matches!(
            Contribution::parse(&raw),
            Err(RecordError::NonFiniteAmount { .. })
        ));
    }

    #[test]
    fn short_line_reports_first_missing_field() {
        let err = Contribution::parse("C1|N|TER|P|x|15|IND|NAME|CITY|ST|90210|E|O|01012017").unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingField {
                index: 14,
                name: "TRANSACTION_AMT",
                found: 14
            }
        );
    }
}
