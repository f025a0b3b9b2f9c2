//! Minimal CSV reader: quoted fields, escaped quotes, CRLF line endings.

/// Split CSV text into records of fields.
///
/// Handles double-quoted fields containing commas and newlines, with `""` as
/// the escaped quote. Empty lines between records are skipped.
pub(crate) fn parse_records(input: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                if record.len() > 1 || !record[0].is_empty() {
                    records.push(std::mem::take(&mut record));
                } else {
                    record.clear();
                }
            }
            _ => field.push(c),
        }
    }

    // Final record without a trailing newline.
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        if record.len() > 1 || !record[0].is_empty() {
            records.push(record);
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::parse_records;

    #[test]
    fn plain_fields() {
        let records = parse_records("a,b,c\nd,e,f\n");
        assert_eq!(records, vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
    }

    #[test]
    fn quoted_field_with_commas() {
        let records = parse_records("x,\"one, two, three\",y\n");
        assert_eq!(records, vec![vec!["x", "one, two, three", "y"]]);
    }

    #[test]
    fn escaped_quotes() {
        let records = parse_records("\"say \"\"hi\"\"\",b\n");
        assert_eq!(records, vec![vec!["say \"hi\"", "b"]]);
    }

    #[test]
    fn crlf_and_missing_trailing_newline() {
        let records = parse_records("a,b\r\nc,d");
        assert_eq!(records, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let records = parse_records("a,b\n\n\nc,d\n");
        assert_eq!(records, vec![vec!["a", "b"], vec!["c", "d"]]);
    }
}
