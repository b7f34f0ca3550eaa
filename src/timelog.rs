use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::BenchError;

/// Append one benchmark result to the shared time log, creating the file when
/// absent and never rewriting existing lines.
///
/// The layout matches the log this tool has always produced, so old and new
/// runs stay comparable:
///
/// ```text
/// 10.000      -> 1.234s	 --> Inserindo 10.000 registros com sqlx bulk_insert.
/// ```
pub fn log_result(
    row_count: u64,
    elapsed_secs: f64,
    log_path: &Path,
    label: &str,
) -> Result<(), BenchError> {
    let formatted = format_row_count(row_count);
    let padding = " ".repeat(10usize.saturating_sub(formatted.len()));
    let time = (elapsed_secs * 1000.0).round() / 1000.0;

    let line = format!(
        "{formatted} {padding} -> {time}s\t --> Inserindo {formatted} registros com {label}.\n"
    );

    let mut file = OpenOptions::new().create(true).append(true).open(log_path)?;
    file.write_all(line.as_bytes())?;

    log::debug!("appended result for {} rows to {}", formatted, log_path.display());
    Ok(())
}

/// Render a row count with `.` as thousands separator: `10000` -> `10.000`.
fn format_row_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn formats_thousands_with_periods() {
        assert_eq!(format_row_count(0), "0");
        assert_eq!(format_row_count(999), "999");
        assert_eq!(format_row_count(1000), "1.000");
        assert_eq!(format_row_count(10000), "10.000");
        assert_eq!(format_row_count(1_000_000), "1.000.000");
    }

    #[test]
    fn writes_one_formatted_line_ending_with_newline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("time_log.txt");

        log_result(10_000, 1.234, &path, "sqlx bulk_insert").expect("append succeeds");

        let contents = fs::read_to_string(&path).expect("log readable");
        assert!(contents.contains("10.000"));
        assert!(contents.contains("-> 1.234s"));
        assert!(contents.contains("Inserindo 10.000 registros com sqlx bulk_insert."));
        assert!(contents.ends_with('\n'));
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn repeated_calls_strictly_append() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("time_log.txt");

        log_result(1000, 0.5, &path, "sqlx bulk_insert").expect("first append");
        let first = fs::read_to_string(&path).expect("log readable");

        log_result(2000, 0.75, &path, "sqlx bulk_insert").expect("second append");
        let both = fs::read_to_string(&path).expect("log readable");

        assert!(both.starts_with(&first), "prior lines must remain byte-identical");
        assert_eq!(both.lines().count(), 2);
    }

    #[test]
    fn pads_short_counts_to_a_fixed_column() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("time_log.txt");

        log_result(3, 0.001, &path, "sqlx bulk_insert").expect("append succeeds");

        let contents = fs::read_to_string(&path).expect("log readable");
        // one literal space, nine of padding, one more before the arrow
        let expected = format!("3{} -> ", " ".repeat(10));
        assert!(contents.starts_with(&expected));
    }
}
