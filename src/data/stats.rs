use super::model::Row;

/// Text shown in place of any statistic when the filtered view is empty.
pub const NO_DATA: &str = "No data available";

/// Summary of the tip column over a non-empty set of rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    /// Full-precision mean; rounded only when formatted.
    pub average_tip: f64,
    pub max_tip: f64,
    pub min_tip: f64,
}

/// Compute the summary statistics, or `None` when there are no rows.
pub fn summarize(rows: &[Row]) -> Option<SummaryStats> {
    let first = rows.first()?;
    let (sum, min_tip, max_tip) = rows.iter().fold(
        (0.0, first.tip, first.tip),
        |(sum, min, max), row| (sum + row.tip, min.min(row.tip), max.max(row.tip)),
    );

    Some(SummaryStats {
        count: rows.len(),
        average_tip: sum / rows.len() as f64,
        max_tip,
        min_tip,
    })
}

/// `"$3.50"`-style amount with two decimals.
pub fn format_currency(symbol: &str, amount: f64) -> String {
    format!("{symbol}{amount:.2}")
}

/// `"12 sales"`, or the no-data sentinel.
pub fn format_count(stats: Option<&SummaryStats>) -> String {
    match stats {
        Some(s) => format!("{} sales", s.count),
        None => NO_DATA.to_string(),
    }
}

/// Format one tip statistic, or the no-data sentinel.
pub fn format_tip(
    stats: Option<&SummaryStats>,
    symbol: &str,
    pick: impl Fn(&SummaryStats) -> f64,
) -> String {
    stats
        .map(|s| format_currency(symbol, pick(s)))
        .unwrap_or_else(|| NO_DATA.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Day, Sex, Smoker, Time};

    fn tip_row(tip: f64) -> Row {
        Row {
            total_bill: 20.0,
            tip,
            sex: Sex::Female,
            smoker: Smoker::Yes,
            day: Day::Fri,
            time: Time::Lunch,
            size: 2,
        }
    }

    #[test]
    fn test_summarize_empty_is_none() {
        assert_eq!(summarize(&[]), None);
        assert_eq!(format_count(None), NO_DATA);
        assert_eq!(format_tip(None, "$", |s| s.max_tip), NO_DATA);
    }

    #[test]
    fn test_summarize_values() {
        let rows: Vec<Row> = [1.0, 4.0, 2.5, 0.0].into_iter().map(tip_row).collect();
        let stats = summarize(&rows).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.max_tip, 4.0);
        assert_eq!(stats.min_tip, 0.0);
        assert!((stats.average_tip - 1.875).abs() < 1e-12);
    }

    #[test]
    fn test_zero_tip_is_not_no_data() {
        let rows = vec![tip_row(0.0)];
        let stats = summarize(&rows);
        assert_eq!(format_tip(stats.as_ref(), "$", |s| s.min_tip), "$0.00");
        assert_eq!(format_count(stats.as_ref()), "1 sales");
    }

    #[test]
    fn test_average_rounds_only_when_formatted() {
        let rows: Vec<Row> = [1.0, 1.0, 2.0].into_iter().map(tip_row).collect();
        let stats = summarize(&rows).unwrap();
        assert!((stats.average_tip - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(format_tip(Some(&stats), "$", |s| s.average_tip), "$1.33");
    }

    #[test]
    fn test_average_within_extrema() {
        let rows: Vec<Row> = [3.07, 1.01, 10.0, 5.5, 2.0]
            .into_iter()
            .map(tip_row)
            .collect();
        let stats = summarize(&rows).unwrap();
        assert_eq!(stats.count, rows.len());
        assert!(stats.min_tip <= stats.average_tip && stats.average_tip <= stats.max_tip);
    }
}
