use std::fmt;
use std::ops::Deref;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Category – a closed set of labels for one categorical column
// ---------------------------------------------------------------------------

/// A categorical column value with a fixed, known set of labels.
///
/// Implemented by the four categorical columns of the tips dataset so the
/// loaders, the filter panel and the colour map can treat them uniformly.
pub trait Category: Copy + Ord + fmt::Debug + 'static {
    /// Column name as it appears in the data file header.
    const COLUMN: &'static str;
    /// All values in display order.
    const ALL: &'static [Self];

    /// Label as written in the data file.
    fn as_str(&self) -> &'static str;

    /// Parse a label from the data file (exact match).
    fn parse(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == label)
    }
}

macro_rules! category {
    ($name:ident, $column:literal, [$($variant:ident),+ $(,)?]) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl Category for $name {
            const COLUMN: &'static str = $column;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

category!(Sex, "sex", [Male, Female]);
category!(Smoker, "smoker", [Yes, No]);
category!(Day, "day", [Thur, Fri, Sat, Sun]);
category!(Time, "time", [Lunch, Dinner]);

// ---------------------------------------------------------------------------
// Row – one recorded transaction
// ---------------------------------------------------------------------------

/// Required columns, in the canonical file order.
pub const REQUIRED_COLUMNS: [&str; 7] =
    ["total_bill", "tip", "sex", "smoker", "day", "time", "size"];

/// One restaurant bill.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Row {
    /// Bill amount in currency units.
    pub total_bill: f64,
    /// Tip amount in currency units.
    pub tip: f64,
    pub sex: Sex,
    pub smoker: Smoker,
    pub day: Day,
    pub time: Time,
    /// Party size (>= 1).
    pub size: u32,
}

// ---------------------------------------------------------------------------
// CategoryColumn – runtime selector over the categorical columns
// ---------------------------------------------------------------------------

/// Names one of the categorical columns at runtime (e.g. for colour-by).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CategoryColumn {
    Sex,
    Smoker,
    Day,
    Time,
}

impl CategoryColumn {
    pub const ALL: [CategoryColumn; 4] = [
        CategoryColumn::Sex,
        CategoryColumn::Smoker,
        CategoryColumn::Day,
        CategoryColumn::Time,
    ];

    /// Human-readable heading for the column.
    pub fn title(&self) -> &'static str {
        match self {
            CategoryColumn::Sex => "Gender",
            CategoryColumn::Smoker => "Smoker status",
            CategoryColumn::Day => "Day of the week",
            CategoryColumn::Time => "Food service",
        }
    }

    /// Every label the column can take, in display order.
    pub fn labels(&self) -> Vec<&'static str> {
        fn labels_of<C: Category>() -> Vec<&'static str> {
            C::ALL.iter().map(|v| v.as_str()).collect()
        }
        match self {
            CategoryColumn::Sex => labels_of::<Sex>(),
            CategoryColumn::Smoker => labels_of::<Smoker>(),
            CategoryColumn::Day => labels_of::<Day>(),
            CategoryColumn::Time => labels_of::<Time>(),
        }
    }

    /// The label of this column for a given row.
    pub fn label_of(&self, row: &Row) -> &'static str {
        match self {
            CategoryColumn::Sex => row.sex.as_str(),
            CategoryColumn::Smoker => row.smoker.as_str(),
            CategoryColumn::Day => row.day.as_str(),
            CategoryColumn::Time => row.time.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded dataset in file order. Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        Dataset { rows }
    }
}

impl Deref for Dataset {
    type Target = [Row];

    fn deref(&self) -> &[Row] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_exact_labels() {
        assert_eq!(Day::parse("Thur"), Some(Day::Thur));
        assert_eq!(Day::parse("Thursday"), None);
        assert_eq!(Smoker::parse("No"), Some(Smoker::No));
        assert_eq!(Time::parse("dinner"), None);
    }

    #[test]
    fn test_category_display_matches_file_label() {
        for day in Day::ALL {
            assert_eq!(Day::parse(&day.to_string()), Some(*day));
        }
        assert_eq!(Sex::Female.to_string(), "Female");
    }

    #[test]
    fn test_category_column_label_of() {
        let row = Row {
            total_bill: 16.99,
            tip: 1.01,
            sex: Sex::Female,
            smoker: Smoker::No,
            day: Day::Sun,
            time: Time::Dinner,
            size: 2,
        };
        assert_eq!(CategoryColumn::Sex.label_of(&row), "Female");
        assert_eq!(CategoryColumn::Day.label_of(&row), "Sun");
        assert_eq!(CategoryColumn::Time.labels(), vec!["Lunch", "Dinner"]);
    }
}
