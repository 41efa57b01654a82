use std::collections::BTreeSet;

use super::model::{Category, Day, Row, Sex, Smoker, Time};

// ---------------------------------------------------------------------------
// Interval – a closed [min, max] range
// ---------------------------------------------------------------------------

/// A closed interval. `min <= max` holds for every interval built with
/// [`Interval::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Interval<T> {
    /// Build an interval from two bounds in either order.
    pub fn new(a: T, b: T) -> Self {
        if b < a {
            Interval { min: b, max: a }
        } else {
            Interval { min: a, max: b }
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

// ---------------------------------------------------------------------------
// Filter state: ranges plus the selected values per categorical column
// ---------------------------------------------------------------------------

/// Current value of every filter control.
///
/// An empty selection set means nothing of that column is selected, so no
/// row passes.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub bill_range: Interval<f64>,
    pub time_selection: BTreeSet<Time>,
    pub sex_selection: BTreeSet<Sex>,
    pub smoker_selection: BTreeSet<Smoker>,
    pub day_selection: BTreeSet<Day>,
    pub size_range: Interval<u32>,
}

/// Default bill amount range.
pub const DEFAULT_BILL_RANGE: Interval<f64> = Interval {
    min: 10.0,
    max: 50.0,
};

/// Default party size range.
pub const DEFAULT_SIZE_RANGE: Interval<u32> = Interval { min: 1, max: 6 };

fn all_of<C: Category>() -> BTreeSet<C> {
    C::ALL.iter().copied().collect()
}

/// The default snapshot the "Reset filter" control restores: the full bill
/// and size ranges with every category value selected.
pub fn reset() -> FilterState {
    FilterState {
        bill_range: DEFAULT_BILL_RANGE,
        time_selection: all_of(),
        sex_selection: all_of(),
        smoker_selection: all_of(),
        day_selection: all_of(),
        size_range: DEFAULT_SIZE_RANGE,
    }
}

impl Default for FilterState {
    fn default() -> Self {
        reset()
    }
}

impl FilterState {
    /// Whether a row passes all six predicates.
    pub fn matches(&self, row: &Row) -> bool {
        self.bill_range.contains(row.total_bill)
            && self.time_selection.contains(&row.time)
            && self.sex_selection.contains(&row.sex)
            && self.smoker_selection.contains(&row.smoker)
            && self.day_selection.contains(&row.day)
            && self.size_range.contains(row.size)
    }
}

/// Return the rows passing every active filter, in input order.
pub fn apply(rows: &[Row], state: &FilterState) -> Vec<Row> {
    rows.iter().filter(|row| state.matches(row)).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(total_bill: f64, tip: f64, day: Day, size: u32) -> Row {
        Row {
            total_bill,
            tip,
            sex: Sex::Male,
            smoker: Smoker::No,
            day,
            time: Time::Dinner,
            size,
        }
    }

    #[test]
    fn test_interval_orders_bounds() {
        let iv = Interval::new(50.0, 10.0);
        assert_eq!(iv.min, 10.0);
        assert_eq!(iv.max, 50.0);
        assert!(iv.contains(10.0));
        assert!(iv.contains(50.0));
        assert!(!iv.contains(50.01));
    }

    #[test]
    fn test_reset_snapshot() {
        let state = reset();
        assert_eq!(state.bill_range, Interval::new(10.0, 50.0));
        assert_eq!(state.size_range, Interval::new(1, 6));
        assert_eq!(
            state.time_selection,
            BTreeSet::from([Time::Lunch, Time::Dinner])
        );
        assert_eq!(state.sex_selection, BTreeSet::from([Sex::Male, Sex::Female]));
        assert_eq!(state.smoker_selection, BTreeSet::from([Smoker::Yes, Smoker::No]));
        assert_eq!(
            state.day_selection,
            BTreeSet::from([Day::Thur, Day::Fri, Day::Sat, Day::Sun])
        );
        assert_eq!(FilterState::default(), state);
    }

    #[test]
    fn test_apply_bill_range_bounds_inclusive() {
        let rows = vec![
            row(9.99, 1.0, Day::Sat, 2),
            row(10.0, 1.5, Day::Sat, 2),
            row(50.0, 8.0, Day::Sun, 2),
            row(50.5, 9.0, Day::Sun, 2),
        ];
        let out = apply(&rows, &reset());
        assert_eq!(out, vec![rows[1], rows[2]]);
    }

    #[test]
    fn test_apply_size_range() {
        let rows = vec![row(20.0, 3.0, Day::Sat, 1), row(20.0, 3.0, Day::Sat, 5)];
        let mut state = reset();
        state.size_range = Interval::new(2, 6);
        assert_eq!(apply(&rows, &state), vec![rows[1]]);
    }

    #[test]
    fn test_apply_preserves_order() {
        let rows = vec![
            row(30.0, 5.0, Day::Sun, 4),
            row(12.0, 2.0, Day::Thur, 2),
            row(40.0, 7.0, Day::Fri, 3),
            row(20.0, 3.0, Day::Sat, 2),
        ];
        let mut state = reset();
        state.day_selection = BTreeSet::from([Day::Sun, Day::Fri, Day::Sat]);
        assert_eq!(apply(&rows, &state), vec![rows[0], rows[2], rows[3]]);
    }

    #[test]
    fn test_apply_empty_selection_yields_nothing() {
        let rows = vec![row(20.0, 3.0, Day::Sat, 2), row(30.0, 5.0, Day::Sun, 4)];

        let mut state = reset();
        state.smoker_selection.clear();
        assert!(apply(&rows, &state).is_empty());

        let mut state = reset();
        state.time_selection.clear();
        assert!(apply(&rows, &state).is_empty());
    }

    fn arb_row() -> impl Strategy<Value = Row> {
        (
            0.0f64..60.0,
            0.0f64..12.0,
            prop::sample::select(Sex::ALL),
            prop::sample::select(Smoker::ALL),
            prop::sample::select(Day::ALL),
            prop::sample::select(Time::ALL),
            1u32..8,
        )
            .prop_map(|(total_bill, tip, sex, smoker, day, time, size)| Row {
                total_bill,
                tip,
                sex,
                smoker,
                day,
                time,
                size,
            })
    }

    fn arb_subset<C: Category>() -> impl Strategy<Value = BTreeSet<C>> {
        prop::sample::subsequence(C::ALL, 0..=C::ALL.len())
            .prop_map(|values| values.into_iter().collect())
    }

    fn arb_state() -> impl Strategy<Value = FilterState> {
        (
            (0.0f64..60.0, 0.0f64..60.0),
            arb_subset::<Time>(),
            arb_subset::<Sex>(),
            arb_subset::<Smoker>(),
            arb_subset::<Day>(),
            (1u32..8, 1u32..8),
        )
            .prop_map(|(bill, time, sex, smoker, day, size)| FilterState {
                bill_range: Interval::new(bill.0, bill.1),
                time_selection: time,
                sex_selection: sex,
                smoker_selection: smoker,
                day_selection: day,
                size_range: Interval::new(size.0, size.1),
            })
    }

    proptest! {
        #[test]
        fn prop_retained_rows_pass_and_excluded_rows_fail(
            rows in prop::collection::vec(arb_row(), 0..40),
            state in arb_state(),
        ) {
            let out = apply(&rows, &state);
            prop_assert!(out.iter().all(|r| state.matches(r)));

            let excluded = rows.iter().filter(|r| !state.matches(r)).count();
            prop_assert_eq!(out.len() + excluded, rows.len());

            // Order-preserving subsequence of the input.
            let mut it = rows.iter();
            for kept in &out {
                prop_assert!(it.any(|r| r == kept));
            }
        }

        #[test]
        fn prop_apply_is_idempotent(
            rows in prop::collection::vec(arb_row(), 0..40),
            state in arb_state(),
        ) {
            let once = apply(&rows, &state);
            prop_assert_eq!(apply(&once, &state), once.clone());
            prop_assert_eq!(apply(&rows, &state), once);
        }

        #[test]
        fn prop_empty_day_selection_empties_view(
            rows in prop::collection::vec(arb_row(), 0..40),
            state in arb_state(),
        ) {
            let mut state = state;
            state.day_selection.clear();
            prop_assert!(apply(&rows, &state).is_empty());
        }
    }
}
