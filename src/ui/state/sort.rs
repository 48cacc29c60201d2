//! Column sort state and a stable, nulls-last row sort for the tables.

use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Which column a table is sorted by, and in which direction.
///
/// `F` is the table's own column enum. Tables start out descending (newest
/// or largest first) unless they say otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState<F> {
    pub sort_by: F,
    pub order: SortOrder,
}

impl<F: Copy + PartialEq> SortState<F> {
    pub fn new(sort_by: F) -> Self {
        Self {
            sort_by,
            order: SortOrder::Desc,
        }
    }

    pub fn with_order(sort_by: F, order: SortOrder) -> Self {
        Self { sort_by, order }
    }

    /// Clicking the current column flips the direction; clicking a new
    /// column selects it ascending.
    pub fn toggle(&mut self, field: F) {
        if self.sort_by == field {
            self.order = self.order.flipped();
        } else {
            self.sort_by = field;
            self.order = SortOrder::Asc;
        }
    }

    /// Direction indicator for the column header, if this column is active.
    pub fn indicator(&self, field: F) -> Option<&'static str> {
        if self.sort_by == field {
            Some(match self.order {
                SortOrder::Asc => "▲",
                SortOrder::Desc => "▼",
            })
        } else {
            None
        }
    }
}

/// A comparable cell value. Numeric columns and text columns sort under
/// their natural orders; a mixed column is the caller's mistake and sorts
/// numbers before text.
#[derive(Clone, Debug, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

impl From<f64> for SortKey {
    fn from(value: f64) -> Self {
        SortKey::Number(value)
    }
}

impl From<i64> for SortKey {
    fn from(value: i64) -> Self {
        SortKey::Number(value as f64)
    }
}

impl From<u32> for SortKey {
    fn from(value: u32) -> Self {
        SortKey::Number(value as f64)
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::Text(value.to_string())
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::Text(value)
    }
}

/// Returns a freshly ordered copy of `rows`; the input is untouched.
///
/// The accessor maps a row and the active column to its key. Rows whose key
/// is `None` sort last in both directions, and equal keys keep their input
/// order (`sort_by` is stable).
pub fn sort_rows<T: Clone, F: Copy>(
    rows: &[T],
    state: &SortState<F>,
    key: impl Fn(&T, F) -> Option<SortKey>,
) -> Vec<T> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        match (key(a, state.sort_by), key(b, state.sort_by)) {
            (Some(ka), Some(kb)) => match state.order {
                SortOrder::Asc => ka.compare(&kb),
                SortOrder::Desc => kb.compare(&ka),
            },
            // Missing values always sink to the bottom.
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Column {
        Name,
        Price,
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        name: &'static str,
        price: Option<f64>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "samsung",
                price: Some(70_000.0),
            },
            Row {
                name: "kakao",
                price: None,
            },
            Row {
                name: "naver",
                price: Some(180_000.0),
            },
            Row {
                name: "hynix",
                price: Some(70_000.0),
            },
        ]
    }

    fn key(row: &Row, column: Column) -> Option<SortKey> {
        match column {
            Column::Name => Some(row.name.into()),
            Column::Price => row.price.map(SortKey::from),
        }
    }

    #[test]
    fn toggle_flips_direction_on_same_field() {
        let mut state = SortState::new(Column::Price);
        assert_eq!(state.order, SortOrder::Desc);
        state.toggle(Column::Price);
        assert_eq!(state.order, SortOrder::Asc);
        state.toggle(Column::Price);
        assert_eq!(state.order, SortOrder::Desc);
        assert_eq!(state.sort_by, Column::Price);
    }

    #[test]
    fn toggle_resets_to_ascending_on_new_field() {
        let mut state = SortState::new(Column::Price);
        state.toggle(Column::Name);
        assert_eq!(state.sort_by, Column::Name);
        assert_eq!(state.order, SortOrder::Asc);
    }

    #[test]
    fn missing_values_sort_last_in_both_directions() {
        let data = rows();

        let asc = sort_rows(
            &data,
            &SortState::with_order(Column::Price, SortOrder::Asc),
            key,
        );
        assert_eq!(asc.last().unwrap().name, "kakao");
        assert_eq!(asc[0].price, Some(70_000.0));

        let desc = sort_rows(
            &data,
            &SortState::with_order(Column::Price, SortOrder::Desc),
            key,
        );
        assert_eq!(desc.last().unwrap().name, "kakao");
        assert_eq!(desc[0].name, "naver");
    }

    #[test]
    fn descending_reverses_defined_values_only() {
        let data = rows();
        let asc = sort_rows(
            &data,
            &SortState::with_order(Column::Price, SortOrder::Asc),
            key,
        );
        let desc = sort_rows(
            &asc,
            &SortState::with_order(Column::Price, SortOrder::Desc),
            key,
        );

        // Ties keep their stable order in both passes, so compare the key
        // sequence rather than whole rows.
        let asc_prices: Vec<_> = asc.iter().filter_map(|r| r.price).collect();
        let mut desc_prices: Vec<_> = desc.iter().filter_map(|r| r.price).collect();
        desc_prices.reverse();
        assert_eq!(asc_prices, desc_prices);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let data = rows();
        let asc = sort_rows(
            &data,
            &SortState::with_order(Column::Price, SortOrder::Asc),
            key,
        );
        // samsung appears before hynix in the input and both cost 70k.
        let names: Vec<_> = asc.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["samsung", "hynix", "naver", "kakao"]);
    }

    #[test]
    fn text_columns_use_lexicographic_order() {
        let data = rows();
        let asc = sort_rows(
            &data,
            &SortState::with_order(Column::Name, SortOrder::Asc),
            key,
        );
        let names: Vec<_> = asc.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["hynix", "kakao", "naver", "samsung"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let data = rows();
        let before = data.clone();
        let _ = sort_rows(
            &data,
            &SortState::with_order(Column::Price, SortOrder::Asc),
            key,
        );
        assert_eq!(data, before);
    }
}
