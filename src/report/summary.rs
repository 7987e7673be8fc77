use crate::data::{PricePoint, ValuationPoint};
use prettytable::{Cell, Row, Table};
use serde::Serialize;

//record count and date range of one loaded series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesSummary {
    pub name: String,
    pub records: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

impl SeriesSummary {
    pub fn from_dates<'a, I>(name: &str, dates: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut records = 0;
        let mut first_date = None;
        let mut last_date = None;

        for date in dates {
            if first_date.is_none() {
                first_date = Some(date.to_string());
            }
            last_date = Some(date);
            records += 1;
        }

        SeriesSummary {
            name: name.to_string(),
            records,
            first_date,
            last_date: last_date.map(str::to_string),
        }
    }

    pub fn for_prices(points: &[PricePoint]) -> Self {
        Self::from_dates("BTC price", points.iter().map(|p| p.date.as_str()))
    }

    pub fn for_valuations(points: &[ValuationPoint]) -> Self {
        Self::from_dates("MNAV", points.iter().map(|p| p.date.as_str()))
    }

    //"first to last" in file order, or a dash for an empty series
    pub fn range(&self) -> String {
        match (&self.first_date, &self.last_date) {
            (Some(first), Some(last)) => format!("{} to {}", first, last),
            _ => "-".to_string(),
        }
    }
}

//prints summaries in a formatted table
pub fn pretty_print_table(summaries: &[SeriesSummary]) {
    let mut table = Table::new();

    table.add_row(Row::new(vec![
        Cell::new("Series"),
        Cell::new("Records"),
        Cell::new("Date Range"),
    ]));

    for summary in summaries {
        table.add_row(Row::new(vec![
            Cell::new(&summary.name),
            Cell::new(&format!("{}", summary.records)),
            Cell::new(&summary.range()),
        ]));
    }

    table.printstd();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_in_file_order() {
        let points = vec![
            PricePoint::new("2023-01-02", 1.0),
            PricePoint::new("2023-01-01", 2.0),
            PricePoint::new("2023-01-05", 3.0),
        ];
        let summary = SeriesSummary::for_prices(&points);

        assert_eq!(summary.records, 3);
        assert_eq!(summary.range(), "2023-01-02 to 2023-01-05");
    }

    #[test]
    fn empty_series_has_no_range() {
        let summary = SeriesSummary::for_valuations(&[]);
        assert_eq!(summary.records, 0);
        assert_eq!(summary.first_date, None);
        assert_eq!(summary.range(), "-");
    }
}
