// View-model for the annual calendar grid: twelve Sunday-first month grids
// with per-day booked/selected/in-range flags, ready for the templates.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::selection::Selection;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub struct YearGrid {
    pub year: i32,
    pub months: Vec<MonthGrid>,
}

pub struct MonthGrid {
    pub name: &'static str,
    // Leading `None`s pad the first week so day 1 lands on its weekday
    // column; the rest are the month's days in order.
    pub cells: Vec<Option<DayCell>>,
}

pub struct DayCell {
    pub date: NaiveDate,
    pub dom: u32,
    pub booked: bool,
    pub selected: bool,
    pub in_range: bool,
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("month in 1..=12");
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first of next month");
    (next - first).num_days() as u32
}

fn month_grid(
    year: i32,
    month: u32,
    occupied: &BTreeSet<NaiveDate>,
    selection: &Selection,
) -> MonthGrid {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("month in 1..=12");
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<Option<DayCell>> = Vec::with_capacity(leading + 31);
    cells.resize_with(leading, || None);

    for dom in 1..=days_in_month(year, month) {
        let date = NaiveDate::from_ymd_opt(year, month, dom).expect("day within month");
        // Endpoints render as selected; strictly interior days as in-range.
        let selected = match selection {
            Selection::Empty => false,
            Selection::Anchor(anchor) => *anchor == date,
            Selection::Range { start, end } => *start == date || *end == date,
        };
        let in_range = match selection {
            Selection::Range { start, end } => *start < date && date < *end,
            _ => false,
        };
        cells.push(Some(DayCell {
            date,
            dom,
            booked: occupied.contains(&date),
            selected,
            in_range,
        }));
    }

    MonthGrid {
        name: MONTH_NAMES[(month - 1) as usize],
        cells,
    }
}

pub fn year_grid(year: i32, occupied: &BTreeSet<NaiveDate>, selection: &Selection) -> YearGrid {
    YearGrid {
        year,
        months: (1..=12)
            .map(|month| month_grid(year, month, occupied, selection))
            .collect(),
    }
}
