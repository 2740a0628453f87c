//! Month-grid calendar derived from job scheduled dates.

use std::fmt;

use jiff::civil::{date, Date};

use crate::{
    error::{BoardError, Result},
    models::{Job, JobStatus},
};

/// Civil years jiff can represent; anything outside is rejected up front.
const YEAR_RANGE: std::ops::RangeInclusive<i16> = -9999..=9999;

/// A job pinned to a calendar day.
#[derive(Debug, Clone)]
pub struct CalendarEntry {
    pub id: String,
    pub name: String,
    pub status: JobStatus,
}

/// One day cell in the grid.
#[derive(Debug, Clone)]
pub struct DayCell {
    pub day: i8,
    /// False for the adjacent-month cells padding the first and last week
    pub in_month: bool,
    pub entries: Vec<CalendarEntry>,
}

/// A calendar month laid out in Sunday-first weeks. Slots before the first
/// day and after the last day carry the neighboring months' day numbers,
/// marked out-of-month; jobs are only ever pinned to in-month cells.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub year: i16,
    pub month: i8,
    pub weeks: Vec<Vec<DayCell>>,
}

const MONTH_NAMES: [&str; 12] = [
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

impl MonthGrid {
    /// Lay out the given month, attaching each job whose scheduled date
    /// falls inside it. An unscheduled job never appears on the calendar.
    pub fn build(year: i16, month: i8, jobs: &[Job]) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(BoardError::invalid_input("month")
                .with_reason(format!("{month} is not a month between 1 and 12")));
        }
        if !YEAR_RANGE.contains(&year) {
            return Err(BoardError::invalid_input("year")
                .with_reason(format!("{year} is outside the supported range -9999..=9999")));
        }

        let first = date(year, month, 1);
        let days = first.days_in_month();
        let lead = first.weekday().to_sunday_zero_offset();

        let mut cells: Vec<DayCell> = Vec::new();

        // Trailing days of the previous month fill the lead slots.
        let prev_days = previous_month_days(year, month);
        for day in (prev_days - lead + 1)..=prev_days {
            cells.push(DayCell {
                day,
                in_month: false,
                entries: Vec::new(),
            });
        }

        for day in 1..=days {
            let on = date(year, month, day);
            cells.push(DayCell {
                day,
                in_month: true,
                entries: entries_for(jobs, on),
            });
        }

        // Leading days of the next month pad the final week.
        let mut next_day = 1;
        while cells.len() % 7 != 0 {
            cells.push(DayCell {
                day: next_day,
                in_month: false,
                entries: Vec::new(),
            });
            next_day += 1;
        }

        let weeks = cells.chunks(7).map(<[DayCell]>::to_vec).collect();
        Ok(Self { year, month, weeks })
    }

    /// Shift a month by a signed offset, carrying across year boundaries.
    /// Used for relative calendar navigation.
    pub fn shift(year: i16, month: i8, offset: i32) -> (i16, i8) {
        let total = i32::from(year) * 12 + i32::from(month) - 1 + offset;
        let shifted_year = total.div_euclid(12);
        let shifted_month = total.rem_euclid(12) + 1;
        (shifted_year as i16, shifted_month as i8)
    }

    fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize - 1]
    }
}

fn previous_month_days(year: i16, month: i8) -> i8 {
    let (py, pm) = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    // January of the first supported year has no representable
    // predecessor; treat it as a 31-day month for numbering.
    if !YEAR_RANGE.contains(&py) {
        return 31;
    }
    date(py, pm, 1).days_in_month()
}

fn entries_for(jobs: &[Job], on: Date) -> Vec<CalendarEntry> {
    jobs.iter()
        .filter(|job| job.scheduled_date == Some(on))
        .map(|job| CalendarEntry {
            id: job.id.clone(),
            name: job.name.clone(),
            status: job.status,
        })
        .collect()
}

impl fmt::Display for MonthGrid {
    /// Markdown rendering: the grid itself with adjacent-month days in
    /// parentheses, days with scheduled work flagged with `*`, followed by
    /// a per-day listing of those jobs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} {}", self.month_name(), self.year)?;
        writeln!(f)?;
        writeln!(f, "|Sun|Mon|Tue|Wed|Thu|Fri|Sat|")?;
        writeln!(f, "|-|-|-|-|-|-|-|")?;
        for week in &self.weeks {
            write!(f, "|")?;
            for cell in week {
                if !cell.in_month {
                    write!(f, "({})|", cell.day)?;
                } else if cell.entries.is_empty() {
                    write!(f, "{}|", cell.day)?;
                } else {
                    write!(f, "{}*|", cell.day)?;
                }
            }
            writeln!(f)?;
        }

        let busy: Vec<&DayCell> = self
            .weeks
            .iter()
            .flatten()
            .filter(|cell| !cell.entries.is_empty())
            .collect();
        if !busy.is_empty() {
            writeln!(f)?;
            for cell in busy {
                writeln!(f, "**{} {}**", self.month_name(), cell.day)?;
                for entry in &cell.entries {
                    writeln!(f, "* {} ({}) [{}]", entry.name, entry.id, entry.status)?;
                }
            }
        }
        Ok(())
    }
}
