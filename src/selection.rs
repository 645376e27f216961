// The two-click range selector and the delete confirmation flow, expressed
// as explicit state machines. Handlers thread these through URLs; all
// transitions are pure and synchronous.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::BookingForm;

// Recoverable validation failures surfaced as transient banners. These never
// reach the network layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Selected range includes booked dates.")]
    RangeCollision,
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Please select a start and end date.")]
    IncompleteRange,
}

// An in-progress range pick: nothing yet, a first click, or a committed
// range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    Anchor(NaiveDate),
    Range { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Updated(Selection),
    // The candidate range crossed an occupied day: the selection is left at
    // its pre-attempt state and the caller surfaces the reason.
    Rejected {
        selection: Selection,
        reason: SelectionError,
    },
}

impl Selection {
    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        Selection::Range { start: lo, end: hi }
    }

    pub fn endpoints(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Selection::Range { start, end } => Some((*start, *end)),
            _ => None,
        }
    }

    // Apply one date click. `occupied` must already exclude the booking under
    // edit, otherwise its own range could never be kept or shrunk.
    pub fn click(self, day: NaiveDate, occupied: &BTreeSet<NaiveDate>) -> ClickOutcome {
        if occupied.contains(&day) {
            // Booked days are not selectable; silent no-op.
            return ClickOutcome::Updated(self);
        }
        match self {
            Selection::Empty | Selection::Range { .. } => {
                ClickOutcome::Updated(Selection::Anchor(day))
            }
            Selection::Anchor(anchor) if anchor == day => ClickOutcome::Updated(self),
            Selection::Anchor(anchor) => {
                let (lo, hi) = if anchor <= day { (anchor, day) } else { (day, anchor) };
                let collides =
                    crate::occupancy::days_inclusive(lo, hi).any(|d| occupied.contains(&d));
                if collides {
                    ClickOutcome::Rejected {
                        selection: self,
                        reason: SelectionError::RangeCollision,
                    }
                } else {
                    ClickOutcome::Updated(Selection::Range { start: lo, end: hi })
                }
            }
        }
    }

    // Round-trip through the `sel` query parameter: "", "d", or "d1,d2".
    // Anything malformed decodes as Empty; a fresh click recovers from there.
    pub fn from_query(raw: &str) -> Self {
        let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
        match raw.split_once(',') {
            None if raw.is_empty() => Selection::Empty,
            None => parse(raw).map(Selection::Anchor).unwrap_or_default(),
            Some((a, b)) => match (parse(a), parse(b)) {
                (Some(start), Some(end)) => Selection::range(start, end),
                _ => Selection::Empty,
            },
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Empty => Ok(()),
            Selection::Anchor(anchor) => write!(f, "{anchor}"),
            Selection::Range { start, end } => write!(f, "{start},{end}"),
        }
    }
}

// Gate between the edit form and the network: only a complete selection plus
// fully populated details may turn into a PUT upstream.
pub fn validate_save(
    form: &BookingForm,
    selection: &Selection,
) -> Result<(NaiveDate, NaiveDate), SelectionError> {
    if form.name.trim().is_empty() || form.email.trim().is_empty() || form.phone.trim().is_empty() {
        return Err(SelectionError::MissingFields);
    }
    selection.endpoints().ok_or(SelectionError::IncompleteRange)
}

// Two-phase delete confirmation. Deleting is irreversible once the upstream
// call succeeds; a failed call falls back to Confirming so the user can
// retry without re-opening the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteFlow {
    #[default]
    Idle,
    Confirming,
    Deleting,
}

impl DeleteFlow {
    // Map the `delete` query parameter to the state it encodes: the Delete
    // button submits "confirm" (a request from idle), the Cancel button
    // submits "" (cancelling an open prompt).
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("confirm") => DeleteFlow::Idle.request(),
            Some(_) => DeleteFlow::Confirming.cancel(),
            None => DeleteFlow::Idle,
        }
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self, DeleteFlow::Confirming)
    }

    pub fn request(self) -> Self {
        match self {
            DeleteFlow::Idle => DeleteFlow::Confirming,
            other => other,
        }
    }

    pub fn cancel(self) -> Self {
        match self {
            DeleteFlow::Confirming => DeleteFlow::Idle,
            other => other,
        }
    }

    // Only a confirmed request may start the delete call.
    pub fn begin(self) -> Self {
        match self {
            DeleteFlow::Confirming => DeleteFlow::Deleting,
            other => other,
        }
    }

    pub fn fail(self) -> Self {
        match self {
            DeleteFlow::Deleting => DeleteFlow::Confirming,
            other => other,
        }
    }
}
