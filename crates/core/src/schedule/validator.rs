//! Overlap-conflict validation
//!
//! Decides whether a candidate schedule item may be stored next to the
//! owner's existing items. Intervals are half-open: an item ending at 10:00
//! does not collide with one starting at 10:00.

use chrono::NaiveDate;
use timegrid_domain::{DateRange, OverlapScope, Result, ScheduleItem, TimeGridError};

/// Pure accept/reject predicate for schedule items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlapValidator {
    scope: OverlapScope,
}

impl OverlapValidator {
    /// Validator comparing candidates within `scope`.
    pub const fn new(scope: OverlapScope) -> Self {
        Self { scope }
    }

    /// The configured comparison scope.
    pub const fn scope(&self) -> OverlapScope {
        self.scope
    }

    /// Dates whose items a candidate on `date` must be compared against.
    pub fn comparison_window(&self, date: NaiveDate) -> DateRange {
        match self.scope {
            OverlapScope::SameDate => DateRange::day(date),
            OverlapScope::AdjacentDays => DateRange {
                start: date.pred_opt().unwrap_or(date),
                end: date.succ_opt().unwrap_or(date),
            },
        }
    }

    /// Reject items that last zero minutes or end past the last
    /// representable instant.
    ///
    /// # Errors
    /// `InvalidDuration` in both cases.
    pub fn check_duration(candidate: &ScheduleItem) -> Result<()> {
        if candidate.duration_minutes == 0 || candidate.end().is_none() {
            return Err(TimeGridError::InvalidDuration { minutes: candidate.duration_minutes });
        }
        Ok(())
    }

    /// Accept `candidate` unless it overlaps one of `existing`.
    ///
    /// Items of other owners, items outside the comparison window and the
    /// candidate's own stored version (same id) are ignored.
    ///
    /// # Errors
    /// - `InvalidDuration` for a zero-length candidate
    /// - `OverlapConflict` naming the first colliding item
    pub fn validate(&self, candidate: &ScheduleItem, existing: &[ScheduleItem]) -> Result<()> {
        Self::check_duration(candidate)?;

        let window = self.comparison_window(candidate.date);
        let collision = existing
            .iter()
            .filter(|other| other.owner_id == candidate.owner_id)
            .filter(|other| !is_same_item(candidate, other))
            .filter(|other| window.contains(other.date))
            .find(|other| candidate.overlaps(other));

        match collision {
            Some(other) => Err(TimeGridError::OverlapConflict {
                conflicting_id: other.id.clone().unwrap_or_default(),
            }),
            None => Ok(()),
        }
    }
}

fn is_same_item(candidate: &ScheduleItem, other: &ScheduleItem) -> bool {
    candidate.id.is_some() && candidate.id == other.id
}
