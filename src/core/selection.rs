use chrono::NaiveDate;

use crate::core::availability::DisabledDates;

/// In-progress or completed check-in and check-out pick.
///
/// Built by two sequential picks, a third pick restarts the range.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[must_use]
pub struct DateRangeSelection {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRangeSelection {
    pub const fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub const fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from: Some(from), to: Some(to) }
    }

    /// Apply the next calendar pick.
    ///
    /// A disabled day is ignored and leaves the selection as is, in which case `false` is returned.
    /// Picking before `from` while only `from` is set completes the range backwards.
    pub fn pick(&mut self, date: NaiveDate, disabled: &DisabledDates) -> bool {
        if disabled.contains(date) {
            return false;
        }
        match (self.from, self.to) {
            (Some(from), None) if date < from => *self = Self::between(date, from),
            (Some(_), None) => self.to = Some(date),
            (None, _) | (Some(_), Some(_)) => *self = Self::new(Some(date), None),
        }
        true
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    /// Validate the selection for booking.
    ///
    /// Every day from check-in to check-out inclusive must be selectable.
    pub fn validate(
        self,
        disabled: &DisabledDates,
    ) -> Result<(NaiveDate, NaiveDate), SelectionError> {
        let from = self.from.ok_or(SelectionError::MissingCheckIn)?;
        let to = self.to.ok_or(SelectionError::MissingCheckOut)?;
        if to <= from {
            return Err(SelectionError::EmptyStay { from, to });
        }
        if let Some(date) = disabled.first_in(from, to) {
            return Err(SelectionError::Unavailable(date));
        }
        Ok((from, to))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SelectionError {
    #[display("please select a check-in date")]
    MissingCheckIn,

    #[display("please select a check-out date")]
    MissingCheckOut,

    #[display("check-out `{to}` must be after check-in `{from}`")]
    EmptyStay { from: NaiveDate, to: NaiveDate },

    #[display("`{_0}` is not available")]
    Unavailable(#[error(not(source))] NaiveDate),
}
