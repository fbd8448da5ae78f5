use std::fmt::{Display, Formatter};

use comfy_table::Color;
use enumset::EnumSet;
use serde::{Deserialize, Serialize};

/// Booking lifecycle status as the backend spells it.
#[derive(Debug, Serialize, Deserialize, clap::ValueEnum, enumset::EnumSetType)]
pub enum BookingStatus {
    /// Created, payment not settled yet.
    Pending,

    Confirmed,

    #[serde(rename = "Checked-In")]
    CheckedIn,

    #[serde(rename = "Checked-Out")]
    CheckedOut,

    Cancelled,
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Confirmed => write!(f, "Confirmed"),
            Self::CheckedIn => write!(f, "Checked-In"),
            Self::CheckedOut => write!(f, "Checked-Out"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl BookingStatus {
    /// Statuses an administrator may move a booking to from this one.
    pub fn next_statuses(self) -> EnumSet<Self> {
        match self {
            Self::Pending => Self::Confirmed | Self::Cancelled,
            Self::Confirmed => Self::CheckedIn | Self::Cancelled,
            Self::CheckedIn => EnumSet::only(Self::CheckedOut),
            Self::CheckedOut | Self::Cancelled => EnumSet::empty(),
        }
    }

    pub fn ensure_transition(self, next: Self) -> Result<(), StatusTransitionError> {
        if self.next_statuses().contains(next) {
            Ok(())
        } else {
            Err(StatusTransitionError { from: self, to: next })
        }
    }

    /// Paid bookings have a receipt.
    pub const fn is_paid(self) -> bool {
        matches!(self, Self::Confirmed | Self::CheckedIn | Self::CheckedOut)
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Pending => Color::DarkYellow,
            Self::Confirmed => Color::Green,
            Self::CheckedIn => Color::Blue,
            Self::CheckedOut => Color::Reset,
            Self::Cancelled => Color::Red,
        }
    }
}

#[derive(Copy, Clone, Debug, derive_more::Display, derive_more::Error)]
#[display("a booking cannot go from `{from}` to `{to}`")]
pub struct StatusTransitionError {
    pub from: BookingStatus,
    pub to: BookingStatus,
}
