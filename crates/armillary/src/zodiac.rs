//! The twelve signs around the sun's ring.

use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

pub const SIGN_COUNT: usize = 12;

/// Ring-order zodiac signs; division 0 of the sun's ring carries Aries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::iter().nth(idx % SIGN_COUNT)
    }
}
