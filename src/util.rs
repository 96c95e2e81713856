use std::num::NonZeroU32;

use thiserror::Error;

/// Allocation guard on how many points a single round may ask for
pub const MAX_TARGETS: u32 = 100_000;

/// Reasons a count typed into the input box cannot start a round
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("Please enter a valid number.")]
    NotANumber,
    #[error("Please enter a number greater than zero.")]
    NotPositive,
    #[error("Too many points: a board holds at most {max}.")]
    TooMany { max: u32 },
}

/// Parse the raw count input into a positive number of targets.
///
/// Reads an optional sign and the leading run of digits, ignoring whatever
/// follows, so `"12abc"` is 12 and `"4.5"` is 4.
pub fn parse_count(input: &str) -> Result<NonZeroU32, StartError> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let digits = &rest[..digits_len];
    if digits.is_empty() {
        return Err(StartError::NotANumber);
    }
    if negative {
        return Err(StartError::NotPositive);
    }

    // Only digits remain, so a failed parse means overflow
    let value: u64 = digits
        .parse()
        .map_err(|_| StartError::TooMany { max: MAX_TARGETS })?;
    if value > MAX_TARGETS as u64 {
        return Err(StartError::TooMany { max: MAX_TARGETS });
    }

    NonZeroU32::new(value as u32).ok_or(StartError::NotPositive)
}

/// Render elapsed milliseconds as `MM:SS:HH` (HH = hundredths)
pub fn format_elapsed(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let hundredths = (ms % 1000) / 10;

    format!("{minutes:02}:{seconds:02}:{hundredths:02}")
}
