use crate::error::RenderError;

/// Formats a playback length in seconds for `itunes:duration`.
///
/// Durations under an hour are written `MM:SS`; longer ones `H:MM:SS`, with
/// the hour count unpadded and minutes/seconds always two digits.
///
/// # Errors
///
/// Returns [`RenderError::InvalidDuration`] for negative input.
///
/// # Examples
///
/// ```
/// use feedcraft::rss2::format_duration;
///
/// assert_eq!(format_duration(5).unwrap(), "00:05");
/// assert_eq!(format_duration(65).unwrap(), "01:05");
/// assert_eq!(format_duration(3725).unwrap(), "1:02:05");
/// ```
pub fn format_duration(duration: i64) -> Result<String, RenderError> {
    if duration < 0 {
        return Err(RenderError::InvalidDuration(duration));
    }

    let seconds = duration % 60;
    let minutes = (duration / 60) % 60;
    let hours = duration / 3600;

    if hours > 0 {
        Ok(format!("{hours}:{minutes:02}:{seconds:02}"))
    } else {
        Ok(format!("{minutes:02}:{seconds:02}"))
    }
}
