/// Format a show timestamp for display, e.g. "Sat 06/20/26 08:00 PM"
///
/// Timestamps are stored as naive UTC values; no timezone conversion happens here.
#[askama::filter_fn]
pub fn human_datetime(
    input: &chrono::NaiveDateTime,
    _: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(format_datetime(input))
}

fn format_datetime(timestamp: &chrono::NaiveDateTime) -> String {
    timestamp.format("%a %m/%d/%y %I:%M %p").to_string()
}
