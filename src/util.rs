use std::time::Duration;

/// Wiki titles may contain `/` (e.g. "Either/Or"); spaces are replaced too so
/// file names stay shell-friendly.
pub fn sanitize_filename(title: &str) -> String {
    title.replace(['/', ' '], "_")
}

pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
