use chrono::NaiveDateTime;

/// Human readable age of a UTC timestamp relative to `now`
pub fn format_relative_time(datetime: &NaiveDateTime, now: &NaiveDateTime) -> String {
    let duration = now.signed_duration_since(*datetime);

    let seconds = duration.num_seconds().max(0);
    let minutes = duration.num_minutes();
    let hours = duration.num_hours();
    let days = duration.num_days();

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} min{} ago", minutes, if minutes == 1 { "" } else { "s" })
    } else if hours < 24 {
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else {
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    }
}

/// Sleep for `secs` on the browser event loop
///
/// Dropping the returned future (e.g. on unmount) abandons the wait.
#[cfg(feature = "web")]
pub async fn sleep_secs(secs: u64) {
    let js = format!(
        "await new Promise(resolve => setTimeout(resolve, {})); return 0;",
        secs.saturating_mul(1000)
    );
    let _ = dioxus::document::eval(&js).await;
}
