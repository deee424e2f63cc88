//! Human-readable rendering of elapsed seconds.

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Renders a duration using the two most significant units, truncating
/// fractional parts. Negative or non-finite input renders as zero seconds.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    if total < MINUTE {
        return format!("{} seconds", total);
    }

    if total < HOUR {
        let minutes = total / MINUTE;
        return format!("{} minute{}", minutes, plural(minutes));
    }

    if total < DAY {
        let hours = total / HOUR;
        let minutes = (total % HOUR) / MINUTE;
        return if minutes > 0 {
            format!("{}h {}m", hours, minutes)
        } else {
            format!("{} hour{}", hours, plural(hours))
        };
    }

    let days = total / DAY;
    let hours = (total % DAY) / HOUR;
    if hours > 0 {
        format!("{}d {}h", days, hours)
    } else {
        format!("{} day{}", days, plural(days))
    }
}

fn plural(count: u64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
