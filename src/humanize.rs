//! 秒数を "1 day, 2 hours, 5 minutes" 形式に整形する

const UNITS: [(u64, &str); 3] = [(86_400, "day"), (3_600, "hour"), (60, "minute")];

/// 秒数（None可）を人間向けの文字列に変換
pub fn humanize_seconds(seconds: Option<u64>) -> Option<String> {
    seconds.map(format_duration)
}

/// 日・時間・分に分解し、0でない単位だけを連結する（端数の秒は切り捨て）
pub fn format_duration(seconds: u64) -> String {
    let mut rest = seconds;
    let mut parts = Vec::new();

    for (size, unit) in UNITS {
        let count = rest / size;
        rest %= size;
        if count > 0 {
            let plural = if count > 1 { "s" } else { "" };
            parts.push(format!("{} {}{}", count, unit, plural));
        }
    }

    if parts.is_empty() {
        "0 minutes".to_string()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_stays_none() {
        assert_eq!(humanize_seconds(None), None);
    }

    #[test]
    fn test_zero_and_sub_minute_values() {
        assert_eq!(humanize_seconds(Some(0)).as_deref(), Some("0 minutes"));
        assert_eq!(humanize_seconds(Some(59)).as_deref(), Some("0 minutes"));
    }

    #[test]
    fn test_singular_units() {
        // 90000 = 86400 + 3600
        assert_eq!(format_duration(90_000), "1 day, 1 hour");
        assert_eq!(format_duration(60), "1 minute");
    }

    #[test]
    fn test_plural_units() {
        assert_eq!(format_duration(7_200), "2 hours");
        assert_eq!(format_duration(2 * 86_400 + 3 * 3_600 + 5 * 60 + 42), "2 days, 3 hours, 5 minutes");
    }

    #[test]
    fn test_zero_components_are_skipped() {
        assert_eq!(format_duration(86_400 + 120), "1 day, 2 minutes");
    }
}
