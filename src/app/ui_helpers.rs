use chrono::{DateTime, Local, Utc};

pub fn wrap_prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

pub fn wrap_next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current + 1 >= len {
        0
    } else {
        current + 1
    }
}

pub fn truncate_label(value: &str, max_chars: usize) -> String {
    let count = value.chars().count();
    if count <= max_chars {
        return value.to_string();
    }

    if max_chars <= 3 {
        return value.chars().take(max_chars).collect();
    }

    let prefix: String = value.chars().take(max_chars - 3).collect();
    format!("{}...", prefix)
}

pub fn format_verse_fraction(completed: u32, total: u32) -> String {
    format!("{}/{}", completed, total)
}

pub fn format_updated_label(updated_at: DateTime<Utc>) -> String {
    let local = updated_at.with_timezone(&Local);
    let today = Local::now().date_naive();
    if local.date_naive() == today {
        local.format("%H:%M").to_string()
    } else {
        local.format("%b %-d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{format_verse_fraction, truncate_label, wrap_next_index, wrap_prev_index};

    #[test]
    fn test_wrap_prev_index_wraps_to_end() {
        assert_eq!(wrap_prev_index(0, 5), 4);
        assert_eq!(wrap_prev_index(3, 5), 2);
        assert_eq!(wrap_prev_index(0, 0), 0);
    }

    #[test]
    fn test_wrap_next_index_wraps_to_start() {
        assert_eq!(wrap_next_index(4, 5), 0);
        assert_eq!(wrap_next_index(1, 5), 2);
        assert_eq!(wrap_next_index(0, 0), 0);
    }

    #[test]
    fn test_truncate_label_keeps_short_values() {
        assert_eq!(truncate_label("Al-Fatiha", 24), "Al-Fatiha");
        assert_eq!(truncate_label("The Family of Imraan", 12), "The Famil...");
        assert_eq!(truncate_label("Ya-Sin", 2), "Ya");
    }

    #[test]
    fn test_format_verse_fraction() {
        assert_eq!(format_verse_fraction(150, 286), "150/286");
        assert_eq!(format_verse_fraction(0, 7), "0/7");
    }
}
