use chrono::{DateTime, FixedOffset};

pub fn format_date(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Clean up free text coming from the tracker for plain-text reports.
///
/// Line endings become `\n`, trailing whitespace is removed, runs of blank
/// lines collapse into one and leading/trailing blank lines are dropped.
pub fn normalize_description(desc: &str) -> String {
    let unified = desc.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = true;
    for line in unified.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            if previous_blank {
                continue;
            }
            previous_blank = true;
        } else {
            previous_blank = false;
        }
        lines.push(line);
    }
    while lines.last() == Some(&"") {
        lines.pop();
    }

    lines.join("\n")
}

/// Prefix every line of `text`, without leaving trailing spaces on blank lines.
pub fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                prefix.trim_end().to_string()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_blank_runs_and_line_endings() {
        let desc = "\r\n\r\nFirst line   \r\n\r\n\r\n\tSecond\r\n\n\n";
        assert_eq!(normalize_description(desc), "First line\n\n\tSecond");
    }

    #[test]
    fn normalize_empty_description() {
        assert_eq!(normalize_description("  \n \n"), "");
    }

    #[test]
    fn indent_keeps_blank_lines_clean() {
        assert_eq!(indent("a\n\nb", "|  "), "|  a\n|\n|  b");
    }

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize(1, "child issue", "child issues"), "1 child issue");
        assert_eq!(pluralize(3, "child issue", "child issues"), "3 child issues");
    }
}
