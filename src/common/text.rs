/// Delimiter the LLM is prompted to place between alternative rewrites.
pub const VARIANT_DELIMITER: &str = "---";

/// Strip delimiter lines and code fences from LLM output.
///
/// The cleaned result never contains a line equal to `---`.
pub fn clean_generated_script(raw: &str) -> String {
    raw.lines()
        .filter(|line| {
            let trimmed = line.trim();
            trimmed != VARIANT_DELIMITER && !trimmed.starts_with("```")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Split LLM output into variants on bare `---` lines, dropping empties.
pub fn split_variants(raw: &str) -> Vec<String> {
    let mut variants = Vec::new();
    let mut current = String::new();

    for line in raw.lines() {
        if line.trim() == VARIANT_DELIMITER {
            if !current.trim().is_empty() {
                variants.push(current.trim().to_string());
            }
            current.clear();
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.trim().is_empty() {
        variants.push(current.trim().to_string());
    }

    variants
}

/// Strip `[mm:ss]` / `(hh:mm:ss)` style timestamp markers from a transcript line.
pub fn strip_timestamps(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '[' || ch == '(' {
            let close = if ch == '[' { ']' } else { ')' };
            let inner: String = chars.clone().take_while(|&c| c != close).collect();
            let is_timestamp = !inner.is_empty()
                && inner.chars().all(|c| c.is_ascii_digit() || c == ':' || c == '.')
                && inner.contains(':');
            if is_timestamp {
                for _ in 0..=inner.chars().count() {
                    chars.next();
                }
                continue;
            }
        }
        out.push(ch);
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_removes_delimiter_lines() {
        let raw = "First take\n---\nSecond take\n --- \nThird";
        let cleaned = clean_generated_script(raw);
        assert!(cleaned.lines().all(|l| l.trim() != "---"));
        assert!(cleaned.contains("First take"));
        assert!(cleaned.contains("Third"));
    }

    #[test]
    fn clean_removes_code_fences() {
        let raw = "```\nJoke here\n```";
        assert_eq!(clean_generated_script(raw), "Joke here");
    }

    #[test]
    fn split_produces_one_variant_per_block() {
        let raw = "Take one.\n---\nTake two.\n---\nTake three.";
        let variants = split_variants(raw);
        assert_eq!(variants, vec!["Take one.", "Take two.", "Take three."]);
    }

    #[test]
    fn split_skips_empty_blocks() {
        let raw = "---\nOnly take.\n---\n---";
        assert_eq!(split_variants(raw), vec!["Only take."]);
    }

    #[test]
    fn strips_bracketed_timestamps() {
        assert_eq!(strip_timestamps("[00:12] hello there"), "hello there");
        assert_eq!(strip_timestamps("so (1:02:03) anyway"), "so anyway");
    }

    #[test]
    fn keeps_non_timestamp_brackets() {
        assert_eq!(strip_timestamps("[laughs] sure"), "[laughs] sure");
    }
}
