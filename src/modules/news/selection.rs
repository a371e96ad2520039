/// Most headlines a user can keep checked as context for rewrites.
pub const MAX_SELECTED: usize = 3;

/// Toggle a headline in the checked set. Checking past the limit evicts
/// the oldest selection instead of rejecting the new one.
pub fn toggle_selection(mut selected: Vec<String>, headline: &str) -> Vec<String> {
    if let Some(pos) = selected.iter().position(|s| s == headline) {
        selected.remove(pos);
        return selected;
    }
    selected.push(headline.to_string());
    while selected.len() > MAX_SELECTED {
        selected.remove(0);
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn checking_adds_headline() {
        let selected = toggle_selection(vec![], "a");
        assert_eq!(selected, owned(&["a"]));
    }

    #[test]
    fn checking_again_removes_it() {
        let selected = toggle_selection(owned(&["a", "b"]), "a");
        assert_eq!(selected, owned(&["b"]));
    }

    #[test]
    fn fourth_selection_evicts_the_oldest() {
        let selected = toggle_selection(owned(&["a", "b", "c"]), "d");
        assert_eq!(selected, owned(&["b", "c", "d"]));
    }

    #[test]
    fn never_exceeds_the_limit() {
        let mut selected = vec![];
        for headline in ["a", "b", "c", "d", "e"] {
            selected = toggle_selection(selected, headline);
            assert!(selected.len() <= MAX_SELECTED);
        }
        assert_eq!(selected, owned(&["c", "d", "e"]));
    }
}
