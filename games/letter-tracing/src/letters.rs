use serde::Deserialize;

/// The symbols offered on the menu, in menu order. Deserializes from a JSON
/// array of strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct LetterSet {
    letters: Vec<String>,
}

impl LetterSet {
    /// "A" through "Z".
    pub fn latin_uppercase() -> Self {
        Self {
            letters: ('A'..='Z').map(String::from).collect(),
        }
    }

    /// Pick a letter by index, wrapping around. None when the set is empty.
    pub fn pick(&self, index: usize) -> Option<&str> {
        if self.letters.is_empty() {
            return None;
        }
        Some(&self.letters[index % self.letters.len()])
    }

    /// Index of the letter after `index`, wrapping to the first.
    pub fn next_index(&self, index: usize) -> usize {
        if self.letters.is_empty() {
            0
        } else {
            (index + 1) % self.letters.len()
        }
    }

    /// Number of letters in the set.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl Default for LetterSet {
    fn default() -> Self {
        Self::latin_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_letters() {
        let json = r#"["b", "d", "p", "q"]"#;
        let set: LetterSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(set.pick(1), Some("d"));
    }

    #[test]
    fn pick_wraps_around() {
        let set = LetterSet::latin_uppercase();
        assert_eq!(set.len(), 26);
        assert_eq!(set.pick(0), Some("A"));
        assert_eq!(set.pick(25), Some("Z"));
        assert_eq!(set.pick(27), Some("B")); // 27 % 26 = 1
        assert_eq!(set.next_index(25), 0);
    }

    #[test]
    fn empty_set_picks_nothing() {
        let set: LetterSet = serde_json::from_str("[]").unwrap();
        assert!(set.is_empty());
        assert_eq!(set.pick(0), None);
        assert_eq!(set.next_index(3), 0);
    }
}
