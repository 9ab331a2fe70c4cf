//! Single-line text buffer used by the create form and the filter bar.

/// Longest value either input accepts, in characters.
pub const CHAR_LIMIT: usize = 128;

/// Append-only line editor with backspace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the buffer, truncating to [`CHAR_LIMIT`] characters.
    pub fn set(&mut self, value: &str) {
        self.value = value.chars().take(CHAR_LIMIT).collect();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Appends `c`; returns `false` when the buffer is full.
    pub fn push(&mut self, c: char) -> bool {
        if self.value.chars().count() >= CHAR_LIMIT {
            return false;
        }
        self.value.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_char_limit() {
        let mut input = TextInput::default();
        input.set(&"x".repeat(200));
        assert_eq!(input.value().chars().count(), CHAR_LIMIT);
        assert!(!input.push('y'));
    }

    #[test]
    fn backspace_removes_whole_characters() {
        let mut input = TextInput::default();
        input.set("snap-ü");
        input.backspace();
        assert_eq!(input.value(), "snap-");
    }
}
