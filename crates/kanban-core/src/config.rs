//! Input limits applied by validation.

/// Upper bounds for user-entered text, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_title_len: usize,
    pub max_label_len: usize,
    pub max_description_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_title_len: 200,
            max_label_len: 60,
            max_description_len: 10_000,
        }
    }
}
