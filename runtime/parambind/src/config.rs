use crate::convert::DEFAULT_SEQUENCE_DELIMITER;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
/// Configure the behaviour of a [`Binder`](crate::Binder).
///
/// It can be deserialized from your application configuration:
/// every field is optional and falls back to its default.
pub struct BinderConfig {
    /// The character used to split the input of sequence fields
    /// (`Vec<i64>` and `Vec<String>`), as well as their default literals.
    ///
    /// # Default
    ///
    /// `,`, i.e. `?ids=1,2,3` binds `vec![1, 2, 3]`.
    #[serde(default = "default_sequence_delimiter")]
    pub sequence_delimiter: char,
}

impl BinderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set [`BinderConfig::sequence_delimiter`].
    pub fn sequence_delimiter(mut self, delimiter: char) -> Self {
        self.sequence_delimiter = delimiter;
        self
    }
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            sequence_delimiter: default_sequence_delimiter(),
        }
    }
}

fn default_sequence_delimiter() -> char {
    DEFAULT_SEQUENCE_DELIMITER
}
