/*!
Operation ID derivation from human readable summaries.
*/

use serde::{Deserialize, Serialize};

/// How words after the first are cased when folding a summary into an ID
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordCasing {
    /// First letter uppercase, the rest lowercase: `HTTP` -> `Http`
    #[default]
    Title,
    /// First letter uppercase, the rest unchanged: `HTTP` -> `HTTP`
    Capitalize,
}

impl WordCasing {
    fn apply(&self, word: &str, out: &mut String) {
        let mut chars = word.chars();
        let Some(first) = chars.next() else {
            return;
        };
        out.extend(first.to_uppercase());
        match self {
            WordCasing::Title => out.extend(chars.flat_map(char::to_lowercase)),
            WordCasing::Capitalize => out.push_str(chars.as_str()),
        }
    }
}

/// Fold a summary into a camel-case operation ID
///
/// The first word is lowercased, every following word is cased by `casing`
/// and appended. Any run of whitespace separates words.
///
/// ```
/// use routedoc::naming::{operation_id, WordCasing};
///
/// assert_eq!(operation_id("List all users", WordCasing::Title), "listAllUsers");
/// ```
pub fn operation_id(summary: &str, casing: WordCasing) -> String {
    let mut words = summary.split_whitespace();
    let mut id = String::with_capacity(summary.len());

    if let Some(first) = words.next() {
        id.extend(first.chars().flat_map(char::to_lowercase));
    }
    for word in words {
        casing.apply(word, &mut id);
    }

    id
}
