use syn::LitStr;

/// Case conventions accepted by `rename_all`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    pub fn parse(lit: &LitStr) -> syn::Result<Self> {
        Self::from_name(&lit.value()).ok_or_else(|| {
            syn::Error::new_spanned(
                lit,
                format!("unknown rename rule `{}`", lit.value()),
            )
        })
    }

    fn from_name(rule: &str) -> Option<Self> {
        match rule {
            "lowercase" => Some(Self::Lower),
            "UPPERCASE" => Some(Self::Upper),
            "PascalCase" => Some(Self::Pascal),
            "camelCase" => Some(Self::Camel),
            "snake_case" => Some(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Some(Self::ScreamingSnake),
            "kebab-case" => Some(Self::Kebab),
            "SCREAMING-KEBAB-CASE" => Some(Self::ScreamingKebab),
            _ => None,
        }
    }

    /// Apply to a snake_case field name
    pub fn apply_to_field(self, field: &str) -> String {
        match self {
            Self::Lower | Self::Snake => field.to_string(),
            Self::Upper | Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Pascal => field.split('_').map(capitalize).collect(),
            Self::Camel => {
                let pascal = Self::Pascal.apply_to_field(field);
                lower_first(&pascal)
            }
            Self::Kebab => field.replace('_', "-"),
            Self::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
        }
    }

    /// Apply to a PascalCase variant name
    pub fn apply_to_variant(self, variant: &str) -> String {
        match self {
            Self::Pascal => variant.to_string(),
            Self::Lower => variant.to_ascii_lowercase(),
            Self::Upper => variant.to_ascii_uppercase(),
            Self::Camel => lower_first(variant),
            Self::Snake => {
                let mut snake = String::new();
                for (i, ch) in variant.char_indices() {
                    if i > 0 && ch.is_uppercase() {
                        snake.push('_');
                    }
                    snake.push(ch.to_ascii_lowercase());
                }
                snake
            }
            Self::ScreamingSnake => Self::Snake.apply_to_variant(variant).to_ascii_uppercase(),
            Self::Kebab => Self::Snake.apply_to_variant(variant).replace('_', "-"),
            Self::ScreamingKebab => Self::ScreamingSnake
                .apply_to_variant(variant)
                .replace('_', "-"),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_rules() {
        assert_eq!(RenameRule::Camel.apply_to_field("created_at"), "createdAt");
        assert_eq!(RenameRule::Pascal.apply_to_field("created_at"), "CreatedAt");
        assert_eq!(RenameRule::Kebab.apply_to_field("created_at"), "created-at");
        assert_eq!(RenameRule::ScreamingSnake.apply_to_field("created_at"), "CREATED_AT");
        assert_eq!(RenameRule::ScreamingKebab.apply_to_field("created_at"), "CREATED-AT");
        assert_eq!(RenameRule::Snake.apply_to_field("id"), "id");
    }

    #[test]
    fn test_lowercase_fields_match_serde() {
        // serde leaves field names untouched for `lowercase`, so the wire keeps them
        assert_eq!(RenameRule::Lower.apply_to_field("created_at"), "created_at");
        assert_eq!(RenameRule::Lower.apply_to_field("userID"), "userID");
        assert_eq!(RenameRule::Lower.apply_to_variant("InReview"), "inreview");
    }

    #[test]
    fn test_variant_rules() {
        assert_eq!(RenameRule::Snake.apply_to_variant("InReview"), "in_review");
        assert_eq!(RenameRule::Camel.apply_to_variant("InReview"), "inReview");
        assert_eq!(RenameRule::Lower.apply_to_variant("InReview"), "inreview");
        assert_eq!(RenameRule::Upper.apply_to_variant("InReview"), "INREVIEW");
        assert_eq!(RenameRule::Kebab.apply_to_variant("InReview"), "in-review");
        assert_eq!(RenameRule::ScreamingSnake.apply_to_variant("InReview"), "IN_REVIEW");
    }

    #[test]
    fn test_unknown_rule() {
        assert_eq!(RenameRule::from_name("Train-Case"), None);
        assert_eq!(RenameRule::from_name("camelCase"), Some(RenameRule::Camel));
    }
}
