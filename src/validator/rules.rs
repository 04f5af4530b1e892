use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-()]{10,15}$").expect("valid phone pattern"));

const MIN_AGE: i64 = 18;
const MAX_AGE: i64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Email,
    Phone,
    Age,
    Required,
}

/// Recognized rule names. New rules are added here.
const RULES: &[(&str, Rule)] = &[
    ("email", Rule::Email),
    ("phone", Rule::Phone),
    ("age", Rule::Age),
    ("required", Rule::Required),
];

impl Rule {
    pub fn from_name(name: &str) -> Option<Self> {
        RULES
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, rule)| *rule)
    }

    pub fn name(self) -> &'static str {
        RULES
            .iter()
            .find(|(_, rule)| *rule == self)
            .map_or("unknown", |(name, _)| name)
    }

    pub fn check(self, value: &str) -> bool {
        match self {
            Rule::Email => EMAIL.is_match(value),
            Rule::Phone => PHONE.is_match(value),
            Rule::Age => value
                .parse::<i64>()
                .is_ok_and(|age| (MIN_AGE..=MAX_AGE).contains(&age)),
            Rule::Required => !value.trim().is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(Rule::from_name("email"), Some(Rule::Email));
        assert_eq!(Rule::from_name("phone"), Some(Rule::Phone));
        assert_eq!(Rule::from_name("Email"), None);
        assert_eq!(Rule::from_name("zip"), None);
        assert_eq!(Rule::Age.name(), "age");
    }

    #[test]
    fn email_shapes() {
        assert!(Rule::Email.check("test@example.com"));
        assert!(Rule::Email.check("user.name@domain.co.uk"));
        assert!(!Rule::Email.check("invalid-email"));
        assert!(!Rule::Email.check("@domain.com"));
        assert!(!Rule::Email.check("user@"));
        assert!(!Rule::Email.check("user@domain.c"));
    }

    #[test]
    fn phone_shapes() {
        assert!(Rule::Phone.check("1234567890"));
        assert!(Rule::Phone.check("(123) 456-7890"));
        assert!(!Rule::Phone.check("abc"));
        assert!(!Rule::Phone.check("123"));
        assert!(!Rule::Phone.check("1234567890123456"));
    }

    #[test]
    fn age_bounds() {
        assert!(Rule::Age.check("18"));
        assert!(Rule::Age.check("25"));
        assert!(Rule::Age.check("120"));
        assert!(!Rule::Age.check("17"));
        assert!(!Rule::Age.check("121"));
        assert!(!Rule::Age.check("abc"));
        assert!(!Rule::Age.check("25.5"));
    }

    #[test]
    fn required_rejects_blank() {
        assert!(Rule::Required.check("x"));
        assert!(!Rule::Required.check(""));
        assert!(!Rule::Required.check("   "));
    }
}
