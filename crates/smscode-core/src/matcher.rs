//! Verification code detection.
//!
//! A message counts as a verification code when any rule in an ordered list
//! matches its full text. Rules run from most to least specific; the last
//! one is a bare marker-word fallback that also fires on messages that only
//! mention the word.

use std::sync::LazyLock;

use regex::Regex;

/// One detection rule.
#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pattern: Regex,
}

/// Built-in rules, most specific first. The code token is ASCII
/// alphanumerics (or underscore) followed by a period, ASCII whitespace or
/// end of text where the rule requires it.
const RULES: &[(&str, &str)] = &[
    ("labeled_code", r"Код ([0-9A-Za-z_]+)(?:\.|(?-u:\s)|$)"),
    ("labeled_code_latin", r"Kod: ([0-9A-Za-z_]+)(?:\.|(?-u:\s)|$)"),
    ("colon_code", r"(?i)код: ([0-9A-Za-z_]+)(?:\.|(?-u:\s)|$)"),
    ("apple_pay_activation", r"Код активации Apple Pay ([0-9A-Za-z_]+)"),
    ("confirmation_code", r"Код подтверждения: ([0-9A-Za-z_]+)"),
    ("marker_word", r"Код"),
];

static DEFAULT_MATCHER: LazyLock<CodeMatcher> =
    LazyLock::new(|| CodeMatcher::new().expect("built-in code rules are valid regexes"));

/// Ordered set of compiled detection rules.
#[derive(Debug)]
pub struct CodeMatcher {
    rules: Vec<Rule>,
}

impl CodeMatcher {
    /// Compile the built-in rule set.
    pub fn new() -> Result<Self, regex::Error> {
        let rules = RULES
            .iter()
            .map(|&(name, pattern)| {
                Ok(Rule {
                    name,
                    pattern: Regex::new(pattern)?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }

    /// Shared instance of the built-in rule set.
    pub fn shared() -> &'static CodeMatcher {
        &DEFAULT_MATCHER
    }

    /// Name of the first rule matching `text`, if any.
    pub fn matching_rule(&self, text: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(text))
            .map(|rule| rule.name)
    }

    pub fn is_verification_code(&self, text: &str) -> bool {
        self.matching_rule(text).is_some()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Classify `text` with the built-in rules.
pub fn is_verification_code(text: &str) -> bool {
    CodeMatcher::shared().is_verification_code(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_for(text: &str) -> Option<&'static str> {
        CodeMatcher::shared().matching_rule(text)
    }

    #[test]
    fn test_rules_compile_in_order() {
        let matcher = CodeMatcher::new().unwrap();
        let names: Vec<_> = matcher.rules().iter().map(|r| r.name).collect();
        assert_eq!(names.first(), Some(&"labeled_code"));
        assert_eq!(names.last(), Some(&"marker_word"));
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_labeled_code() {
        assert_eq!(rule_for("Код 4821. Никому не сообщайте"), Some("labeled_code"));
        assert_eq!(rule_for("Код 4821 для входа"), Some("labeled_code"));
        assert_eq!(rule_for("Код 4821"), Some("labeled_code"));
    }

    #[test]
    fn test_labeled_code_latin() {
        assert_eq!(rule_for("Kod: 5521"), Some("labeled_code_latin"));
        assert_eq!(rule_for("Your Kod: A7B9. Do not share"), Some("labeled_code_latin"));
    }

    #[test]
    fn test_colon_code_any_case() {
        assert_eq!(rule_for("Ваш код: 3344"), Some("colon_code"));
        assert_eq!(rule_for("КОД: 3344."), Some("colon_code"));
    }

    #[test]
    fn test_terminator_is_ascii_whitespace_only() {
        assert_eq!(rule_for("Kod: 1234\tBank"), Some("labeled_code_latin"));
        assert_eq!(rule_for("Kod: 1234\nBank"), Some("labeled_code_latin"));
        assert_eq!(rule_for("Kod: 1234\u{a0}Bank"), None);
        assert_eq!(rule_for("Kod: 1234\u{2003}"), None);
    }

    #[test]
    fn test_apple_pay_activation() {
        assert_eq!(
            rule_for("Код активации Apple Pay 123456"),
            Some("apple_pay_activation")
        );
    }

    #[test]
    fn test_confirmation_code() {
        assert_eq!(
            rule_for("Код подтверждения: AB12CD"),
            Some("confirmation_code")
        );
    }

    #[test]
    fn test_marker_word_fallback() {
        // Over-broad on purpose: a mention of the word is enough.
        assert_eq!(rule_for("Код не пришёл?"), Some("marker_word"));
        assert!(is_verification_code("Код"));
    }

    #[test]
    fn test_ordinary_messages_do_not_match() {
        assert!(!is_verification_code("Привет! Как дела?"));
        assert!(!is_verification_code("Your package has been delivered"));
        assert!(!is_verification_code("See you at 5pm"));
        assert!(!is_verification_code("Kod 1234"));
        assert!(!is_verification_code(""));
    }

    #[test]
    fn test_shared_and_fresh_matchers_agree() {
        let fresh = CodeMatcher::new().unwrap();
        for text in ["Kod: 1", "Привет", "Код подтверждения: 9"] {
            assert_eq!(fresh.is_verification_code(text), is_verification_code(text));
        }
    }
}
