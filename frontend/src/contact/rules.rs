use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Checkbox,
}

/// Declarative constraints of one contact form field.
#[derive(Debug)]
pub struct FieldRule {
    pub name: &'static str,
    /// Visible label, used for the "zorunludur" message.
    pub label: &'static str,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub kind: FieldKind,
    /// Shown on pattern failures and on an unchecked required checkbox.
    pub message: &'static str,
}

impl FieldRule {
    fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            required: false,
            min_length: None,
            max_length: None,
            pattern: None,
            kind: FieldKind::Text,
            message: "",
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn min(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    fn max(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    fn pattern(mut self, pattern: &Regex) -> Self {
        self.pattern = Some(pattern.clone());
        self
    }

    fn checkbox(mut self) -> Self {
        self.kind = FieldKind::Checkbox;
        self
    }

    fn message(mut self, message: &'static str) -> Self {
        self.message = message;
        self
    }
}

const NAME_PATTERN: &str = r"^[a-zA-ZğüşıöçĞÜŞİÖÇ\s]+$";
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^[\+]?[0-9\s\-\(\)]{10,}$";

static RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    // Literal patterns; a bad one fails the first lookup in every test run.
    let compile = |pattern: &str| Regex::new(pattern).expect("invalid field pattern");
    let name = compile(NAME_PATTERN);
    let email = compile(EMAIL_PATTERN);
    let phone = compile(PHONE_PATTERN);

    vec![
        FieldRule::text("firstName", "Ad")
            .required()
            .min(2)
            .pattern(&name)
            .message("Ad en az 2 karakter olmalı ve sadece harf içermelidir."),
        FieldRule::text("lastName", "Soyad")
            .required()
            .min(2)
            .pattern(&name)
            .message("Soyad en az 2 karakter olmalı ve sadece harf içermelidir."),
        FieldRule::text("email", "E-posta")
            .required()
            .pattern(&email)
            .message("Geçerli bir e-posta adresi giriniz."),
        FieldRule::text("phone", "Telefon")
            .pattern(&phone)
            .message("Geçerli bir telefon numarası giriniz."),
        FieldRule::text("company", "Şirket")
            .max(100)
            .message("Şirket adı 100 karakterden uzun olamaz."),
        FieldRule::text("serviceType", "Hizmet Türü")
            .required()
            .message("Lütfen bir hizmet türü seçiniz."),
        FieldRule::text("budget", "Bütçe"),
        FieldRule::text("timeline", "Zaman Planı"),
        FieldRule::text("message", "Proje Detayları")
            .required()
            .min(20)
            .max(1000)
            .message("Proje detayları en az 20, en fazla 1000 karakter olmalıdır."),
        FieldRule::text("privacy", "Gizlilik Politikası")
            .required()
            .checkbox()
            .message("Gizlilik politikasını kabul etmelisiniz."),
    ]
});

/// All rules, in form order.
pub fn rules() -> &'static [FieldRule] {
    &RULES
}

/// A field without a rule is exempt from validation.
pub fn rule(name: &str) -> Option<&'static FieldRule> {
    RULES.iter().find(|rule| rule.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_the_contact_fields_in_order() {
        let names: Vec<_> = rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "firstName", "lastName", "email", "phone", "company",
                "serviceType", "budget", "timeline", "message", "privacy",
            ]
        );
    }

    #[test]
    fn unknown_field_has_no_rule() {
        assert!(rule("newsletter").is_none());
        assert!(rule("recaptcha").is_none());
    }

    #[test]
    fn only_privacy_is_a_checkbox() {
        let checkboxes: Vec<_> = rules()
            .iter()
            .filter(|r| r.kind == FieldKind::Checkbox)
            .map(|r| r.name)
            .collect();
        assert_eq!(checkboxes, ["privacy"]);
    }

    #[test]
    fn patterned_fields_compile_their_patterns() {
        let patterned: Vec<_> = rules()
            .iter()
            .filter(|r| r.pattern.is_some())
            .map(|r| r.name)
            .collect();
        assert_eq!(patterned, ["firstName", "lastName", "email", "phone"]);
    }

    #[test]
    fn name_pattern_accepts_turkish_letters() {
        let pattern = rule("firstName").and_then(|r| r.pattern.as_ref()).unwrap();
        assert!(pattern.is_match("Çağrı Şimşek"));
        assert!(!pattern.is_match("R2D2"));
    }
}
