use log::debug;

use super::error::ValidationError;
use super::model::{FieldValue, FormModel, RECAPTCHA_FIELD};
use super::rules::{rule, rules, FieldKind, FieldRule};
use super::verify::BotVerifier;

/// Checks one value against its rule, stopping at the first failure.
pub fn check(rule: &FieldRule, value: &FieldValue) -> Result<(), ValidationError> {
    let text = value.as_text();

    if text.is_empty() {
        return match (rule.required, rule.kind) {
            (false, _) => Ok(()),
            (true, FieldKind::Checkbox) => Err(ValidationError::Unchecked(rule.message)),
            (true, FieldKind::Text) => Err(ValidationError::Required { label: rule.label }),
        };
    }
    if rule.kind == FieldKind::Checkbox {
        return Ok(());
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(text) {
            return Err(ValidationError::Pattern(rule.message));
        }
    }

    let len = text.chars().count();
    if let Some(min) = rule.min_length {
        if len < min {
            return Err(ValidationError::TooShort { min });
        }
    }
    if let Some(max) = rule.max_length {
        if len > max {
            return Err(ValidationError::TooLong { max });
        }
    }
    Ok(())
}

/// Validates the live value of `name` and updates its error slot.
/// Missing fields and fields without a rule are valid and untouched.
pub fn validate_field(model: &mut FormModel, name: &str) -> bool {
    let (Some(rule), Some(value)) = (rule(name), model.value(name)) else {
        return true;
    };

    match check(rule, value) {
        Ok(()) => {
            model.clear_error(name);
            true
        }
        Err(err) => {
            debug!("field {} is invalid: {}", name, err);
            model.set_error(name, err.to_string());
            false
        }
    }
}

/// Sweeps every rule so that all errors show at once, then consults the
/// bot check when one is loaded.
pub fn validate_form(model: &mut FormModel, verifier: Option<&dyn BotVerifier>) -> bool {
    let mut valid = true;
    for rule in rules() {
        valid &= validate_field(model, rule.name);
    }

    if let Some(verifier) = verifier {
        match verifier.response_token() {
            Some(token) if !token.is_empty() => model.clear_error(RECAPTCHA_FIELD),
            _ => {
                model.set_error(RECAPTCHA_FIELD, ValidationError::NotVerified.to_string());
                valid = false;
            }
        }
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct StaticVerifier(Option<&'static str>, Cell<u32>);

    impl BotVerifier for StaticVerifier {
        fn response_token(&self) -> Option<String> {
            self.0.map(str::to_string)
        }

        fn reset(&self) {
            self.1.set(self.1.get() + 1);
        }
    }

    fn filled() -> FormModel {
        let mut model = FormModel::contact_form();
        model.set_text("firstName", "Ayşe");
        model.set_text("lastName", "Yılmaz");
        model.set_text("email", "user@example.com");
        model.set_text("serviceType", "pcb-design");
        model.set_text("message", "Yeni bir kart tasarımı için teklif istiyoruz.");
        model.set_checked("privacy", true);
        model
    }

    fn check_text(name: &str, text: &str) -> Result<(), ValidationError> {
        check(rule(name).unwrap(), &FieldValue::Text(text.to_string()))
    }

    #[test]
    fn required_text_fields_report_their_label() {
        for (name, label) in [
            ("firstName", "Ad"),
            ("lastName", "Soyad"),
            ("email", "E-posta"),
            ("serviceType", "Hizmet Türü"),
            ("message", "Proje Detayları"),
        ] {
            let err = check_text(name, "   ").unwrap_err();
            assert_eq!(err.to_string(), format!("{} zorunludur.", label));
        }
    }

    #[test]
    fn email_shape() {
        assert!(check_text("email", "user@example.com").is_ok());
        for bad in ["user", "user@example", "@example.com", "us er@example.com", "a@b@c.d"] {
            assert_eq!(
                check_text("email", bad),
                Err(ValidationError::Pattern("Geçerli bir e-posta adresi giriniz.")),
                "{bad}"
            );
        }
    }

    #[test]
    fn message_length_bounds() {
        assert_eq!(check_text("message", &"a".repeat(19)), Err(ValidationError::TooShort { min: 20 }));
        assert!(check_text("message", &"a".repeat(20)).is_ok());
        assert!(check_text("message", &"a".repeat(1000)).is_ok());
        assert_eq!(check_text("message", &"a".repeat(1001)), Err(ValidationError::TooLong { max: 1000 }));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(check_text("message", &"ş".repeat(20)).is_ok());
        assert!(check_text("message", &"ğ".repeat(1000)).is_ok());
    }

    #[test]
    fn pattern_is_checked_before_length() {
        assert_eq!(
            check_text("firstName", "A1"),
            Err(ValidationError::Pattern("Ad en az 2 karakter olmalı ve sadece harf içermelidir."))
        );
        assert_eq!(check_text("firstName", "A"), Err(ValidationError::TooShort { min: 2 }));
    }

    #[test]
    fn privacy_must_be_checked() {
        let privacy = rule("privacy").unwrap();
        assert_eq!(
            check(privacy, &FieldValue::Checked(false)),
            Err(ValidationError::Unchecked("Gizlilik politikasını kabul etmelisiniz."))
        );
        assert!(check(privacy, &FieldValue::Checked(true)).is_ok());
    }

    #[test]
    fn empty_optional_fields_skip_all_checks() {
        for name in ["phone", "company", "budget", "timeline"] {
            assert!(check_text(name, "").is_ok(), "{name}");
        }
        assert!(check_text("phone", "12").is_err());
        assert_eq!(check_text("company", &"x".repeat(101)), Err(ValidationError::TooLong { max: 100 }));
    }

    #[test]
    fn validate_field_sets_and_clears_errors() {
        let mut model = FormModel::contact_form();
        assert!(!validate_field(&mut model, "email"));
        assert_eq!(model.error("email"), Some("E-posta zorunludur."));

        model.set_text("email", "user@example.com");
        assert!(validate_field(&mut model, "email"));
        assert_eq!(model.error("email"), None);
    }

    #[test]
    fn unknown_or_missing_fields_are_valid() {
        let mut model = FormModel::default();
        assert!(validate_field(&mut model, "email"));
        assert!(validate_field(&mut model, "newsletter"));
        assert!(!model.has_errors());
    }

    #[test]
    fn form_sweep_surfaces_every_error() {
        let mut model = FormModel::contact_form();
        assert!(!validate_form(&mut model, None));
        for name in ["firstName", "lastName", "email", "serviceType", "message", "privacy"] {
            assert!(model.error(name).is_some(), "{name}");
        }
        for name in ["phone", "company", "budget", "timeline"] {
            assert!(model.error(name).is_none(), "{name}");
        }
    }

    #[test]
    fn form_sweep_passes_with_valid_data() {
        let mut model = filled();
        assert!(validate_form(&mut model, None));
        assert!(!model.has_errors());
    }

    #[test]
    fn missing_bot_token_fails_the_form() {
        let mut model = filled();
        let verifier = StaticVerifier(None, Cell::new(0));
        assert!(!validate_form(&mut model, Some(&verifier)));
        assert_eq!(model.error(RECAPTCHA_FIELD), Some("Lütfen robot olmadığınızı doğrulayın."));

        let verifier = StaticVerifier(Some("token"), Cell::new(0));
        assert!(validate_form(&mut model, Some(&verifier)));
        assert_eq!(model.error(RECAPTCHA_FIELD), None);
    }
}
