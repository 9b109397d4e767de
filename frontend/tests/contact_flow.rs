use std::cell::{Cell, RefCell};
use std::rc::Rc;

use contact_form::config::ContactConfig;
use contact_form::contact::analytics::{Analytics, FormEvent};
use contact_form::contact::draft::MemoryDraftStore;
use contact_form::contact::error::{AnalyticsError, SubmissionError};
use contact_form::contact::model::RECAPTCHA_FIELD;
use contact_form::contact::submit::{ContactRequest, SubmissionOutcome};
use contact_form::contact::verify::BotVerifier;
use contact_form::contact::{Effect, FieldValue, State, SubmissionController, Target, Transition};

#[derive(Clone, Default)]
struct RecordingAnalytics {
    events: Rc<RefCell<Vec<FormEvent>>>,
}

impl Analytics for RecordingAnalytics {
    fn track(&self, event: &FormEvent) -> Result<(), AnalyticsError> {
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}

struct BrokenAnalytics;

impl Analytics for BrokenAnalytics {
    fn track(&self, _event: &FormEvent) -> Result<(), AnalyticsError> {
        Err(AnalyticsError::Missing("gtag"))
    }
}

#[derive(Clone, Default)]
struct FakeVerifier {
    token: Rc<RefCell<Option<String>>>,
    resets: Rc<Cell<u32>>,
}

impl BotVerifier for FakeVerifier {
    fn response_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn reset(&self) {
        self.resets.set(self.resets.get() + 1);
    }
}

struct Harness {
    controller: SubmissionController,
    store: MemoryDraftStore,
    analytics: RecordingAnalytics,
}

fn harness() -> Harness {
    let store = MemoryDraftStore::new();
    let analytics = RecordingAnalytics::default();
    let controller = SubmissionController::new(ContactConfig::default(), Box::new(store.clone()))
        .with_analytics(Box::new(analytics.clone()));
    Harness { controller, store, analytics }
}

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

fn fill(controller: &mut SubmissionController, now: u64) {
    controller.input(now, "firstName", text("Ayşe"));
    controller.input(now, "lastName", text("Yılmaz"));
    controller.input(now, "email", text("user@example.com"));
    controller.input(now, "company", text("AICO"));
    controller.input(now, "serviceType", text("pcb-design"));
    controller.input(now, "message", text("Yeni bir kontrol kartı için teklif almak istiyoruz."));
    controller.input(now, "privacy", FieldValue::Checked(true));
}

fn submitted_request(step: &contact_form::contact::Step) -> &ContactRequest {
    match step.effects.as_slice() {
        [Effect::Submit(request)] => request,
        other => panic!("expected a single submit effect, got {:?}", other),
    }
}

fn ok(message: &str) -> Result<SubmissionOutcome, SubmissionError> {
    Ok(SubmissionOutcome { success: true, message: Some(message.to_string()) })
}

#[test]
fn successful_submission_shows_panel_then_restores_form() {
    let mut h = harness();
    fill(&mut h.controller, 0);
    h.controller.tick(1_000);
    assert!(h.store.raw().is_some());

    let step = h.controller.submit(1_500);
    assert_eq!(step.transition, Transition::Submitting);
    assert!(h.controller.is_loading());
    let request = submitted_request(&step);
    assert_eq!(request.field("email"), Some("user@example.com"));
    assert_eq!(request.field("privacy"), Some("on"));
    assert_eq!(request.recaptcha, None);

    let step = h.controller.submission_finished(3_500, ok("Form başarıyla gönderildi."));
    assert_eq!(step.transition, Transition::Success);
    assert_eq!(step.effects, [Effect::ScrollTo(Target::SuccessPanel)]);
    assert!(!h.controller.is_loading());
    assert!(h.controller.success_visible());
    assert!(!h.controller.form_visible());
    assert!(h.store.raw().is_none());
    assert_eq!(h.controller.model().text("firstName"), Some(""));
    assert_eq!(
        *h.analytics.events.borrow(),
        [FormEvent::Success { service: "pcb-design".into() }]
    );

    h.controller.tick(13_499);
    assert!(h.controller.success_visible());
    h.controller.tick(13_500);
    assert!(!h.controller.success_visible());
    assert!(h.controller.form_visible());
    assert_eq!(h.controller.state(), State::Idle);
}

#[test]
fn pending_autosave_does_not_outlive_a_success() {
    let mut h = harness();
    fill(&mut h.controller, 0);
    let step = h.controller.submit(200);
    assert_eq!(step.transition, Transition::Submitting);
    h.controller.submission_finished(400, ok("ok"));

    h.controller.tick(60_000);
    assert!(h.store.raw().is_none());
}

#[test]
fn submit_is_ignored_while_a_request_is_pending() {
    let mut h = harness();
    fill(&mut h.controller, 0);
    assert_eq!(h.controller.submit(10).transition, Transition::Submitting);

    let again = h.controller.submit(20);
    assert_eq!(again.transition, Transition::Ignored);
    assert!(again.effects.is_empty());
    assert_eq!(h.controller.state(), State::Submitting);
}

#[test]
fn failed_submission_keeps_values_and_expires_notice() {
    let mut h = harness();
    fill(&mut h.controller, 0);
    h.controller.submit(100);

    let failure = SubmissionError::Network("Sunucu hatası. Lütfen tekrar deneyin.".into());
    let step = h.controller.submission_finished(2_000, Err(failure));
    assert_eq!(step.transition, Transition::Failed);
    assert_eq!(step.effects, [Effect::ScrollTo(Target::ErrorNotice)]);
    assert!(!h.controller.is_loading());
    assert_eq!(
        h.controller.error_notice().map(|n| n.message.as_str()),
        Some("Sunucu hatası. Lütfen tekrar deneyin.")
    );
    assert_eq!(h.controller.model().text("firstName"), Some("Ayşe"));
    assert!(h.controller.model().is_checked("privacy"));
    assert!(h.controller.form_visible());
    assert_eq!(
        *h.analytics.events.borrow(),
        [FormEvent::Failure { message: "Sunucu hatası. Lütfen tekrar deneyin.".into() }]
    );

    h.controller.tick(9_999);
    assert!(h.controller.error_notice().is_some());
    h.controller.tick(10_000);
    assert!(h.controller.error_notice().is_none());

    // Retry right away.
    assert_eq!(h.controller.submit(10_001).transition, Transition::Submitting);
}

#[test]
fn false_success_flag_is_a_failure() {
    let mut h = harness();
    fill(&mut h.controller, 0);

    h.controller.submit(0);
    let rejected = Ok(SubmissionOutcome { success: false, message: None });
    assert_eq!(h.controller.submission_finished(10, rejected).transition, Transition::Failed);
    assert_eq!(
        h.controller.error_notice().map(|n| n.message.as_str()),
        Some("Form gönderilemedi.")
    );

    h.controller.submit(20);
    let rejected = Ok(SubmissionOutcome { success: false, message: Some("Kota doldu.".into()) });
    h.controller.submission_finished(30, rejected);
    assert_eq!(h.controller.error_notice().map(|n| n.message.as_str()), Some("Kota doldu."));
}

#[test]
fn visible_error_notice_is_reused_and_old_timer_still_removes_it() {
    let mut h = harness();
    fill(&mut h.controller, 0);

    h.controller.submit(0);
    h.controller.submission_finished(0, Err(SubmissionError::Status(500)));
    let first = h.controller.error_notice().cloned().unwrap();
    assert_eq!(first.message, "HTTP error! status: 500");

    h.controller.submit(3_000);
    h.controller.submission_finished(3_000, Err(SubmissionError::Status(503)));
    let second = h.controller.error_notice().cloned().unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.message, "HTTP error! status: 503");

    h.controller.tick(8_000);
    assert!(h.controller.error_notice().is_none());
}

#[test]
fn dismissed_notice_timer_does_not_remove_a_new_one() {
    let mut h = harness();
    fill(&mut h.controller, 0);

    h.controller.submit(0);
    h.controller.submission_finished(0, Err(SubmissionError::Status(500)));
    h.controller.dismiss_error();
    assert!(h.controller.error_notice().is_none());

    h.controller.submit(1_000);
    h.controller.submission_finished(1_000, Err(SubmissionError::Status(502)));
    h.controller.tick(8_000);
    assert!(h.controller.error_notice().is_some());
    h.controller.tick(9_000);
    assert!(h.controller.error_notice().is_none());
}

#[test]
fn broken_analytics_never_blocks_the_flow() {
    let store = MemoryDraftStore::new();
    let mut controller = SubmissionController::new(ContactConfig::default(), Box::new(store))
        .with_analytics(Box::new(BrokenAnalytics));
    fill(&mut controller, 0);
    controller.submit(0);
    let step = controller.submission_finished(10, ok("ok"));
    assert_eq!(step.transition, Transition::Success);
    assert!(controller.success_visible());
}

#[test]
fn invalid_form_focuses_first_error_and_shows_every_message() {
    let mut h = harness();
    h.controller.input(0, "email", text("not-an-email"));

    let step = h.controller.submit(10);
    assert_eq!(step.transition, Transition::Invalid);
    assert_eq!(
        step.effects,
        [
            Effect::ScrollTo(Target::Field("firstName".into())),
            Effect::Focus("firstName".into()),
        ]
    );
    assert_eq!(h.controller.state(), State::Idle);
    assert_eq!(h.controller.field_error("firstName"), Some("Ad zorunludur."));
    assert_eq!(h.controller.field_error("lastName"), Some("Soyad zorunludur."));
    assert_eq!(h.controller.field_error("email"), Some("Geçerli bir e-posta adresi giriniz."));
    assert_eq!(h.controller.field_error("serviceType"), Some("Hizmet Türü zorunludur."));
    assert_eq!(h.controller.field_error("message"), Some("Proje Detayları zorunludur."));
    assert_eq!(
        h.controller.field_error("privacy"),
        Some("Gizlilik politikasını kabul etmelisiniz.")
    );
    assert!(h.analytics.events.borrow().is_empty());
}

#[test]
fn bot_check_gates_submission_and_is_reset_on_success() {
    let store = MemoryDraftStore::new();
    let verifier = FakeVerifier::default();
    let mut controller = SubmissionController::new(ContactConfig::default(), Box::new(store))
        .with_verifier(Some(Box::new(verifier.clone())));
    fill(&mut controller, 0);

    let step = controller.submit(10);
    assert_eq!(step.transition, Transition::Invalid);
    assert!(step.effects.is_empty());
    assert_eq!(
        controller.field_error(RECAPTCHA_FIELD),
        Some("Lütfen robot olmadığınızı doğrulayın.")
    );

    *verifier.token.borrow_mut() = Some("challenge-token".into());
    let step = controller.submit(20);
    assert_eq!(controller.field_error(RECAPTCHA_FIELD), None);
    assert_eq!(submitted_request(&step).recaptcha.as_deref(), Some("challenge-token"));

    controller.submission_finished(30, ok("ok"));
    assert_eq!(verifier.resets.get(), 1);
}

#[test]
fn draft_round_trip_restores_text_fields_once() {
    let mut h = harness();
    h.controller.init(0);
    assert!(h.controller.restored_notice().is_none());

    h.controller.input(100, "firstName", text("Ayşe"));
    h.controller.input(400, "email", text("user@example.com"));
    h.controller.input(700, "privacy", FieldValue::Checked(true));
    h.controller.input(800, "newsletter", FieldValue::Checked(true));
    h.controller.tick(1_799);
    assert!(h.store.raw().is_none());
    h.controller.tick(1_800);

    let saved: serde_json::Value = serde_json::from_str(&h.store.raw().unwrap()).unwrap();
    assert_eq!(saved["firstName"], "Ayşe");
    assert_eq!(saved["email"], "user@example.com");
    assert!(saved.get("privacy").is_none());
    assert!(saved.get("newsletter").is_none());

    // Reload.
    let mut reloaded = SubmissionController::new(ContactConfig::default(), Box::new(h.store.clone()));
    reloaded.init(5_000);
    assert_eq!(reloaded.model().text("firstName"), Some("Ayşe"));
    assert_eq!(reloaded.model().text("email"), Some("user@example.com"));
    assert!(!reloaded.model().is_checked("privacy"));
    assert_eq!(
        reloaded.restored_notice().map(|n| n.message.as_str()),
        Some("Daha önce yazdığınız bilgiler geri yüklendi.")
    );

    reloaded.tick(9_999);
    assert!(reloaded.restored_notice().is_some());
    reloaded.tick(10_000);
    assert!(reloaded.restored_notice().is_none());

    reloaded.init(11_000);
    assert!(reloaded.restored_notice().is_none());
}

#[test]
fn restored_notice_can_be_dismissed_early() {
    let store = MemoryDraftStore::new();
    store.set_raw(r#"{"company":"AICO"}"#);
    let mut controller = SubmissionController::new(ContactConfig::default(), Box::new(store));
    controller.init(0);
    controller.dismiss_restored();
    assert!(controller.restored_notice().is_none());
    controller.tick(5_000);
    assert!(controller.restored_notice().is_none());
    assert_eq!(controller.model().text("company"), Some("AICO"));
}
