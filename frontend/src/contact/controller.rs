use log::{debug, error, info, warn};

use crate::config::ContactConfig;

use super::analytics::{Analytics, FormEvent};
use super::clock::{Millis, Scheduler};
use super::draft::{Draft, DraftStore};
use super::error::{SubmissionError, REJECTED_FAILURE};
use super::input::format_phone;
use super::model::{FieldValue, FormModel};
use super::submit::{ContactRequest, SubmissionOutcome};
use super::validate::{validate_field, validate_form};
use super::verify::BotVerifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Submitting,
}

/// What a submit or a finished submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Validation failed; back to idle without a request.
    Invalid,
    /// Validation passed; a request is on its way.
    Submitting,
    Success,
    Failed,
    /// Submit while a request is pending, or a result nobody waited for.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Field(String),
    SuccessPanel,
    ErrorNotice,
}

/// Side effects the view has to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScrollTo(Target),
    Focus(String),
    Submit(ContactRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub transition: Transition,
    pub effects: Vec<Effect>,
}

impl Step {
    fn new(transition: Transition, effects: Vec<Effect>) -> Self {
        Self { transition, effects }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Task {
    SaveDraft,
    ValidateField(String),
    HideSuccess,
    RemoveErrorNotice(NoticeId),
    RemoveRestoredNotice(NoticeId),
}

pub const RESTORED_MESSAGE: &str = "Daha önce yazdığınız bilgiler geri yüklendi.";

/// Contact form pipeline: validation gate, submission state, notices and the
/// draft autosave, all driven by explicit events and a caller-supplied clock.
pub struct SubmissionController {
    config: ContactConfig,
    model: FormModel,
    state: State,
    scheduler: Scheduler<Task>,
    success_visible: bool,
    error_notice: Option<Notice>,
    restored_notice: Option<Notice>,
    next_notice: u64,
    draft_loaded: bool,
    drafts: Box<dyn DraftStore>,
    verifier: Option<Box<dyn BotVerifier>>,
    analytics: Vec<Box<dyn Analytics>>,
}

impl SubmissionController {
    pub fn new(config: ContactConfig, drafts: Box<dyn DraftStore>) -> Self {
        Self {
            config,
            model: FormModel::contact_form(),
            state: State::Idle,
            scheduler: Scheduler::new(),
            success_visible: false,
            error_notice: None,
            restored_notice: None,
            next_notice: 0,
            draft_loaded: false,
            drafts,
            verifier: None,
            analytics: Vec::new(),
        }
    }

    pub fn with_verifier(mut self, verifier: Option<Box<dyn BotVerifier>>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn with_analytics(mut self, analytics: Box<dyn Analytics>) -> Self {
        self.analytics.push(analytics);
        self
    }

    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    pub fn model(&self) -> &FormModel {
        &self.model
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == State::Submitting
    }

    pub fn success_visible(&self) -> bool {
        self.success_visible
    }

    pub fn form_visible(&self) -> bool {
        !self.success_visible
    }

    pub fn error_notice(&self) -> Option<&Notice> {
        self.error_notice.as_ref()
    }

    pub fn restored_notice(&self) -> Option<&Notice> {
        self.restored_notice.as_ref()
    }

    pub fn field_error(&self, name: &str) -> Option<&str> {
        self.model.error(name)
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.scheduler.next_due()
    }

    fn notice(&mut self, message: String) -> Notice {
        let id = NoticeId(self.next_notice);
        self.next_notice += 1;
        Notice { id, message }
    }

    /// Applies a saved draft. Only the first call does anything, so a draft
    /// can never overwrite what the user typed afterwards.
    pub fn init(&mut self, now: Millis) {
        if self.draft_loaded {
            return;
        }
        self.draft_loaded = true;

        let draft = match self.drafts.load() {
            Ok(Some(draft)) => draft,
            Ok(None) => return,
            Err(e) => {
                warn!("Could not load saved form data: {}", e);
                return;
            }
        };

        let restored = draft.apply(&mut self.model);
        info!("Restored {} field(s) from the saved draft", restored);
        let notice = self.notice(RESTORED_MESSAGE.to_string());
        self.scheduler
            .schedule(now, self.config.restored_display, Task::RemoveRestoredNotice(notice.id));
        self.restored_notice = Some(notice);
    }

    /// A value changed. Clears the field's error right away; the email field
    /// is re-validated once typing pauses, and the draft is saved likewise.
    pub fn input(&mut self, now: Millis, name: &str, value: FieldValue) {
        let value = match value {
            FieldValue::Text(text) if name == "phone" => FieldValue::Text(format_phone(&text)),
            other => other,
        };
        if !self.model.set(name, value) {
            debug!("input for unknown field {}", name);
            return;
        }
        self.model.clear_error(name);

        if name == "email" {
            self.scheduler.debounce(
                now,
                self.config.email_debounce,
                Task::ValidateField(name.to_string()),
            );
        }
        self.scheduler.debounce(now, self.config.draft_debounce, Task::SaveDraft);
    }

    /// Focus left a field: validate it immediately.
    pub fn blur(&mut self, name: &str) -> bool {
        validate_field(&mut self.model, name)
    }

    pub fn submit(&mut self, _now: Millis) -> Step {
        if self.state == State::Submitting {
            debug!("submit ignored, a submission is already pending");
            return Step::new(Transition::Ignored, Vec::new());
        }

        debug!("validating contact form");
        if !validate_form(&mut self.model, self.verifier.as_deref()) {
            let effects = match self.model.first_error_field() {
                Some(name) => vec![
                    Effect::ScrollTo(Target::Field(name.to_string())),
                    Effect::Focus(name.to_string()),
                ],
                None => Vec::new(),
            };
            return Step::new(Transition::Invalid, effects);
        }

        self.state = State::Submitting;
        let request = ContactRequest {
            fields: self.model.payload(),
            recaptcha: self.verifier.as_ref().and_then(|v| v.response_token()),
        };
        info!("Contact form valid, submitting");
        Step::new(Transition::Submitting, vec![Effect::Submit(request)])
    }

    /// Result of the request started by the last `submit`.
    pub fn submission_finished(
        &mut self,
        now: Millis,
        result: Result<SubmissionOutcome, SubmissionError>,
    ) -> Step {
        if self.state != State::Submitting {
            warn!("submission result arrived while idle, ignoring");
            return Step::new(Transition::Ignored, Vec::new());
        }
        self.state = State::Idle;

        let result = result.and_then(|outcome| {
            if outcome.success {
                Ok(outcome)
            } else {
                let message = outcome
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| REJECTED_FAILURE.to_string());
                Err(SubmissionError::Rejected(message))
            }
        });

        match result {
            Ok(outcome) => self.succeed(now, outcome),
            Err(e) => self.fail(now, e),
        }
    }

    fn succeed(&mut self, now: Millis, outcome: SubmissionOutcome) -> Step {
        info!(
            "Contact form submitted: {}",
            outcome.message.as_deref().unwrap_or_default()
        );
        let service = self.model.text("serviceType").unwrap_or_default().to_string();

        self.model.reset();
        if let Some(verifier) = &self.verifier {
            verifier.reset();
        }
        // Pending autosaves would write the emptied form back into the slot.
        self.scheduler
            .cancel_where(|task| matches!(task, Task::SaveDraft | Task::ValidateField(_)));

        self.success_visible = true;
        if let Err(e) = self.drafts.clear() {
            warn!("Could not clear saved form data: {}", e);
        }
        self.track(FormEvent::Success { service });
        self.scheduler.schedule(now, self.config.success_display, Task::HideSuccess);

        Step::new(Transition::Success, vec![Effect::ScrollTo(Target::SuccessPanel)])
    }

    fn fail(&mut self, now: Millis, err: SubmissionError) -> Step {
        let message = err.user_message();
        error!("Form submission error: {}", message);

        // A visible notice is reused: same id, new text.
        let notice = match self.error_notice.take() {
            Some(notice) => Notice { message: message.clone(), ..notice },
            None => self.notice(message.clone()),
        };
        let id = notice.id;
        self.error_notice = Some(notice);
        self.scheduler
            .schedule(now, self.config.error_display, Task::RemoveErrorNotice(id));
        self.track(FormEvent::Failure { message });

        Step::new(Transition::Failed, vec![Effect::ScrollTo(Target::ErrorNotice)])
    }

    fn track(&self, event: FormEvent) {
        for analytics in &self.analytics {
            if let Err(e) = analytics.track(&event) {
                warn!("Could not track {}: {}", event.name(), e);
            }
        }
    }

    /// Close button of the error notice. Its removal timer keeps running.
    pub fn dismiss_error(&mut self) {
        self.error_notice = None;
    }

    pub fn dismiss_restored(&mut self) {
        self.restored_notice = None;
    }

    /// Runs every timer due at `now`.
    pub fn tick(&mut self, now: Millis) {
        for task in self.scheduler.take_due(now) {
            match task {
                Task::SaveDraft => {
                    if let Err(e) = self.drafts.save(&Draft::capture(&self.model)) {
                        warn!("Could not save form data: {}", e);
                    }
                }
                Task::ValidateField(name) => {
                    validate_field(&mut self.model, &name);
                }
                Task::HideSuccess => {
                    debug!("hiding success panel");
                    self.success_visible = false;
                }
                Task::RemoveErrorNotice(id) => {
                    if self.error_notice.as_ref().map(|n| n.id) == Some(id) {
                        self.error_notice = None;
                    }
                }
                Task::RemoveRestoredNotice(id) => {
                    if self.restored_notice.as_ref().map(|n| n.id) == Some(id) {
                        self.restored_notice = None;
                    }
                }
            }
        }
    }
}
