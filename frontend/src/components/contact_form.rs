use gloo_timers::callback::Timeout;
use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};
use yew::prelude::*;

use crate::components::notice::{Notice, NoticeKind};
use crate::config::ContactConfig;
use crate::contact::analytics::{BrowserAnalytics, ConsoleAnalytics};
use crate::contact::clock::Millis;
use crate::contact::draft::LocalStorageDraftStore;
use crate::contact::error::SubmissionError;
use crate::contact::input::CharacterCounter;
use crate::contact::model::{FieldValue, NEWSLETTER_FIELD, RECAPTCHA_FIELD};
use crate::contact::submit::{submit_contact, SubmissionOutcome};
use crate::contact::verify::{BotVerifier, Grecaptcha};
use crate::contact::{Effect, SubmissionController, Target};

const SERVICE_OPTIONS: &[(&str, &str)] = &[
    ("pcb-design", "PCB Tasarımı"),
    ("embedded-software", "Gömülü Yazılım"),
    ("prototyping", "Prototip Üretimi"),
    ("consulting", "Teknik Danışmanlık"),
];

const BUDGET_OPTIONS: &[(&str, &str)] = &[
    ("0-25k", "25.000 ₺ altı"),
    ("25k-100k", "25.000 ₺ - 100.000 ₺"),
    ("100k+", "100.000 ₺ üzeri"),
];

const TIMELINE_OPTIONS: &[(&str, &str)] = &[
    ("urgent", "Acil (1 ay içinde)"),
    ("quarter", "1 - 3 ay"),
    ("flexible", "Esnek"),
];

pub enum ContactFormMsg {
    Input(&'static str, FieldValue),
    Blur(&'static str),
    Submit,
    Finished(Result<SubmissionOutcome, SubmissionError>),
    DismissError,
    DismissRestored,
    Tick,
}

pub struct ContactForm {
    controller: SubmissionController,
    /// Effects waiting for the next render, so their targets exist in the DOM.
    pending: Vec<Effect>,
    timer: Option<Timeout>,
}

fn now() -> Millis {
    chrono::Utc::now().timestamp_millis().max(0) as Millis
}

fn scroll_to(id: &str) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        warn!("scroll target #{} not found", id);
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

fn focus(id: &str) {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());
    if let Some(element) = element {
        if let Err(e) = element.focus() {
            warn!("could not focus #{}: {:?}", id, e);
        }
    }
}

impl ContactForm {
    fn arm_timer(&mut self, ctx: &Context<Self>) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        self.timer = self.controller.next_due().map(|due| {
            let delay = due.saturating_sub(now()).min(u32::MAX as Millis) as u32;
            let link = ctx.link().clone();
            Timeout::new(delay, move || link.send_message(ContactFormMsg::Tick))
        });
    }

    fn perform(&mut self, ctx: &Context<Self>, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Submit(request) => {
                    let endpoint = self.controller.config().endpoint();
                    ctx.link().send_future(async move {
                        ContactFormMsg::Finished(submit_contact(&endpoint, &request).await)
                    });
                }
                other => self.pending.push(other),
            }
        }
    }

    fn text_field(
        &self,
        ctx: &Context<Self>,
        name: &'static str,
        label: &'static str,
        input_type: &'static str,
        required: bool,
    ) -> Html {
        let model = self.controller.model();
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ContactFormMsg::Input(name, FieldValue::Text(input.value()))
        });
        let onblur = ctx.link().callback(move |_: FocusEvent| ContactFormMsg::Blur(name));
        let error = model.error(name);

        html! {
            <div class="form-group">
                <label for={name} class="form-label">
                    { label }
                    if required { <span class="required">{"*"}</span> }
                </label>
                <input
                    id={name}
                    name={name}
                    type={input_type}
                    class={classes!("form-input", error.is_some().then(|| "error"))}
                    value={model.text(name).unwrap_or_default().to_string()}
                    {oninput}
                    {onblur}
                />
                <span id={format!("{}-error", name)} class="form-error">{ error.unwrap_or_default() }</span>
            </div>
        }
    }

    fn select_field(
        &self,
        ctx: &Context<Self>,
        name: &'static str,
        label: &'static str,
        options: &'static [(&'static str, &'static str)],
        required: bool,
    ) -> Html {
        let model = self.controller.model();
        let selected = model.text(name).unwrap_or_default();
        let onchange = ctx.link().callback(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            ContactFormMsg::Input(name, FieldValue::Text(select.value()))
        });
        let onblur = ctx.link().callback(move |_: FocusEvent| ContactFormMsg::Blur(name));
        let error = model.error(name);

        html! {
            <div class="form-group">
                <label for={name} class="form-label">
                    { label }
                    if required { <span class="required">{"*"}</span> }
                </label>
                <select
                    id={name}
                    name={name}
                    class={classes!("form-select", error.is_some().then(|| "error"))}
                    {onchange}
                    {onblur}
                >
                    <option value="" selected={selected.is_empty()}>{"Seçiniz"}</option>
                    { for options.iter().map(|(value, text)| html! {
                        <option value={*value} selected={selected == *value}>{ *text }</option>
                    }) }
                </select>
                <span id={format!("{}-error", name)} class="form-error">{ error.unwrap_or_default() }</span>
            </div>
        }
    }

    fn message_field(&self, ctx: &Context<Self>) -> Html {
        let model = self.controller.model();
        let value = model.text("message").unwrap_or_default().to_string();
        let counter = CharacterCounter::new(&value, self.controller.config().message_limit);
        let oninput = ctx.link().callback(|e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            ContactFormMsg::Input("message", FieldValue::Text(area.value()))
        });
        let onblur = ctx.link().callback(|_: FocusEvent| ContactFormMsg::Blur("message"));
        let error = model.error("message");

        html! {
            <div class="form-group">
                <label for="message" class="form-label">
                    {"Proje Detayları"}<span class="required">{"*"}</span>
                </label>
                <textarea
                    id="message"
                    name="message"
                    rows="6"
                    class={classes!("form-textarea", error.is_some().then(|| "error"))}
                    {value}
                    {oninput}
                    {onblur}
                />
                <div class={counter.class()}>
                    <span class="current">{ counter.current.to_string() }</span>{ format!(" / {}", counter.max) }
                </div>
                <span id="message-error" class="form-error">{ error.unwrap_or_default() }</span>
            </div>
        }
    }

    fn checkbox_field(&self, ctx: &Context<Self>, name: &'static str, label: &'static str) -> Html {
        let model = self.controller.model();
        let onchange = ctx.link().callback(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ContactFormMsg::Input(name, FieldValue::Checked(input.checked()))
        });
        let onblur = ctx.link().callback(move |_: FocusEvent| ContactFormMsg::Blur(name));
        let error = model.error(name);

        html! {
            <div class="form-group form-checkbox">
                <label>
                    <input
                        id={name}
                        name={name}
                        type="checkbox"
                        class={classes!(error.is_some().then(|| "error"))}
                        checked={model.is_checked(name)}
                        {onchange}
                        {onblur}
                    />
                    { label }
                </label>
                <span id={format!("{}-error", name)} class="form-error">{ error.unwrap_or_default() }</span>
            </div>
        }
    }
}

impl Component for ContactForm {
    type Message = ContactFormMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = ContactConfig::default();
        let drafts = Box::new(LocalStorageDraftStore::new(config.storage_key.clone()));
        let verifier = Grecaptcha::detect().map(|v| Box::new(v) as Box<dyn BotVerifier>);
        let mut controller = SubmissionController::new(config, drafts)
            .with_verifier(verifier)
            .with_analytics(Box::new(ConsoleAnalytics))
            .with_analytics(Box::new(BrowserAnalytics));
        controller.init(now());
        info!("Contact form ready");

        let mut form = Self { controller, pending: Vec::new(), timer: None };
        form.arm_timer(ctx);
        form
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactFormMsg::Input(name, value) => self.controller.input(now(), name, value),
            ContactFormMsg::Blur(name) => {
                self.controller.blur(name);
            }
            ContactFormMsg::Submit => {
                let step = self.controller.submit(now());
                self.perform(ctx, step.effects);
            }
            ContactFormMsg::Finished(result) => {
                let step = self.controller.submission_finished(now(), result);
                self.perform(ctx, step.effects);
            }
            ContactFormMsg::DismissError => self.controller.dismiss_error(),
            ContactFormMsg::DismissRestored => self.controller.dismiss_restored(),
            ContactFormMsg::Tick => self.controller.tick(now()),
        }
        self.arm_timer(ctx);
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        for effect in self.pending.drain(..) {
            match effect {
                Effect::ScrollTo(Target::Field(name)) => scroll_to(&name),
                Effect::ScrollTo(Target::SuccessPanel) => scroll_to("form-success"),
                Effect::ScrollTo(Target::ErrorNotice) => scroll_to("form-error-notification"),
                Effect::Focus(name) => focus(&name),
                Effect::Submit(_) => {}
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let controller = &self.controller;
        let loading = controller.is_loading();
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactFormMsg::Submit
        });
        let form_style = if controller.form_visible() { "display: flex;" } else { "display: none;" };
        let success_style = if controller.success_visible() { "display: flex;" } else { "display: none;" };

        html! {
            <section class="contact-section">
                <form id="contact-form" class="contact-form" style={form_style} {onsubmit}>
                    if let Some(notice) = controller.error_notice() {
                        <div id="form-error-notification">
                            <Notice
                                kind={NoticeKind::Error}
                                message={notice.message.clone()}
                                on_close={ctx.link().callback(|_| ContactFormMsg::DismissError)}
                            />
                        </div>
                    }
                    if let Some(notice) = controller.restored_notice() {
                        <Notice
                            kind={NoticeKind::Restored}
                            message={notice.message.clone()}
                            on_close={ctx.link().callback(|_| ContactFormMsg::DismissRestored)}
                        />
                    }
                    <div class="form-row">
                        { self.text_field(ctx, "firstName", "Ad", "text", true) }
                        { self.text_field(ctx, "lastName", "Soyad", "text", true) }
                    </div>
                    <div class="form-row">
                        { self.text_field(ctx, "email", "E-posta", "email", true) }
                        { self.text_field(ctx, "phone", "Telefon", "tel", false) }
                    </div>
                    { self.text_field(ctx, "company", "Şirket", "text", false) }
                    { self.select_field(ctx, "serviceType", "Hizmet Türü", SERVICE_OPTIONS, true) }
                    <div class="form-row">
                        { self.select_field(ctx, "budget", "Bütçe", BUDGET_OPTIONS, false) }
                        { self.select_field(ctx, "timeline", "Zaman Planı", TIMELINE_OPTIONS, false) }
                    </div>
                    { self.message_field(ctx) }
                    { self.checkbox_field(ctx, NEWSLETTER_FIELD, "Bültenimize abone olmak istiyorum.") }
                    { self.checkbox_field(ctx, "privacy", "Gizlilik politikasını okudum ve kabul ediyorum.") }
                    <div class="form-group">
                        <div class="g-recaptcha"></div>
                        <span id="recaptcha-error" class="form-error">
                            { controller.field_error(RECAPTCHA_FIELD).unwrap_or_default() }
                        </span>
                    </div>
                    <button id="submit-btn" type="submit" class="btn btn-primary" disabled={loading}>
                        <span class="btn-text" style={if loading { "opacity: 0;" } else { "opacity: 1;" }}>
                            {"Gönder"}
                        </span>
                        <span class="btn-loader" style={if loading { "display: block;" } else { "display: none;" }}></span>
                    </button>
                </form>
                <div id="form-success" class="form-success" style={success_style}>
                    <h3>{"Teşekkürler!"}</h3>
                    <p>{"Mesajınız bize ulaştı. En kısa sürede sizinle iletişime geçeceğiz."}</p>
                </div>
            </section>
        }
    }
}
