use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Restored,
}

#[derive(Properties, PartialEq)]
pub struct NoticeProps {
    pub kind: NoticeKind,
    pub message: String,
    pub on_close: Callback<()>,
}

/// Dismissible banner placed above the form fields. Removal timing is owned
/// by the form controller, the close button only hides it early.
#[function_component(Notice)]
pub fn notice(props: &NoticeProps) -> Html {
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_close.emit(());
        })
    };

    match props.kind {
        NoticeKind::Error => html! {
            <div class="form-error-notification" role="alert">
                <style>{ ERROR_STYLE }</style>
                <div class="error-icon">
                    <svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                        <circle cx="12" cy="12" r="10"/>
                        <line x1="15" y1="9" x2="9" y2="15"/>
                        <line x1="9" y1="9" x2="15" y2="15"/>
                    </svg>
                </div>
                <div class="error-content">
                    <h4>{"Form Gönderilemedi"}</h4>
                    <p>{ &props.message }</p>
                </div>
                <button class="error-close" onclick={close}>{"✕"}</button>
            </div>
        },
        NoticeKind::Restored => html! {
            <div class="form-restored-notification" role="status">
                <style>{ RESTORED_STYLE }</style>
                <span>{ &props.message }</span>
                <button onclick={close}>{"✕"}</button>
            </div>
        },
    }
}

const ERROR_STYLE: &str = r#"
    .form-error-notification {
        display: flex;
        align-items: center;
        gap: 1rem;
        padding: 1.5rem;
        background: #d64545;
        color: #fff;
        border-radius: 8px;
        margin-bottom: 1.5rem;
        animation: slideInDown 0.3s ease;
    }
    .error-icon {
        display: flex;
        align-items: center;
        justify-content: center;
        width: 40px;
        height: 40px;
        background: rgba(255, 255, 255, 0.2);
        border-radius: 50%;
        flex-shrink: 0;
    }
    .error-content h4 {
        margin-bottom: 0.5rem;
        font-size: 1rem;
    }
    .error-content p {
        margin: 0;
        opacity: 0.9;
        font-size: 0.9rem;
    }
    .error-close {
        background: transparent;
        border: none;
        color: #fff;
        cursor: pointer;
        margin-left: auto;
    }
    @keyframes slideInDown {
        from { transform: translateY(-20px); opacity: 0; }
        to { transform: translateY(0); opacity: 1; }
    }
"#;

const RESTORED_STYLE: &str = r#"
    .form-restored-notification {
        display: flex;
        align-items: center;
        gap: 0.5rem;
        padding: 1rem;
        background: #e8f5e8;
        color: #2bae66;
        border-radius: 4px;
        margin-bottom: 1.5rem;
        font-size: 0.9rem;
        border: 1px solid rgba(43, 174, 102, 0.2);
    }
    .form-restored-notification button {
        background: transparent;
        border: none;
        color: #2bae66;
        cursor: pointer;
        margin-left: auto;
    }
"#;
