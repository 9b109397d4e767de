pub mod config;
pub mod contact;
pub mod components {
    pub mod contact_form;
    pub mod notice;
}
