use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};

use contact_form::components::contact_form::ContactForm;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/iletisim")]
    Contact,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home | Route::Contact => {
            info!("Rendering Contact page");
            html! { <ContactPage /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! {
                <div class="not-found">
                    <h1>{"Sayfa bulunamadı"}</h1>
                    <Link<Route> to={Route::Contact}>{"İletişim sayfasına dön"}</Link<Route>>
                </div>
            }
        },
    }
}

#[function_component(ContactPage)]
fn contact_page() -> Html {
    html! {
        <main class="contact-page">
            <header class="contact-header">
                <h1>{"Bizimle İletişime Geçin"}</h1>
                <p>{"Projenizi anlatın, size en kısa sürede dönüş yapalım."}</p>
            </header>
            <ContactForm />
        </main>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
