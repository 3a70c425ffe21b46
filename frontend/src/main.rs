use yew::prelude::*;
use log::{info, Level};

mod config;
mod utils;
mod components {
    pub mod back_to_top;
    pub mod header;
    pub mod modal;
    pub mod notification;
    pub mod reveal;
    pub mod stat_counter;
    pub mod tooltip;
}
mod forms {
    pub mod contact_form;
    pub mod controller;
    pub mod quick_evaluation;
    pub mod submission;
    pub mod validation;
}
mod pages {
    pub mod faq;
    pub mod home;
}

use components::{
    back_to_top::BackToTop,
    header::SiteHeader,
    modal::{use_overlay_keyboard, OverlayManager, Overlays},
    notification::{AlertBanner, NotificationCenter, Notifier},
    tooltip::{TooltipLayer, TooltipTable, Tooltips},
};
use pages::home::Home;

#[function_component]
fn App() -> Html {
    let notifications = use_reducer_eq(NotificationCenter::default);
    let overlays = use_reducer_eq(OverlayManager::default);
    let tooltips = use_reducer_eq(TooltipTable::default);

    let notifier = {
        let dispatcher = notifications.dispatcher();
        Notifier::new(
            notifications.current.clone(),
            Callback::from(move |action| dispatcher.dispatch(action)),
        )
    };
    let overlay_ctx = {
        let dispatcher = overlays.dispatcher();
        Overlays::new(
            (*overlays).clone(),
            Callback::from(move |action| dispatcher.dispatch(action)),
        )
    };
    let tooltip_ctx = {
        let dispatcher = tooltips.dispatcher();
        Tooltips::new(
            (*tooltips).clone(),
            Callback::from(move |action| dispatcher.dispatch(action)),
        )
    };

    use_overlay_keyboard(&overlay_ctx);

    html! {
        <ContextProvider<Notifier> context={notifier}>
            <ContextProvider<Overlays> context={overlay_ctx}>
                <ContextProvider<Tooltips> context={tooltip_ctx}>
                    <SiteHeader />
                    <main>
                        <AlertBanner />
                        <Home />
                    </main>
                    <footer class="site-footer">
                        <p>{"© Work in Germany"}</p>
                    </footer>
                    <BackToTop />
                    <TooltipLayer />
                </ContextProvider<Tooltips>>
            </ContextProvider<Overlays>>
        </ContextProvider<Notifier>>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    utils::register_service_worker();
    yew::Renderer::<App>::new().render();
    info!("Work in Germany - app initialized");
}
