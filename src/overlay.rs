use dioxus::prelude::*;

use crate::config::load_config;
use crate::modal::{EscapeSubscription, ModalLayer, ModalManager};
use crate::progress::ScrollProgressBar;
use crate::scroll_top::{ScrollTopButton, ScrollTopControl};
use crate::theme::ThemeToggle;

#[component]
pub fn App() -> Element {
    let config = use_hook(load_config);
    let modals = use_signal(ModalManager::<EscapeSubscription>::new);
    let scroll_top = use_signal(|| ScrollTopControl::new(config.scroll_top));
    let progress = use_signal(|| 0.0f64);

    #[cfg(target_arch = "wasm32")]
    let mut bindings = use_signal(|| None::<crate::page::PageBindings>);
    #[cfg(not(target_arch = "wasm32"))]
    let _bindings = ();

    #[cfg(target_arch = "wasm32")]
    use_effect({
        let config = config.clone();
        move || {
            if bindings.read().is_some() {
                return;
            }
            let state = crate::page::OverlayState {
                modals,
                scroll_top,
                progress,
            };
            match crate::page::bind_page(&config, state) {
                Ok(page) => bindings.set(Some(page)),
                Err(err) => tracing::warn!("page: interactivity disabled: {err}"),
            }
        }
    });

    rsx! {
        if config.features.scroll_progress {
            ScrollProgressBar { percent: progress }
        }
        if config.features.theme_toggle {
            ThemeToggle {}
        }
        ScrollTopButton { control: scroll_top }
        ModalLayer { modals }
    }
}
