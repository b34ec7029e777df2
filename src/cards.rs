pub const CARD_SELECTOR: &str = ".project-card";
pub const CARD_TITLE_SELECTOR: &str = ".project-title";
pub const PRIMARY_LINK_SELECTOR: &str = ".link-primary";

pub const FOCUS_RING: [(&str, &str); 2] = [("outline", "2px solid #667eea"), ("outline-offset", "4px")];
pub const FOCUS_RING_CLEARED: [(&str, &str); 1] = [("outline", "none")];

pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

/// True when a keydown should be swallowed and replayed as a click on the
/// card. Keys pressed on nested links keep their native behavior.
pub fn activates_card(key: &str, target_is_card: bool) -> bool {
    target_is_card && is_activation_key(key)
}

pub fn is_placeholder_href(href: &str) -> bool {
    let href = href.trim();
    href.is_empty() || href == "#" || href.to_ascii_lowercase().starts_with("javascript:")
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CardActivation<'a> {
    pub from_anchor: bool,
    pub primary_href: Option<&'a str>,
    pub title: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardAction {
    PassThrough,
    OpenExternal(String),
    ShowModal(String),
}

pub fn resolve_activation(activation: CardActivation<'_>) -> CardAction {
    if activation.from_anchor {
        return CardAction::PassThrough;
    }
    match activation.primary_href {
        Some(href) if !is_placeholder_href(href) => CardAction::OpenExternal(href.trim().to_string()),
        _ => CardAction::ShowModal(activation.title.unwrap_or_default().trim().to_string()),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn bind_cards(
    document: &web_sys::Document,
    modals: dioxus::prelude::Signal<crate::modal::ModalManager<crate::modal::EscapeSubscription>>,
) -> Vec<gloo_events::EventListener> {
    use gloo_events::{EventListener, EventListenerOptions};
    use wasm_bindgen::JsCast;
    use web_sys::{Element, HtmlElement, KeyboardEvent};

    use crate::modal::open_project_modal;
    use crate::page::{query_all, set_styles};

    let mut listeners = Vec::new();
    for card in query_all(document, CARD_SELECTOR) {
        let Ok(card) = card.dyn_into::<HtmlElement>() else {
            continue;
        };
        let _ = card.set_attribute("tabindex", "0");

        let click_card = card.clone();
        listeners.push(EventListener::new(&card, "click", move |event| {
            let from_anchor = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|target| target.closest("a").ok().flatten())
                .is_some_and(|anchor| click_card.contains(Some(anchor.as_ref())));
            let title = click_card
                .query_selector(CARD_TITLE_SELECTOR)
                .ok()
                .flatten()
                .and_then(|title| title.text_content());
            let href = click_card
                .query_selector(PRIMARY_LINK_SELECTOR)
                .ok()
                .flatten()
                .and_then(|link| link.get_attribute("href"));
            let action = resolve_activation(CardActivation {
                from_anchor,
                primary_href: href.as_deref(),
                title: title.as_deref(),
            });
            tracing::debug!("cards: activation {action:?}");
            match action {
                CardAction::PassThrough => {}
                CardAction::OpenExternal(url) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.open_with_url_and_target(&url, "_blank");
                    }
                }
                CardAction::ShowModal(title) => {
                    open_project_modal(modals, title);
                }
            }
        }));

        let key_card = card.clone();
        listeners.push(EventListener::new_with_options(
            &card,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let card_element: &Element = key_card.as_ref();
                let on_card = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .is_some_and(|target| target == *card_element);
                if !activates_card(&event.key(), on_card) {
                    return;
                }
                event.prevent_default();
                key_card.click();
            },
        ));

        let focus_card = card.clone();
        listeners.push(EventListener::new(&card, "focus", move |_| {
            set_styles(&focus_card, &FOCUS_RING);
        }));
        let blur_card = card.clone();
        listeners.push(EventListener::new(&card, "blur", move |_| {
            set_styles(&blur_card, &FOCUS_RING_CLEARED);
        }));
    }
    tracing::debug!("cards: bound {} listeners", listeners.len());
    listeners
}
