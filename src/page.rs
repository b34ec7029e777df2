use dioxus::prelude::*;
use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::config::InteractivityConfig;
use crate::debounce::{debounce, Debounced};
use crate::highlight::{bind_sections, section_fragment, NAV_LINK_SELECTOR};
use crate::modal::Modals;
use crate::progress::current_progress;
use crate::reveal::bind_reveals;
use crate::scroll_top::{handle_scroll, ScrollTopControl};
use crate::timers::BrowserScheduler;
use crate::typing::start_typing;
use crate::visibility::IntersectionWatcher;

const SKIP_LINK_TEXT: &str = "Skip to main content";
const SKIP_LINK_STYLE: [(&str, &str); 10] = [
    ("position", "absolute"),
    ("top", "-40px"),
    ("left", "6px"),
    ("background", "#333"),
    ("color", "white"),
    ("padding", "8px"),
    ("text-decoration", "none"),
    ("border-radius", "4px"),
    ("z-index", "1000"),
    ("transition", "top 0.3s ease"),
];
const SKIP_LINK_FOCUSED: [(&str, &str); 1] = [("top", "6px")];
const SKIP_LINK_BLURRED: [(&str, &str); 1] = [("top", "-40px")];

#[derive(Clone, Copy)]
pub struct OverlayState {
    pub modals: Modals,
    pub scroll_top: Signal<ScrollTopControl>,
    pub progress: Signal<f64>,
}

pub struct PageBindings {
    _listeners: Vec<EventListener>,
    _watchers: Vec<IntersectionWatcher>,
    _scroll: Debounced<f64, BrowserScheduler>,
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) {
    let style = element.style();
    for (property, value) in styles {
        let _ = style.set_property(property, value);
    }
}

pub fn bind_page(config: &InteractivityConfig, state: OverlayState) -> Result<PageBindings, String> {
    let window = web_sys::window().ok_or("window unavailable")?;
    let document = window.document().ok_or("document unavailable")?;

    let mut listeners = Vec::new();
    let mut watchers = Vec::new();

    listeners.extend(bind_smooth_navigation(&document));

    match bind_reveals(&document, &config.reveal) {
        Ok(Some(watcher)) => watchers.push(watcher),
        Ok(None) => tracing::debug!("reveal: no targets"),
        Err(err) => tracing::warn!("reveal: {err}"),
    }
    match bind_sections(&document, &config.sections, config.tie_break) {
        Ok(Some(watcher)) => watchers.push(watcher),
        Ok(None) => tracing::debug!("sections: no sections"),
        Err(err) => tracing::warn!("sections: {err}"),
    }

    listeners.extend(crate::cards::bind_cards(&document, state.modals));

    if config.features.skip_link {
        listeners.extend(add_skip_link(&document, &config.skip_target));
    }
    if config.features.typing_animation {
        start_typing(&document);
    }

    let scroll_top = state.scroll_top;
    let scroll = debounce(
        move |offset: f64| handle_scroll(scroll_top, offset),
        config.scroll_top.debounce_ms,
        BrowserScheduler,
    );
    let on_scroll = scroll.clone();
    let track_progress = config.features.scroll_progress;
    let mut progress = state.progress;
    listeners.push(EventListener::new(&window, "scroll", move |_| {
        let Some(window) = web_sys::window() else {
            return;
        };
        on_scroll.call(window.scroll_y().unwrap_or(0.0));
        if track_progress {
            progress.set(current_progress(&window));
        }
    }));

    listeners.extend(log_load_time(&window, &document));

    tracing::debug!(
        "page: bound {} listeners, {} observers",
        listeners.len(),
        watchers.len()
    );
    Ok(PageBindings {
        _listeners: listeners,
        _watchers: watchers,
        _scroll: scroll,
    })
}

fn bind_smooth_navigation(document: &Document) -> Vec<EventListener> {
    query_all(document, NAV_LINK_SELECTOR)
        .into_iter()
        .map(|link| {
            let href = link.get_attribute("href").unwrap_or_default();
            EventListener::new_with_options(
                &link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let Some(target) = section_fragment(&href).and_then(|id| {
                        web_sys::window()
                            .and_then(|window| window.document())
                            .and_then(|document| document.get_element_by_id(id))
                    }) else {
                        return;
                    };
                    let options = web_sys::ScrollIntoViewOptions::new();
                    options.set_behavior(web_sys::ScrollBehavior::Smooth);
                    options.set_block(web_sys::ScrollLogicalPosition::Start);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                },
            )
        })
        .collect()
}

fn add_skip_link(document: &Document, target: &str) -> Vec<EventListener> {
    let (Some(body), Ok(link)) = (document.body(), document.create_element("a")) else {
        return Vec::new();
    };
    let Ok(link) = link.dyn_into::<HtmlElement>() else {
        return Vec::new();
    };
    let _ = link.set_attribute("href", target);
    link.set_class_name("skip-link");
    link.set_text_content(Some(SKIP_LINK_TEXT));
    set_styles(&link, &SKIP_LINK_STYLE);
    if body.insert_before(&link, body.first_child().as_ref()).is_err() {
        return Vec::new();
    }

    let focused = link.clone();
    let blurred = link.clone();
    vec![
        EventListener::new(&link, "focus", move |_| set_styles(&focused, &SKIP_LINK_FOCUSED)),
        EventListener::new(&link, "blur", move |_| set_styles(&blurred, &SKIP_LINK_BLURRED)),
    ]
}

fn log_load_time(window: &Window, document: &Document) -> Option<EventListener> {
    fn report() {
        if let Some(performance) = web_sys::window().and_then(|window| window.performance()) {
            tracing::info!("portfolio loaded in {:.2}ms", performance.now());
        }
    }

    if document.ready_state() == "complete" {
        report();
        return None;
    }
    Some(EventListener::once(window, "load", |_| report()))
}
