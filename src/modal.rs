use std::fmt;

use dioxus::prelude::*;

pub const MODAL_BODY: &str = "This project is still in development. Check back soon!";
pub const ENTRY_DELAY_MS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalId(u64);

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modal-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissPath {
    CloseButton,
    Backdrop,
    Escape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalPhase {
    Entering,
    Shown,
}

struct ModalInstance<S> {
    id: ModalId,
    title: String,
    phase: ModalPhase,
    _subscription: S,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModalView {
    pub id: ModalId,
    pub title: String,
    pub phase: ModalPhase,
}

pub struct ModalManager<S> {
    next_id: u64,
    open: Vec<ModalInstance<S>>,
}

impl<S> Default for ModalManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ModalManager<S> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            open: Vec::new(),
        }
    }

    /// Opens a new overlay. `subscribe` registers the instance's Escape
    /// listener and hands back the guard that unregisters it.
    pub fn open<F>(&mut self, title: impl Into<String>, subscribe: F) -> ModalId
    where
        F: FnOnce(ModalId) -> S,
    {
        let id = ModalId(self.next_id);
        self.next_id += 1;
        let subscription = subscribe(id);
        self.open.push(ModalInstance {
            id,
            title: title.into(),
            phase: ModalPhase::Entering,
            _subscription: subscription,
        });
        id
    }

    pub fn mark_shown(&mut self, id: ModalId) -> bool {
        match self.open.iter_mut().find(|modal| modal.id == id) {
            Some(modal) if modal.phase == ModalPhase::Entering => {
                modal.phase = ModalPhase::Shown;
                true
            }
            _ => false,
        }
    }

    pub fn dismiss(&mut self, id: ModalId, path: DismissPath) -> bool {
        let Some(position) = self.open.iter().position(|modal| modal.id == id) else {
            return false;
        };
        let modal = self.open.remove(position);
        tracing::debug!("modal: {} dismissed via {path:?}", modal.id);
        true
    }

    pub fn is_open(&self, id: ModalId) -> bool {
        self.open.iter().any(|modal| modal.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn views(&self) -> Vec<ModalView> {
        self.open
            .iter()
            .map(|modal| ModalView {
                id: modal.id,
                title: modal.title.clone(),
                phase: modal.phase,
            })
            .collect()
    }
}

#[cfg(target_arch = "wasm32")]
pub type EscapeSubscription = Option<gloo_events::EventListener>;
#[cfg(not(target_arch = "wasm32"))]
pub type EscapeSubscription = ();

pub type Modals = Signal<ModalManager<EscapeSubscription>>;

pub fn open_project_modal(mut modals: Modals, title: String) -> ModalId {
    let handle = modals;
    let id = modals
        .write()
        .open(title, move |id| escape_subscription(handle, id));
    tracing::debug!("modal: opened {id}");
    id
}

#[cfg(target_arch = "wasm32")]
fn escape_subscription(modals: Modals, id: ModalId) -> EscapeSubscription {
    use wasm_bindgen::JsCast;

    let document = web_sys::window().and_then(|window| window.document())?;
    Some(gloo_events::EventListener::new(&document, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
            return;
        };
        if event.key() != "Escape" {
            return;
        }
        // The listener belongs to the instance being removed, so the removal
        // runs after this callback returns.
        let mut modals = modals;
        wasm_bindgen_futures::spawn_local(async move {
            modals.write().dismiss(id, DismissPath::Escape);
        });
    }))
}

#[cfg(not(target_arch = "wasm32"))]
fn escape_subscription(_modals: Modals, _id: ModalId) -> EscapeSubscription {}

fn dismiss(mut modals: Modals, id: ModalId, path: DismissPath) {
    modals.write().dismiss(id, path);
}

const OVERLAY_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; background: rgba(0, 0, 0, 0.8); display: flex; align-items: center; justify-content: center; z-index: 1000; transition: opacity 0.3s ease;";
const CONTENT_STYLE: &str = "background: white; padding: 40px; border-radius: 12px; max-width: 500px; width: 90%; text-align: center; transition: transform 0.3s ease;";

#[component]
pub fn ModalLayer(modals: Modals) -> Element {
    let views = modals.read().views();
    rsx! {
        for view in views {
            ProjectModal {
                key: "{view.id}",
                id: view.id,
                title: view.title.clone(),
                shown: view.phase == ModalPhase::Shown,
                modals,
            }
        }
    }
}

#[component]
fn ProjectModal(id: ModalId, title: String, shown: bool, modals: Modals) -> Element {
    use_effect(move || {
        let mut modals = modals;
        spawn(async move {
            #[cfg(target_arch = "wasm32")]
            gloo_timers::future::TimeoutFuture::new(ENTRY_DELAY_MS).await;
            modals.write().mark_shown(id);
        });
    });

    let opacity = if shown { "1" } else { "0" };
    let scale = if shown { "1" } else { "0.9" };

    rsx! {
        div {
            class: "modal-overlay",
            role: "dialog",
            "aria-modal": "true",
            aria_label: "{title}",
            style: "{OVERLAY_STYLE} opacity: {opacity};",
            onclick: move |_| dismiss(modals, id, DismissPath::Backdrop),
            div {
                class: "modal-content",
                style: "{CONTENT_STYLE} transform: scale({scale});",
                onclick: move |event| event.stop_propagation(),
                h3 { style: "margin-bottom: 20px; color: #333;", "{title}" }
                p { style: "color: #666; margin-bottom: 30px;", "{MODAL_BODY}" }
                button {
                    r#type: "button",
                    class: "modal-close",
                    style: "padding: 12px 24px; background: #333; color: white; border: none; border-radius: 6px; cursor: pointer;",
                    onclick: move |event| {
                        event.stop_propagation();
                        dismiss(modals, id, DismissPath::CloseButton);
                    },
                    "Close"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Clone, Default)]
    struct KeyListeners {
        registered: Rc<RefCell<BTreeMap<u64, ModalId>>>,
        next: Rc<RefCell<u64>>,
    }

    struct Registration {
        slot: u64,
        listeners: KeyListeners,
    }

    impl Drop for Registration {
        fn drop(&mut self) {
            self.listeners.registered.borrow_mut().remove(&self.slot);
        }
    }

    impl KeyListeners {
        fn subscribe(&self, id: ModalId) -> Registration {
            let mut next = self.next.borrow_mut();
            let slot = *next;
            *next += 1;
            self.registered.borrow_mut().insert(slot, id);
            Registration {
                slot,
                listeners: self.clone(),
            }
        }

        fn count(&self) -> usize {
            self.registered.borrow().len()
        }

        fn press_escape(&self, manager: &mut ModalManager<Registration>) -> usize {
            let targets: Vec<ModalId> = self.registered.borrow().values().copied().collect();
            targets
                .into_iter()
                .filter(|id| manager.dismiss(*id, DismissPath::Escape))
                .count()
        }
    }

    #[test]
    fn every_dismiss_path_releases_the_listener() {
        let listeners = KeyListeners::default();
        let mut manager = ModalManager::new();

        for path in [DismissPath::CloseButton, DismissPath::Backdrop, DismissPath::Escape] {
            let id = manager.open("Raytracer", |id| listeners.subscribe(id));
            assert_eq!(listeners.count(), 1);
            assert!(manager.dismiss(id, path));
            assert_eq!(listeners.count(), 0);
            assert!(!manager.is_open(id));
        }
    }

    #[test]
    fn repeated_cycles_leave_no_residual_listener() {
        let listeners = KeyListeners::default();
        let mut manager = ModalManager::new();

        for cycle in 0..10 {
            let id = manager.open(format!("Project {cycle}"), |id| listeners.subscribe(id));
            let path = if cycle % 2 == 0 {
                DismissPath::CloseButton
            } else {
                DismissPath::Backdrop
            };
            manager.dismiss(id, path);
        }
        assert_eq!(listeners.count(), 0);

        let last = manager.open("Last", |id| listeners.subscribe(id));
        assert_eq!(listeners.press_escape(&mut manager), 1);
        assert!(!manager.is_open(last));
        assert_eq!(listeners.press_escape(&mut manager), 0);
    }

    #[test]
    fn rapid_opens_are_independent() {
        let listeners = KeyListeners::default();
        let mut manager = ModalManager::new();

        let first = manager.open("A", |id| listeners.subscribe(id));
        let second = manager.open("B", |id| listeners.subscribe(id));
        assert_ne!(first, second);
        assert_eq!(manager.views().len(), 2);

        assert!(manager.dismiss(first, DismissPath::Backdrop));
        assert!(!manager.dismiss(first, DismissPath::CloseButton));
        assert_eq!(
            manager.views().into_iter().map(|view| view.title).collect::<Vec<_>>(),
            vec!["B".to_string()]
        );
        assert_eq!(listeners.count(), 1);
    }

    #[test]
    fn entry_phase_advances_once() {
        let mut manager: ModalManager<()> = ModalManager::new();
        let id = manager.open("A", |_| ());
        assert_eq!(manager.views()[0].phase, ModalPhase::Entering);
        assert!(manager.mark_shown(id));
        assert!(!manager.mark_shown(id));
        assert_eq!(manager.views()[0].phase, ModalPhase::Shown);
    }
}
