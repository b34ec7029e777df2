use crate::visibility::{Transition, VisibilityChange};

pub const REVEAL_SELECTOR: &str = ".project-card, .contact-section";
pub const REVEALED_CLASS: &str = "animated";

pub const PENDING_STYLE: [(&str, &str); 3] = [
    ("opacity", "0"),
    ("transform", "translateY(30px)"),
    ("transition", "opacity 0.8s ease, transform 0.8s ease"),
];

pub const REVEALED_STYLE: [(&str, &str); 2] = [("opacity", "1"), ("transform", "translateY(0)")];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

#[derive(Clone, Debug, Default)]
pub struct RevealAnimator {
    states: Vec<RevealState>,
}

impl RevealAnimator {
    pub fn new(count: usize) -> Self {
        Self {
            states: vec![RevealState::Pending; count],
        }
    }

    pub fn register(&mut self) -> usize {
        self.states.push(RevealState::Pending);
        self.states.len() - 1
    }

    pub fn state(&self, key: usize) -> Option<RevealState> {
        self.states.get(key).copied()
    }

    pub fn reveal(&mut self, key: usize) -> bool {
        let Some(state) = self.states.get_mut(key) else {
            return false;
        };
        if *state == RevealState::Revealed {
            return false;
        }
        *state = RevealState::Revealed;
        true
    }

    pub fn apply(&mut self, changes: &[VisibilityChange<usize>]) -> Vec<usize> {
        changes
            .iter()
            .filter(|change| change.transition == Transition::Entered)
            .filter_map(|change| self.reveal(change.key).then_some(change.key))
            .collect()
    }
}

#[cfg(target_arch = "wasm32")]
pub fn bind_reveals(
    document: &web_sys::Document,
    options: &crate::visibility::TrackerOptions,
) -> Result<Option<crate::visibility::IntersectionWatcher>, String> {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;

    use crate::page::{query_all, set_styles};
    use crate::visibility::{IntersectionWatcher, VisibilityTracker};

    let targets = query_all(document, REVEAL_SELECTOR);
    if targets.is_empty() {
        return Ok(None);
    }
    let mut tracker = VisibilityTracker::new(*options);
    for (key, target) in targets.iter().enumerate() {
        if let Some(element) = target.dyn_ref::<web_sys::HtmlElement>() {
            set_styles(element, &PENDING_STYLE);
        }
        tracker.register(key);
    }
    tracing::debug!("reveal: observing {} elements", targets.len());

    let state = Rc::new(RefCell::new((tracker, RevealAnimator::new(targets.len()))));
    let elements = targets.clone();
    let watcher = IntersectionWatcher::observe(options, &targets, move |batch| {
        let revealed = {
            let mut state = state.borrow_mut();
            let (tracker, animator) = &mut *state;
            let changes = tracker.apply(batch);
            animator.apply(&changes)
        };
        for key in revealed {
            let Some(element) = elements.get(key) else {
                continue;
            };
            if let Some(html) = element.dyn_ref::<web_sys::HtmlElement>() {
                set_styles(html, &REVEALED_STYLE);
            }
            let _ = element.class_list().add_1(REVEALED_CLASS);
            tracing::debug!("reveal: element {key} revealed");
        }
    })?;
    Ok(Some(watcher))
}
