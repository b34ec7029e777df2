use std::any::Any;
use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_core::{ElementId, Mutation, Mutations, NoOpMutations};
use dioxus_html::{PlatformEventData, SerializedHtmlEventConverter, SerializedMouseData};

pub(crate) struct MountedDom {
    pub dom: VirtualDom,
    pub click_targets: Vec<ElementId>,
}

pub(crate) fn mount<P: Clone + 'static>(root: fn(P) -> Element, props: P) -> MountedDom {
    let mut dom = VirtualDom::new_with_props(root, props);
    let mut mutations = Mutations::default();
    dom.rebuild(&mut mutations);
    let click_targets = mutations
        .edits
        .into_iter()
        .filter_map(|edit| match edit {
            Mutation::NewEventListener { name, id } if name == "click" => Some(id),
            _ => None,
        })
        .collect();
    MountedDom { dom, click_targets }
}

impl MountedDom {
    pub fn html(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn click(&mut self, target: ElementId) {
        dioxus_html::set_event_converter(Box::new(SerializedHtmlEventConverter));
        let data = PlatformEventData::new(Box::new(SerializedMouseData::default()));
        let event = Event::new(Rc::new(data) as Rc<dyn Any>, true);
        self.dom.runtime().handle_event("click", event, target);
        self.dom.render_immediate(&mut NoOpMutations);
    }
}
