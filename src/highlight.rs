use serde::Deserialize;

pub const SECTION_SELECTOR: &str = "section[id]";
pub const NAV_LINK_SELECTOR: &str = "nav a[href^=\"#\"]";
pub const ACTIVE_CLASS: &str = "active";

pub fn section_fragment(href: &str) -> Option<&str> {
    let fragment = href.trim().strip_prefix('#')?;
    if fragment.is_empty() {
        return None;
    }
    Some(fragment)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    #[default]
    LastReported,
    DocumentOrder,
    LargestRatio,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionEntry {
    pub id: String,
    pub ratio: f64,
    pub order: usize,
}

#[derive(Clone, Debug)]
pub struct NavIndex<L> {
    links: Vec<(String, L)>,
}

impl<L> NavIndex<L> {
    pub fn from_links<I, H>(links: I) -> Self
    where
        I: IntoIterator<Item = (H, L)>,
        H: AsRef<str>,
    {
        let links = links
            .into_iter()
            .filter_map(|(href, link)| {
                section_fragment(href.as_ref()).map(|id| (id.to_string(), link))
            })
            .collect();
        Self { links }
    }

    pub fn link_for(&self, section_id: &str) -> Option<&L> {
        self.links
            .iter()
            .find(|(id, _)| id == section_id)
            .map(|(_, link)| link)
    }

    pub fn links(&self) -> impl Iterator<Item = &L> {
        self.links.iter().map(|(_, link)| link)
    }
}

pub trait ActiveMarker<L> {
    fn set_active(&mut self, link: &L, active: bool);
}

#[derive(Clone, Debug)]
pub struct SectionHighlighter<L> {
    index: NavIndex<L>,
    tie_break: TieBreak,
    active_section: Option<String>,
}

impl<L> SectionHighlighter<L> {
    pub fn new(index: NavIndex<L>, tie_break: TieBreak) -> Self {
        Self {
            index,
            tie_break,
            active_section: None,
        }
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    pub fn index(&self) -> &NavIndex<L> {
        &self.index
    }

    pub fn on_entered<M>(&mut self, entered: &[SectionEntry], marker: &mut M)
    where
        M: ActiveMarker<L>,
    {
        match self.tie_break {
            TieBreak::LastReported => {
                for entry in entered {
                    self.activate(&entry.id, marker);
                }
            }
            TieBreak::DocumentOrder => {
                if let Some(entry) = entered.iter().min_by_key(|entry| entry.order) {
                    self.activate(&entry.id, marker);
                }
            }
            TieBreak::LargestRatio => {
                let winner = entered.iter().fold(None::<&SectionEntry>, |best, entry| {
                    match best {
                        Some(best) if best.ratio > entry.ratio => Some(best),
                        _ => Some(entry),
                    }
                });
                if let Some(entry) = winner {
                    self.activate(&entry.id, marker);
                }
            }
        }
    }

    fn activate<M>(&mut self, section_id: &str, marker: &mut M)
    where
        M: ActiveMarker<L>,
    {
        for link in self.index.links() {
            marker.set_active(link, false);
        }
        if let Some(link) = self.index.link_for(section_id) {
            marker.set_active(link, true);
        }
        self.active_section = Some(section_id.to_string());
    }
}

#[cfg(target_arch = "wasm32")]
struct ClassMarker;

#[cfg(target_arch = "wasm32")]
impl ActiveMarker<web_sys::Element> for ClassMarker {
    fn set_active(&mut self, link: &web_sys::Element, active: bool) {
        let classes = link.class_list();
        let _ = if active {
            classes.add_1(ACTIVE_CLASS)
        } else {
            classes.remove_1(ACTIVE_CLASS)
        };
    }
}

#[cfg(target_arch = "wasm32")]
pub fn bind_sections(
    document: &web_sys::Document,
    options: &crate::visibility::TrackerOptions,
    tie_break: TieBreak,
) -> Result<Option<crate::visibility::IntersectionWatcher>, String> {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::page::query_all;
    use crate::visibility::{IntersectionWatcher, Transition, VisibilityTracker};

    let sections = query_all(document, SECTION_SELECTOR);
    if sections.is_empty() {
        return Ok(None);
    }
    let ids: Vec<String> = sections.iter().map(|section| section.id()).collect();
    let index = NavIndex::from_links(
        query_all(document, NAV_LINK_SELECTOR)
            .into_iter()
            .filter_map(|link| link.get_attribute("href").map(|href| (href, link))),
    );
    tracing::debug!(
        "sections: tracking {} sections against {} nav links",
        sections.len(),
        index.len()
    );

    let mut tracker = VisibilityTracker::new(*options);
    for key in 0..sections.len() {
        tracker.register(key);
    }
    let highlighter = SectionHighlighter::new(index, tie_break);
    let state = Rc::new(RefCell::new((tracker, highlighter)));
    let watcher = IntersectionWatcher::observe(options, &sections, move |batch| {
        let mut state = state.borrow_mut();
        let (tracker, highlighter) = &mut *state;
        let entered: Vec<SectionEntry> = tracker
            .apply(batch)
            .into_iter()
            .filter(|change| change.transition == Transition::Entered)
            .filter_map(|change| {
                ids.get(change.key).map(|id| SectionEntry {
                    id: id.clone(),
                    ratio: change.ratio,
                    order: change.key,
                })
            })
            .collect();
        if entered.is_empty() {
            return;
        }
        highlighter.on_entered(&entered, &mut ClassMarker);
        tracing::debug!("sections: active {:?}", highlighter.active_section());
    })?;
    Ok(Some(watcher))
}
