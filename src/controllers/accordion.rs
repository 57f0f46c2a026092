//! FAQ accordion.
//!
//! Items are grouped by their parent element; each group keeps at most one
//! panel open.

use crate::config::Config;
use crate::core::{Controller, EventResult, PageContext, PageEvent};
use crate::dom::{classes, Dom};
use crate::widgets::{AccordionChange, AccordionState};

const MAX_HEIGHT: &str = "max-height";

struct FaqItem<N> {
    item: N,
    question: Option<N>,
    answer: Option<N>,
}

struct FaqGroup<N> {
    parent: Option<N>,
    items: Vec<FaqItem<N>>,
    state: AccordionState,
}

pub struct AccordionController<D: Dom> {
    groups: Vec<FaqGroup<D::Node>>,
}

impl<D: Dom> AccordionController<D> {
    pub fn attach(ctx: &mut PageContext<D>, config: &Config) -> Option<Self> {
        let selectors = &config.selectors;
        let mut groups: Vec<FaqGroup<D::Node>> = Vec::new();

        for item in ctx.dom.query_all(&selectors.faq_items) {
            let faq = FaqItem {
                item,
                question: ctx.dom.query_within(item, &selectors.faq_question),
                answer: ctx.dom.query_within(item, &selectors.faq_answer),
            };
            let parent = ctx.dom.parent(item);
            match groups.iter_mut().find(|group| group.parent == parent) {
                Some(group) => group.items.push(faq),
                None => groups.push(FaqGroup {
                    parent,
                    items: vec![faq],
                    state: AccordionState::new(0, None),
                }),
            }
        }
        if groups.is_empty() {
            return None;
        }

        for group in &mut groups {
            let open = group
                .items
                .iter()
                .position(|faq| ctx.dom.has_class(faq.item, classes::ACTIVE));
            group.state = AccordionState::new(group.items.len(), open);
        }

        Some(Self { groups })
    }

    pub fn open_index(&self, group: usize) -> Option<usize> {
        self.groups.get(group).and_then(|group| group.state.open_index())
    }

    /// Collapse the whole group, then expand the chosen panel if any.
    fn render(group: &FaqGroup<D::Node>, change: AccordionChange, ctx: &mut PageContext<D>) {
        for faq in &group.items {
            ctx.dom.remove_class(faq.item, classes::ACTIVE);
            if let Some(answer) = faq.answer {
                ctx.dom.set_style(answer, MAX_HEIGHT, None);
            }
        }

        let Some(faq) = change.open.and_then(|open| group.items.get(open)) else {
            return;
        };
        ctx.dom.add_class(faq.item, classes::ACTIVE);
        if let Some(answer) = faq.answer {
            let height = format!("{}px", ctx.dom.scroll_height(answer));
            ctx.dom.set_style(answer, MAX_HEIGHT, Some(&height));
        }
    }
}

impl<D: Dom> Controller<D> for AccordionController<D> {
    fn name(&self) -> &'static str {
        "faq"
    }

    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult {
        let PageEvent::Click { target } = *event else {
            return EventResult::Ignored;
        };

        for group in &mut self.groups {
            let clicked = group.items.iter().position(|faq| {
                faq.question
                    .is_some_and(|question| ctx.dom.contains(question, target))
            });
            if let Some(index) = clicked {
                let change = group.state.click(index);
                tracing::debug!(clicked = index, open = ?change.open, "faq");
                Self::render(group, change, ctx);
                return EventResult::Handled;
            }
        }

        EventResult::Ignored
    }
}
