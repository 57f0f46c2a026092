//! Promotion countdowns.

use crate::config::Config;
use crate::core::{Controller, EventResult, PageContext, PageEvent, TimerId};
use crate::dom::Dom;
use crate::widgets::{CountdownDisplay, CountdownState};

const END_DATE_ATTRIBUTE: &str = "data-end-date";

struct Countdown<N> {
    element: N,
    state: CountdownState,
    timer: TimerId,
    expired: bool,
}

/// Every countdown element gets its own ticking interval.
///
/// The interval keeps running after expiry; re-rendering the expired text
/// is harmless.
pub struct CountdownController<D: Dom> {
    countdowns: Vec<Countdown<D::Node>>,
    expired_text: String,
}

impl<D: Dom> CountdownController<D> {
    pub fn attach(ctx: &mut PageContext<D>, config: &Config) -> Option<Self> {
        let elements = ctx.dom.query_all(&config.selectors.countdowns);
        if elements.is_empty() {
            return None;
        }

        let mut controller = Self {
            countdowns: Vec::with_capacity(elements.len()),
            expired_text: config.messages.countdown_expired.clone(),
        };
        for element in elements {
            let raw = ctx
                .dom
                .attribute(element, END_DATE_ATTRIBUTE)
                .unwrap_or_default();
            let state = CountdownState::from_attribute(&raw);
            if state.end_ms().is_none() {
                tracing::warn!(%raw, "unreadable countdown end date");
            }
            let mut countdown = Countdown {
                element,
                state,
                timer: ctx.timers.set_interval(config.timing.countdown_tick_ms),
                expired: false,
            };
            render(&mut countdown, &controller.expired_text, ctx);
            controller.countdowns.push(countdown);
        }
        Some(controller)
    }
}

fn render<D: Dom>(
    countdown: &mut Countdown<D::Node>,
    expired_text: &str,
    ctx: &mut PageContext<D>,
) {
    let display = countdown.state.display_at(ctx.clock.now_millis());
    ctx.dom
        .set_text(countdown.element, &display.render(expired_text));

    if display == CountdownDisplay::Expired && !countdown.expired {
        countdown.expired = true;
        tracing::debug!(timer = countdown.timer.0, "countdown expired");
    }
}

impl<D: Dom> Controller<D> for CountdownController<D> {
    fn name(&self) -> &'static str {
        "countdown"
    }

    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult {
        let PageEvent::Timer(id) = *event else {
            return EventResult::Ignored;
        };
        let Some(countdown) = self.countdowns.iter_mut().find(|c| c.timer == id) else {
            return EventResult::Ignored;
        };
        render(countdown, &self.expired_text, ctx);
        EventResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use crate::controllers::testing::*;
    use crate::core::Page;
    use crate::dom::{Dom, ElementSpec, MemoryDom};

    fn page_with_countdown(end_date: &str) -> Page<MemoryDom> {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        dom.insert_spec(
            body,
            &ElementSpec::new("div")
                .with_class("countdown-timer")
                .with_attr("data-end-date", end_date),
        );
        mount(dom)
    }

    fn shown(page: &Page<MemoryDom>) -> String {
        page.dom().content(node(page, ".countdown-timer"))
    }

    #[test]
    fn test_five_second_countdown_expires_and_stays() {
        let end = (start() + Duration::milliseconds(5000)).to_rfc3339();
        let mut page = page_with_countdown(&end);
        assert_eq!(shown(&page), "0d 0h 0m 5s");

        for expected in ["0d 0h 0m 4s", "0d 0h 0m 3s", "0d 0h 0m 2s", "0d 0h 0m 1s"] {
            page.advance(1000);
            assert_eq!(shown(&page), expected);
        }

        page.advance(1000);
        assert_eq!(shown(&page), "Offer Expired");
        for _ in 0..3 {
            page.advance(1000);
            assert_eq!(shown(&page), "Offer Expired");
        }
    }

    #[test]
    fn test_demo_countdown_renders_at_mount() {
        let page = demo_page();
        // 2026-10-19 12:00 UTC to 2026-12-31 23:59:59 UTC
        assert_eq!(shown(&page), "73d 11h 59m 59s");
    }

    #[test]
    fn test_unreadable_date_is_expired() {
        let page = page_with_countdown("sometime soon");
        assert_eq!(shown(&page), "Offer Expired");
    }

    #[test]
    fn test_each_element_ticks_independently() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let soon = (start() + Duration::seconds(2)).to_rfc3339();
        let later = (start() + Duration::days(1)).to_rfc3339();
        for end in [&soon, &later] {
            dom.insert_spec(
                body,
                &ElementSpec::new("div")
                    .with_class("countdown-timer")
                    .with_attr("data-end-date", end),
            );
        }
        let mut page = mount(dom);
        assert_eq!(page.context().timers.pending(), 2);

        page.advance(3000);
        let texts: Vec<String> = nodes(&page, ".countdown-timer")
            .into_iter()
            .map(|element| page.dom().content(element))
            .collect();
        assert_eq!(texts, vec!["Offer Expired", "0d 23h 59m 57s"]);
    }
}
