//! Booking modal and the booking form's time-slot selector.

use crate::config::Config;
use crate::core::{Controller, EventResult, Overlay, PageContext, PageEvent};
use crate::dom::{classes, Dom, NewElement};
use crate::widgets::{min_booking_date, time_slot_options, OpenState, Transition};

/// Opens the booking modal from any call-to-action.
///
/// Closes from a close button, or from a click whose direct target is the
/// modal backdrop itself. Clicks on the dialog content never close it.
pub struct ModalController<D: Dom> {
    modal: D::Node,
    triggers: Vec<D::Node>,
    closers: Vec<D::Node>,
    state: OpenState,
}

impl<D: Dom> ModalController<D> {
    pub fn attach(ctx: &mut PageContext<D>, config: &Config) -> Option<Self> {
        let selectors = &config.selectors;
        let modal = ctx.dom.query(&selectors.booking_modal)?;
        Some(Self {
            modal,
            triggers: ctx.dom.query_all(&selectors.booking_triggers),
            closers: ctx.dom.query_all(&selectors.modal_close),
            state: OpenState::default(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    fn apply(&self, transition: Transition, ctx: &mut PageContext<D>) {
        if !transition.changed() {
            return;
        }
        let open = self.state.is_open();
        ctx.dom.set_class(self.modal, classes::ACTIVE, open);
        if open {
            ctx.overlays.open(Overlay::BookingModal, &mut ctx.dom);
        } else {
            ctx.overlays.close(Overlay::BookingModal, &mut ctx.dom);
        }
        tracing::debug!(open, "booking modal");
    }
}

impl<D: Dom> Controller<D> for ModalController<D> {
    fn name(&self) -> &'static str {
        "booking-modal"
    }

    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult {
        let PageEvent::Click { target } = *event else {
            return EventResult::Ignored;
        };

        if super::hit(&ctx.dom, &self.triggers, target).is_some() {
            let transition = self.state.open();
            self.apply(transition, ctx);
            return EventResult::PreventDefault;
        }

        if target == self.modal || super::hit(&ctx.dom, &self.closers, target).is_some() {
            let transition = self.state.close();
            self.apply(transition, ctx);
            return EventResult::Handled;
        }

        EventResult::Ignored
    }
}

/// Keeps the date input from offering past days and refills the time
/// selector whenever the service or date changes.
pub struct BookingFormController<D: Dom> {
    service: Option<D::Node>,
    date: Option<D::Node>,
    time: Option<D::Node>,
    slots: Vec<String>,
    placeholder: String,
}

impl<D: Dom> BookingFormController<D> {
    pub fn attach(ctx: &mut PageContext<D>, config: &Config) -> Option<Self> {
        let selectors = &config.selectors;
        let service = ctx.dom.query(&selectors.service_select);
        let date = ctx.dom.query(&selectors.date_input);
        let time = ctx.dom.query(&selectors.time_select);
        if service.is_none() && date.is_none() {
            return None;
        }

        if let Some(date) = date {
            let min = min_booking_date(ctx.clock.today());
            ctx.dom.set_attribute(date, "min", &min);
        }

        Some(Self {
            service,
            date,
            time,
            slots: config.booking.time_slots.clone(),
            placeholder: config.messages.time_placeholder.clone(),
        })
    }

    fn refresh_time_slots(&self, ctx: &mut PageContext<D>) {
        let Some(time) = self.time else {
            return;
        };
        ctx.dom.clear_children(time);
        for option in time_slot_options(&self.slots, &self.placeholder) {
            let element = NewElement::new("option")
                .attribute("value", &option.value)
                .text(&option.label);
            ctx.dom.append_element(time, &element);
        }
        ctx.dom.set_value(time, "");
        tracing::debug!(slots = self.slots.len(), "time slots refreshed");
    }
}

impl<D: Dom> Controller<D> for BookingFormController<D> {
    fn name(&self) -> &'static str {
        "booking-form"
    }

    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult {
        let PageEvent::Change { target } = *event else {
            return EventResult::Ignored;
        };
        if Some(target) != self.service && Some(target) != self.date {
            return EventResult::Ignored;
        }
        self.refresh_time_slots(ctx);
        EventResult::Handled
    }
}
