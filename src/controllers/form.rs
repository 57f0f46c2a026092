//! Client-side form validation with a simulated submission.
//!
//! Every `<form>` on the page runs the same cycle:
//!
//! ```text
//! Idle --submit--> Invalid            (errors rendered next to fields)
//! Idle --submit--> Submitted(timer)   (acknowledgement shown)
//! Submitted --timer--> Idle           (fields reset, acknowledgement removed)
//! ```
//!
//! A submit while the reset is pending validates again. Success keeps the
//! existing acknowledgement and restarts the delay; failure withdraws the
//! acknowledgement and cancels the reset.

use crate::config::Config;
use crate::core::{Controller, EventResult, PageContext, PageEvent, TimerId};
use crate::dom::{classes, Dom, NewElement};
use crate::widgets::{FieldKind, FieldSnapshot, FormValidation, ValidationMessages};

/// Where one form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Invalid,
    /// Acknowledged; fields reset when the timer fires
    Submitted(TimerId),
}

struct FormEntry<N> {
    form: N,
    phase: FormPhase,
    acknowledgement: Option<N>,
}

pub struct FormController<D: Dom> {
    forms: Vec<FormEntry<D::Node>>,
    field_selector: String,
    messages: ValidationMessages,
    success_html: String,
    reset_delay_ms: u64,
}

impl<D: Dom> FormController<D> {
    pub fn attach(ctx: &mut PageContext<D>, config: &Config) -> Option<Self> {
        let forms: Vec<_> = ctx
            .dom
            .query_all(&config.selectors.forms)
            .into_iter()
            .map(|form| FormEntry {
                form,
                phase: FormPhase::Idle,
                acknowledgement: None,
            })
            .collect();
        if forms.is_empty() {
            return None;
        }

        Some(Self {
            forms,
            field_selector: config.selectors.form_fields.clone(),
            messages: config.validation_messages(),
            success_html: config.messages.success_html.clone(),
            reset_delay_ms: config.timing.form_reset_delay_ms,
        })
    }

    pub fn phase(&self, form: D::Node) -> Option<FormPhase> {
        self.forms
            .iter()
            .find(|entry| entry.form == form)
            .map(|entry| entry.phase)
    }

    fn submit(&mut self, index: usize, ctx: &mut PageContext<D>) {
        let form = self.forms[index].form;
        let fields = ctx.dom.query_all_within(form, &self.field_selector);

        clear_errors(ctx, form, &fields);

        let snapshots: Vec<FieldSnapshot> = fields
            .iter()
            .map(|&field| {
                let kind = FieldKind::from_element(
                    &ctx.dom.tag_name(field),
                    ctx.dom.attribute(field, "type").as_deref(),
                );
                FieldSnapshot::new(
                    kind,
                    ctx.dom.has_attribute(field, "required"),
                    ctx.dom.value(field),
                )
            })
            .collect();
        let validation = FormValidation::run(&snapshots, &self.messages);

        for (&field, errors) in fields.iter().zip(&validation.fields) {
            if errors.is_empty() {
                continue;
            }
            ctx.dom.add_class(field, classes::ERROR);
            let Some(parent) = ctx.dom.parent(field) else {
                continue;
            };
            for message in errors {
                let error = NewElement::new("div")
                    .class(classes::ERROR_MESSAGE)
                    .text(message);
                ctx.dom.append_element(parent, &error);
            }
        }

        let entry = &mut self.forms[index];
        let pending = match entry.phase {
            FormPhase::Submitted(timer) => {
                ctx.timers.cancel(timer);
                true
            }
            _ => false,
        };

        if !validation.is_valid() {
            if pending {
                if let Some(acknowledgement) = entry.acknowledgement.take() {
                    ctx.dom.remove(acknowledgement);
                }
            }
            entry.phase = FormPhase::Invalid;
            tracing::debug!(
                errors = validation.error_count(),
                fields = validation.invalid_fields(),
                "form invalid"
            );
            return;
        }

        if entry.acknowledgement.is_none() {
            let success = NewElement::new("div")
                .class(classes::SUCCESS_MESSAGE)
                .html(&self.success_html);
            entry.acknowledgement = ctx.dom.append_element(form, &success);
        }
        let timer = ctx.timers.set_timeout(self.reset_delay_ms);
        entry.phase = FormPhase::Submitted(timer);
        tracing::debug!(restarted = pending, "form submitted");
    }

    fn reset(&mut self, index: usize, ctx: &mut PageContext<D>) {
        let entry = &mut self.forms[index];
        ctx.dom.reset_form(entry.form);
        if let Some(acknowledgement) = entry.acknowledgement.take() {
            ctx.dom.remove(acknowledgement);
        }
        entry.phase = FormPhase::Idle;
        tracing::debug!("form reset");
    }
}

/// Drop every error annotation a previous pass left behind.
fn clear_errors<D: Dom>(ctx: &mut PageContext<D>, form: D::Node, fields: &[D::Node]) {
    let selector = format!(".{}", classes::ERROR_MESSAGE);
    for stale in ctx.dom.query_all_within(form, &selector) {
        ctx.dom.remove(stale);
    }
    for &field in fields {
        ctx.dom.remove_class(field, classes::ERROR);
    }
}

impl<D: Dom> Controller<D> for FormController<D> {
    fn name(&self) -> &'static str {
        "forms"
    }

    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult {
        match *event {
            PageEvent::Submit { form } => {
                let Some(index) = self.forms.iter().position(|entry| entry.form == form) else {
                    return EventResult::Ignored;
                };
                self.submit(index, ctx);
                EventResult::PreventDefault
            }
            PageEvent::Timer(id) => {
                let Some(index) = self
                    .forms
                    .iter()
                    .position(|entry| entry.phase == FormPhase::Submitted(id))
                else {
                    return EventResult::Ignored;
                };
                self.reset(index, ctx);
                EventResult::Handled
            }
            _ => EventResult::Ignored,
        }
    }
}
