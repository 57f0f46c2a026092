//! Live phone-number mask on telephone inputs.

use crate::config::Config;
use crate::core::{Controller, EventResult, PageContext, PageEvent};
use crate::dom::Dom;
use crate::widgets::format_phone_input;

pub struct PhoneFormatController<D: Dom> {
    inputs: Vec<D::Node>,
}

impl<D: Dom> PhoneFormatController<D> {
    pub fn attach(ctx: &mut PageContext<D>, config: &Config) -> Option<Self> {
        let inputs = ctx.dom.query_all(&config.selectors.phone_inputs);
        (!inputs.is_empty()).then_some(Self { inputs })
    }
}

impl<D: Dom> Controller<D> for PhoneFormatController<D> {
    fn name(&self) -> &'static str {
        "phone-format"
    }

    fn handle(&mut self, event: &PageEvent<D::Node>, ctx: &mut PageContext<D>) -> EventResult {
        let PageEvent::Input { target } = *event else {
            return EventResult::Ignored;
        };
        if !self.inputs.contains(&target) {
            return EventResult::Ignored;
        }

        let raw = ctx.dom.value(target);
        let formatted = format_phone_input(&raw);
        if formatted != raw {
            ctx.dom.set_value(target, &formatted);
        }
        EventResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use crate::controllers::testing::*;
    use crate::core::{EventResult, PageEvent};
    use crate::dom::Dom;

    fn type_into(page: &mut crate::core::Page<crate::dom::MemoryDom>, selector: &str, raw: &str) -> String {
        let input = node(page, selector);
        page.dom_mut().set_value(input, raw);
        page.dispatch(PageEvent::input(input));
        page.dom().value(input)
    }

    #[test]
    fn test_keystrokes_are_masked() {
        let mut page = demo_page();
        assert_eq!(type_into(&mut page, "#contact-phone", "55"), "55");
        assert_eq!(type_into(&mut page, "#contact-phone", "5551"), "(555) 1");
        assert_eq!(type_into(&mut page, "#contact-phone", "(555) 1234"), "5551234");
        assert_eq!(type_into(&mut page, "#contact-phone", "5551234567"), "(555) 123-4567");
        assert_eq!(type_into(&mut page, "#booking-phone", "555.123.4567 x9"), "(555) 123-4567");
    }

    #[test]
    fn test_formatted_value_is_stable() {
        let mut page = demo_page();
        let once = type_into(&mut page, "#contact-phone", "5551234567");
        let twice = type_into(&mut page, "#contact-phone", &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_other_inputs_untouched() {
        let mut page = demo_page();
        let name = node(&page, "#contact-name");
        page.dom_mut().set_value(name, "5551234567");
        assert_eq!(page.dispatch(PageEvent::input(name)), EventResult::Ignored);
        assert_eq!(page.dom().value(name), "5551234567");
    }
}
