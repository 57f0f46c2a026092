//! Scripted, headless playback against an in-memory page.
//!
//! A script is a TOML list of steps:
//!
//! ```toml
//! [[steps]]
//! action = "click"
//! selector = ".mobile-menu-btn"
//!
//! [[steps]]
//! action = "type"
//! selector = "#contact-phone"
//! text = "5551234567"
//!
//! [[steps]]
//! action = "advance"
//! ms = 3000
//! ```

use anyhow::{Context, Result};
use indextree::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::core::{Clock, EventResult, Page, PageEvent};
use crate::dom::{Dom, MemoryDom, PageFixture};

fn default_intersecting() -> bool {
    true
}

/// One user or browser action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Click {
        selector: String,
    },
    Submit {
        selector: String,
    },
    /// Replace a field's value and fire an input event
    Type {
        selector: String,
        text: String,
    },
    /// Optionally set a value, then fire a change event
    Change {
        selector: String,
        #[serde(default)]
        value: Option<String>,
    },
    Scroll {
        y: f64,
    },
    /// Let scheduler time pass
    Advance {
        ms: u64,
    },
    /// Every match enters (or leaves) the viewport
    Reveal {
        selector: String,
        #[serde(default = "default_intersecting")]
        intersecting: bool,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Click { selector } => write!(f, "click {selector}"),
            Step::Submit { selector } => write!(f, "submit {selector}"),
            Step::Type { selector, text } => write!(f, "type {text:?} into {selector}"),
            Step::Change {
                selector,
                value: Some(value),
            } => write!(f, "change {selector} to {value:?}"),
            Step::Change { selector, .. } => write!(f, "change {selector}"),
            Step::Scroll { y } => write!(f, "scroll to {y}"),
            Step::Advance { ms } => write!(f, "advance {ms}ms"),
            Step::Reveal {
                selector,
                intersecting: true,
            } => write!(f, "reveal {selector}"),
            Step::Reveal { selector, .. } => write!(f, "hide {selector}"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse simulation script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {:?}", path))?;
        Self::from_toml(&contents).with_context(|| format!("In script {:?}", path))
    }
}

/// What one step did
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: Step,
    pub result: EventResult,
    pub timers_fired: usize,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.step {
            Step::Advance { .. } => write!(f, "{}: {} timer(s) fired", self.step, self.timers_fired),
            _ => write!(f, "{}: {:?}", self.step, self.result),
        }
    }
}

pub struct Simulation {
    page: Page<MemoryDom>,
}

impl Simulation {
    pub fn new(fixture: &PageFixture, config: &Config, clock: Clock) -> Self {
        let dom = MemoryDom::from_fixture(fixture);
        Self {
            page: Page::mount(dom, config, clock),
        }
    }

    pub fn page(&self) -> &Page<MemoryDom> {
        &self.page
    }

    fn find(&self, selector: &str) -> Result<NodeId> {
        self.page
            .dom()
            .query(selector)
            .with_context(|| format!("No element matches {selector:?}"))
    }

    pub fn step(&mut self, step: &Step) -> Result<StepReport> {
        let mut timers_fired = 0;
        let result = match step {
            Step::Click { selector } => {
                let target = self.find(selector)?;
                self.page.dispatch(PageEvent::click(target))
            }
            Step::Submit { selector } => {
                let form = self.find(selector)?;
                self.page.dispatch(PageEvent::submit(form))
            }
            Step::Type { selector, text } => {
                let field = self.find(selector)?;
                self.page.dom_mut().set_value(field, text);
                self.page.dispatch(PageEvent::input(field))
            }
            Step::Change { selector, value } => {
                let field = self.find(selector)?;
                if let Some(value) = value {
                    self.page.dom_mut().set_value(field, value);
                }
                self.page.dispatch(PageEvent::change(field))
            }
            Step::Scroll { y } => {
                self.page.dom_mut().set_scroll_y(*y);
                self.page.dispatch(PageEvent::Scroll)
            }
            Step::Advance { ms } => {
                timers_fired = self.page.advance(*ms);
                if timers_fired > 0 {
                    EventResult::Handled
                } else {
                    EventResult::Ignored
                }
            }
            Step::Reveal {
                selector,
                intersecting,
            } => {
                let targets = self.page.dom().query_all(selector);
                if targets.is_empty() {
                    anyhow::bail!("No element matches {selector:?}");
                }
                targets
                    .into_iter()
                    .map(|target| self.page.intersect(target, *intersecting))
                    .fold(EventResult::Ignored, EventResult::merge)
            }
        };

        tracing::debug!(step = %step, ?result, "simulation step");
        Ok(StepReport {
            step: step.clone(),
            result,
            timers_fired,
        })
    }

    /// Run every step, stopping at the first one that cannot be applied.
    pub fn run(&mut self, script: &Script) -> Result<Vec<StepReport>> {
        script
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                self.step(step)
                    .with_context(|| format!("Step {} ({step}) failed", index + 1))
            })
            .collect()
    }

    pub fn snapshot_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.page.dom().snapshot())
            .context("Failed to serialize page snapshot")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testing::start;

    const TOUR: &str = include_str!("../demos/tour.toml");

    fn simulation() -> Simulation {
        Simulation::new(
            &PageFixture::demo().unwrap(),
            &Config::default(),
            Clock::manual_at(start()),
        )
    }

    #[test]
    fn test_parse_steps() {
        let script = Script::from_toml(
            r##"
            [[steps]]
            action = "reveal"
            selector = ".animate-on-scroll"

            [[steps]]
            action = "change"
            selector = "#service"
            "##,
        )
        .unwrap();
        assert_eq!(
            script.steps,
            vec![
                Step::Reveal {
                    selector: ".animate-on-scroll".to_string(),
                    intersecting: true
                },
                Step::Change {
                    selector: "#service".to_string(),
                    value: None
                },
            ]
        );
    }

    #[test]
    fn test_unknown_action_rejected() {
        let err = Script::from_toml("[[steps]]\naction = \"hover\"\nselector = \"a\"");
        assert!(err.is_err());
    }

    #[test]
    fn test_missing_selector_names_the_step() {
        let mut sim = simulation();
        let script = Script {
            steps: vec![
                Step::Scroll { y: 10.0 },
                Step::Click {
                    selector: "#nope".to_string(),
                },
            ],
        };
        let err = sim.run(&script).unwrap_err();
        assert!(format!("{err:#}").contains("Step 2 (click #nope)"));
        assert!(format!("{err:#}").contains("No element matches \"#nope\""));
    }

    #[test]
    fn test_demo_tour_runs() {
        let mut sim = simulation();
        let script = Script::from_toml(TOUR).unwrap();
        let reports = sim.run(&script).unwrap();
        assert_eq!(reports.len(), script.steps.len());

        let dom = sim.page().dom();
        let phone = dom.query("#contact-phone").unwrap();
        assert_eq!(dom.value(phone), "");
        assert!(dom.query(".success-message").is_none());
        assert!(sim.snapshot_json().unwrap().contains("\"scroll_y\""));
    }

    #[test]
    fn test_report_lines() {
        let mut sim = simulation();
        let report = sim.step(&Step::Advance { ms: 5000 }).unwrap();
        // carousel once, countdown five times
        assert_eq!(report.to_string(), "advance 5000ms: 6 timer(s) fired");

        let report = sim
            .step(&Step::Click {
                selector: ".cta-btn".to_string(),
            })
            .unwrap();
        assert_eq!(report.to_string(), "click .cta-btn: PreventDefault");
    }
}
