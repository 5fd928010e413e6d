//! Guided `/new` flow: one question per message

use crate::fields;
use crate::format::draft_lines;
use crate::frame::NewFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Model,
    Brand,
    Stock,
    Optionals,
    Confirm,
}

/// What the bot should do after a message in the flow
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// Ask the next question (or repeat the current one)
    Reply(String),
    /// The user confirmed; persist the draft
    Save(NewFrame),
    /// The user declined; drop the draft
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct NewFrameFlow {
    step: Step,
    draft: NewFrame,
}

pub const OPTIONALS_PROMPT: &str = "Optional fields? Send a line like: material=plastic lens=52 bridge=18 \
     temple=140 color=black price=120 notes=Nice\nOr send 'done' to finish without extras.";

impl NewFrameFlow {
    /// Start a flow and return the first question
    pub fn start() -> (Self, &'static str) {
        let flow = Self {
            step: Step::Model,
            draft: NewFrame::default(),
        };
        (flow, "Creating new frame. What is the model code? (or /cancel)")
    }

    pub fn advance(&mut self, text: &str) -> FlowOutcome {
        let text = text.trim();
        match self.step {
            Step::Model => {
                if text.is_empty() {
                    return FlowOutcome::Reply("Please provide a non-empty model code.".to_string());
                }
                self.draft.model_code = text.to_string();
                self.step = Step::Brand;
                FlowOutcome::Reply("Brand? (send '-' to leave empty)".to_string())
            }
            Step::Brand => {
                self.draft.brand = (text != "-" && !text.is_empty()).then(|| text.to_string());
                self.step = Step::Stock;
                FlowOutcome::Reply("Initial stock? (number, default 0)".to_string())
            }
            Step::Stock => {
                let stock = if text.is_empty() { Ok(0) } else { text.parse::<i64>() };
                match stock {
                    Ok(n) if n >= 0 => {
                        self.draft.stock = n;
                        self.step = Step::Optionals;
                        FlowOutcome::Reply(OPTIONALS_PROMPT.to_string())
                    }
                    _ => FlowOutcome::Reply("Not a number. Try again (or 0).".to_string()),
                }
            }
            Step::Optionals => {
                if text.eq_ignore_ascii_case("done") {
                    self.step = Step::Confirm;
                    return FlowOutcome::Reply(format!(
                        "Summary:\n{}\nType 'yes' to save or 'no' to cancel.",
                        draft_lines(&self.draft)
                    ));
                }
                let mut updated = self.draft.clone();
                let result = fields::update_frame(&mut updated, text).and_then(|_| updated.validate());
                match result {
                    Ok(()) => {
                        self.draft = updated;
                        FlowOutcome::Reply("Add more fields or 'done'.".to_string())
                    }
                    Err(e) => FlowOutcome::Reply(format!("{}\nFix it and send again, or 'done'.", e)),
                }
            }
            Step::Confirm => match text.to_lowercase().as_str() {
                "yes" | "y" => FlowOutcome::Save(self.draft.clone()),
                "no" | "n" => FlowOutcome::Cancelled,
                _ => FlowOutcome::Reply("Please answer yes or no.".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(outcome: FlowOutcome) -> String {
        match outcome {
            FlowOutcome::Reply(text) => text,
            other => panic!("expected reply, got {:?}", other),
        }
    }

    #[test]
    fn test_full_flow() {
        let (mut flow, _) = NewFrameFlow::start();
        reply(flow.advance("RB1234"));
        reply(flow.advance("RayBan"));
        assert!(reply(flow.advance("3")).starts_with("Optional fields?"));
        assert_eq!(reply(flow.advance("color=black lens=52")), "Add more fields or 'done'.");
        let summary = reply(flow.advance("done"));
        assert!(summary.contains("model_code=RB1234"));
        assert!(summary.contains("lens_width=52"));

        match flow.advance("yes") {
            FlowOutcome::Save(frame) => {
                assert_eq!(frame.model_code, "RB1234");
                assert_eq!(frame.brand.as_deref(), Some("RayBan"));
                assert_eq!(frame.stock, 3);
                assert_eq!(frame.color.as_deref(), Some("black"));
            }
            other => panic!("expected save, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_answers_repeat_the_step() {
        let (mut flow, _) = NewFrameFlow::start();
        assert_eq!(reply(flow.advance("  ")), "Please provide a non-empty model code.");
        reply(flow.advance("X"));
        reply(flow.advance("-"));
        assert!(reply(flow.advance("many")).starts_with("Not a number"));
        assert!(reply(flow.advance("-4")).starts_with("Not a number"));
        reply(flow.advance("0"));

        let err = reply(flow.advance("price=free"));
        assert!(err.contains("price must be a number"));
        assert!(reply(flow.advance("model=")).contains("model_code must not be empty"));

        reply(flow.advance("done"));
        assert_eq!(reply(flow.advance("maybe")), "Please answer yes or no.");
        assert_eq!(flow.advance("n"), FlowOutcome::Cancelled);
    }
}
