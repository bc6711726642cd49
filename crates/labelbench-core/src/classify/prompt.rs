//! Hand-written classification templates.

pub(crate) const DIRECT_TEMPLATE: &str = "You are a historical-event classifier.
Allowed labels: {labels}

TASK:
Given the event description below, respond with **only** the correct label.

EVENT DESCRIPTION:
{event_text}

RESPONSE FORMAT:
One word: the exact label from the allowed labels.";

pub(crate) const REASONED_TEMPLATE: &str = "You are a historical-event classifier.
Allowed labels: {labels}

TASK:
Given the event description below, respond with **only** the correct label.

EVENT DESCRIPTION:
{event_text}

YOUR REASONING:
First, think step by step about the key facts.
1. ...
2. ...
3. ...

Then, at the end, respond with the single label from the allowed labels.

RESPONSE FORMAT:
One word: the exact label from the allowed labels.";

/// Fill `{labels}` and `{event_text}`. Labels are substituted first so that
/// braces inside the event text are left alone.
pub(crate) fn render(template: &str, labels: &str, event_text: &str) -> String {
    let (head, tail) = match template.split_once("{event_text}") {
        Some(parts) => parts,
        None => (template, ""),
    };
    let mut out = head.replace("{labels}", labels);
    if template.contains("{event_text}") {
        out.push_str(event_text);
        out.push_str(&tail.replace("{labels}", labels));
    }
    out
}
