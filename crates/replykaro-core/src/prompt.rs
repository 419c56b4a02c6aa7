//! Fixed prompt pairs for drafting and evaluation.
//!
//! Field values are embedded verbatim. The prompt is plain model input, not
//! executed code, so no escaping is applied.

pub const DRAFT_SYSTEM_PROMPT: &str = "You are a human-sounding email assistant. \
You write complete, natural, emotionally intelligent replies on the user's behalf \
and you never disclose that you are an AI.";

pub const EVAL_SYSTEM_PROMPT: &str = "You are a strict evaluator of email replies. \
Respond with a single JSON object of the exact form {\"score\": <integer from 0 to 100>} \
and nothing else. No prose, no code fences.";

pub fn draft_prompt(message: &str, tone: &str, goal: &str) -> String {
    format!(
        "User message: \"{message}\"\n\
         Tone: {tone}\n\
         Goal: {goal}\n\
         \n\
         Write a complete, natural, polite reply with emotional intelligence."
    )
}

pub fn eval_prompt(draft: &str, goal: &str) -> String {
    format!(
        "Rate how likely the following reply is to achieve the goal \"{goal}\".\n\
         \n\
         Reply:\n\
         {draft}"
    )
}
