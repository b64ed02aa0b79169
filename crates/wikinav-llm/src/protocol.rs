//! Request rendering and answer parsing for the navigation games
//!
//! Models mark the start of their answer with `###` and may close it with
//! `@@@`. Multi-hop answers list titles separated by ` -> `; single-hop
//! answers name exactly one title.

use wikinav_core::{ArticleTitle, LinkSet};

/// Marker preceding the answer
pub const ANSWER_MARKER: &str = "###";

/// Marker closing the answer
pub const END_MARKER: &str = "@@@";

/// Separator between titles in a multi-hop answer
pub const STEP_DELIMITER: &str = " -> ";

/// Request for a full path from `start` to `end`
pub fn path_request(start: &str, end: &str) -> String {
    format!("Start_Node: {} - End_Node: {}", start, end)
}

/// Request for the next hop, listing the candidate titles
pub fn link_request(current: &str, end: &str, candidates: &LinkSet) -> String {
    let names: Vec<&str> = candidates.iter().map(ArticleTitle::as_str).collect();
    let list = serde_json::to_string(&names).unwrap_or_else(|_| names.join(", "));
    format!(
        "{}\n\nList_Link_From_Start_Node:\n{}",
        path_request(current, end),
        list
    )
}

fn answer_body(text: &str) -> &str {
    let body = match text.find(ANSWER_MARKER) {
        Some(pos) => &text[pos + ANSWER_MARKER.len()..],
        None => text,
    };
    let body = match body.find(END_MARKER) {
        Some(pos) => &body[..pos],
        None => body,
    };
    body.trim()
}

/// Titles of a multi-hop answer in order, duplicates dropped
pub fn parse_path_answer(text: &str) -> Vec<ArticleTitle> {
    let mut steps: Vec<ArticleTitle> = Vec::new();
    for raw in answer_body(text).split(STEP_DELIMITER) {
        let step = ArticleTitle::new(raw);
        if step.is_empty() || steps.contains(&step) {
            continue;
        }
        steps.push(step);
    }
    steps
}

/// Title chosen in a single-hop answer; `None` when the answer is blank
pub fn parse_link_answer(text: &str) -> Option<ArticleTitle> {
    let choice = ArticleTitle::new(answer_body(text));
    (!choice.is_empty()).then_some(choice)
}
