//! System contexts given to the models

use serde::{Deserialize, Serialize};
use std::fmt;

const GAME_RULES: &str = "\
The WikiGame (also called Wikirace or Wikipedia Speedrun) asks a player to travel from one \
Wikipedia article to another by following only the internal links found in the body of each \
article. The aim is to reach the target article in as few clicks as possible.

Rules:
A Start_Node article and an End_Node article are chosen.
From the Start_Node, only internal links inside the main body of the current article may be \
followed until the End_Node is reached.
";

const NO_THINK: &str = "\
Your task:
You receive a Start_Node and an End_Node.
Produce a path from the start to the end that uses as few link hops as possible.
Give no explanation.
Your whole output must be:
- a line containing only ###
- one line with the article titles of the path separated by -> (for example Page1 -> Page2 -> Page3)

Output format:
###
Page1 -> Page2 -> Page3 -> Page4

Important:
- The titles above only illustrate the format; do not reuse them as an answer.
- Write only article titles separated by ->.
- Do not add reasoning, and write nothing before or after the final line.
- Begin your output with ### on its own line.
";

const THINK: &str = "\
Your task:
Solve the path from the Start_Node to the End_Node with as few hops as possible.
Explain briefly why you follow each link, then write the full path with -> between titles.

Instructions:
You receive two article titles, Start_Node and End_Node.
Starting from Start_Node, find a way to End_Node, justifying every link you choose.
Once you reach the destination:
- first write your explanation
- then write a line containing only ###
- then write the full path as article titles separated by ->
- write nothing after the path

Important:
- Never omit the ### line before the path.
- The final line contains only Wikipedia article titles separated by ->.
- The titles appear in the order chosen in the explanation.
- The final line starts with the Start_Node and ends with the End_Node, with no suffix.

Output format:
Explanation:
1. I start at \"Page 1\" (Start_Node) and follow \"Page 2\" because ...
2. From \"Page 2\" I follow \"Page 3\" because ...
3. From \"Page 3\" I reach \"Page 4\" (End_Node) because ...
###
Page1 -> Page2 -> Page3 -> Page4
";

const LINK: &str = "\
Your task:
You receive a Start_Node, an End_Node and List_Link_From_Start_Node, the titles of the \
articles linked from the Start_Node.
Choose exactly one title from List_Link_From_Start_Node, the one that brings you closest to \
the End_Node. You will be asked again from the article you choose until the End_Node is reached.
Give no explanation.
Your whole output must be:
- a line containing only ###
- the single chosen title, taken from List_Link_From_Start_Node
- a final line containing only @@@

Output format:
###
Page_Name_Choice
@@@

Very important:
- Write only the chosen title.
- The title must come from List_Link_From_Start_Node and keep its exact spelling and case.
- Never answer with the Start_Node itself.
- Begin your output with ### on its own line and end it with @@@.
";

/// How a model is asked to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextType {
    /// Whole path at once, no reasoning
    NoThink,
    /// Whole path at once after a step-by-step explanation
    Think,
    /// One hop per call, choosing among the visible links
    Link,
}

impl ContextType {
    pub const ALL: [ContextType; 3] = [Self::NoThink, Self::Think, Self::Link];

    /// Label reported in result rows
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoThink => "NO_THINK",
            Self::Think => "THINK",
            Self::Link => "LINK",
        }
    }

    pub fn is_single_hop(&self) -> bool {
        matches!(self, Self::Link)
    }

    /// Full system context for this mode
    pub fn prompt(&self) -> String {
        let task = match self {
            Self::NoThink => NO_THINK,
            Self::Think => THINK,
            Self::Link => LINK,
        };
        format!("{}\n{}", GAME_RULES, task)
    }
}

impl fmt::Display for ContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_describe_the_answer_protocol() {
        for context in ContextType::ALL {
            let prompt = context.prompt();
            assert!(prompt.starts_with("The WikiGame"));
            assert!(prompt.contains("###"));
        }
        assert!(ContextType::Link.prompt().contains("@@@"));
        assert!(ContextType::Link.prompt().contains("List_Link_From_Start_Node"));
        assert!(!ContextType::NoThink.prompt().contains("@@@"));
    }

    #[test]
    fn test_labels_and_serde() {
        assert_eq!(ContextType::NoThink.to_string(), "NO_THINK");
        assert!(ContextType::Link.is_single_hop());
        assert!(!ContextType::Think.is_single_hop());
        let parsed: Vec<ContextType> = serde_json::from_str(r#"["no_think", "think", "link"]"#).unwrap();
        assert_eq!(parsed, ContextType::ALL.to_vec());
    }
}
