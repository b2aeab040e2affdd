// Debate tool schema and invocation parsing
//
// The opponent model is offered three tools. Its responses arrive as an
// ordered list of content blocks which we classify into a tagged sequence
// of text fragments and typed invocations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{ParamType, ToolDefinition, ToolInputSchema, ToolUse};
use crate::claude::ContentBlock;

pub const SCORE_ARGUMENT: &str = "score_argument";
pub const GENERATE_COUNTERARGUMENT: &str = "generate_counterargument";
pub const END_DEBATE: &str = "end_debate";

/// Acknowledgement sent back for every invocation before the follow-up call
pub const TOOL_ACK: &str = "Tool executed successfully";

/// The fixed three-tool schema offered on every provider call
pub fn debate_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: SCORE_ARGUMENT.to_string(),
            description: "Score the user's argument on clarity, strength, and rhetoric. \
                          Use this after each user argument."
                .to_string(),
            input_schema: ToolInputSchema::object(&[
                (
                    "clarity",
                    ParamType::Number,
                    "How clear and understandable is the argument? (1-10)",
                ),
                (
                    "argument_strength",
                    ParamType::Number,
                    "How strong and logical is the argument? (1-10)",
                ),
                (
                    "rhetoric",
                    ParamType::Number,
                    "How persuasive is the rhetoric and delivery? (1-10)",
                ),
                (
                    "feedback",
                    ParamType::String,
                    "Brief constructive feedback on the argument",
                ),
            ]),
        },
        ToolDefinition {
            name: GENERATE_COUNTERARGUMENT.to_string(),
            description: "Generate a counterargument to the user's point".to_string(),
            input_schema: ToolInputSchema::object(&[
                ("user_point", ParamType::String, "The main point the user made"),
                (
                    "counter_strategy",
                    ParamType::String,
                    "The strategy for the counter (logic, emotion, facts, analogy)",
                ),
            ]),
        },
        ToolDefinition {
            name: END_DEBATE.to_string(),
            description: "Call this to end the debate and provide final scoring".to_string(),
            input_schema: ToolInputSchema::object(&[
                ("winner", ParamType::String, "Who won the debate: 'user' or 'ai'"),
                ("final_score", ParamType::Number, "Final score out of 100"),
                ("summary", ParamType::String, "Brief summary of debate performance"),
            ]),
        },
    ]
}

/// Per-turn scores supplied through `score_argument`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreArgument {
    pub clarity: f64,
    pub argument_strength: f64,
    pub rhetoric: f64,
    #[serde(default)]
    pub feedback: String,
}

/// Advisory payload of `generate_counterargument`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counterargument {
    #[serde(default)]
    pub user_point: String,
    #[serde(default)]
    pub counter_strategy: String,
}

/// Advisory payload of `end_debate`. Never terminates a session by itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(default)]
    pub winner: String,
    pub final_score: f64,
    #[serde(default)]
    pub summary: String,
}

/// A typed tool invocation
#[derive(Debug, Clone, PartialEq)]
pub enum DebateInvocation {
    Score(ScoreArgument),
    Counter(Counterargument),
    EndDebate(Verdict),
    /// Unknown tool, or a known tool whose input did not parse
    Other { name: String },
}

impl DebateInvocation {
    pub fn parse(name: &str, input: &Value) -> Self {
        let parsed = match name {
            SCORE_ARGUMENT => serde_json::from_value(input.clone()).map(DebateInvocation::Score),
            GENERATE_COUNTERARGUMENT => {
                serde_json::from_value(input.clone()).map(DebateInvocation::Counter)
            }
            END_DEBATE => serde_json::from_value(input.clone()).map(DebateInvocation::EndDebate),
            _ => {
                tracing::warn!(tool = %name, "Provider invoked an unknown tool");
                return DebateInvocation::Other {
                    name: name.to_string(),
                };
            }
        };

        parsed.unwrap_or_else(|e| {
            tracing::warn!(tool = %name, error = %e, "Malformed tool input, ignoring payload");
            DebateInvocation::Other {
                name: name.to_string(),
            }
        })
    }
}

/// One classified block of a provider response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBlock {
    Text(String),
    Invocation {
        call: ToolUse,
        kind: DebateInvocation,
    },
}

impl ResponseBlock {
    /// Classify response content. Tool results never appear in responses and
    /// are dropped.
    pub fn classify(content: &[ContentBlock]) -> Vec<ResponseBlock> {
        content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(ResponseBlock::Text(text.clone())),
                ContentBlock::ToolUse { id, name, input } => Some(ResponseBlock::Invocation {
                    kind: DebateInvocation::parse(name, input),
                    call: ToolUse {
                        id: id.clone(),
                        name: name.clone(),
                        input: input.clone(),
                    },
                }),
                ContentBlock::ToolResult { .. } => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_debate_tools_schema() {
        let tools = debate_tools();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec![SCORE_ARGUMENT, GENERATE_COUNTERARGUMENT, END_DEBATE]);
        assert_eq!(
            tools[0].input_schema.required,
            vec!["clarity", "argument_strength", "rhetoric", "feedback"]
        );
    }

    #[test]
    fn test_parse_score() {
        let input = json!({"clarity": 7, "argument_strength": 6.5, "rhetoric": 8, "feedback": "Nice"});
        let parsed = DebateInvocation::parse(SCORE_ARGUMENT, &input);
        assert_eq!(
            parsed,
            DebateInvocation::Score(ScoreArgument {
                clarity: 7.0,
                argument_strength: 6.5,
                rhetoric: 8.0,
                feedback: "Nice".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_score_missing_number_is_not_a_score() {
        let input = json!({"clarity": 7, "rhetoric": 8, "feedback": "Nice"});
        assert_eq!(
            DebateInvocation::parse(SCORE_ARGUMENT, &input),
            DebateInvocation::Other {
                name: SCORE_ARGUMENT.to_string()
            }
        );
    }

    #[test]
    fn test_parse_out_of_range_score_is_kept() {
        let input = json!({"clarity": 14, "argument_strength": -2, "rhetoric": 0});
        match DebateInvocation::parse(SCORE_ARGUMENT, &input) {
            DebateInvocation::Score(s) => {
                assert_eq!(s.clarity, 14.0);
                assert_eq!(s.argument_strength, -2.0);
                assert!(s.feedback.is_empty());
            }
            other => panic!("expected score, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_tool() {
        assert_eq!(
            DebateInvocation::parse("flip_table", &json!({})),
            DebateInvocation::Other {
                name: "flip_table".to_string()
            }
        );
    }

    #[test]
    fn test_classify_preserves_order() {
        let content = vec![
            ContentBlock::text("First. "),
            ContentBlock::ToolUse {
                id: "toolu_1".to_string(),
                name: END_DEBATE.to_string(),
                input: json!({"winner": "ai", "final_score": 41, "summary": "meh"}),
            },
            ContentBlock::text("Second."),
        ];

        let blocks = ResponseBlock::classify(&content);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], ResponseBlock::Text("First. ".to_string()));
        assert!(matches!(
            &blocks[1],
            ResponseBlock::Invocation { kind: DebateInvocation::EndDebate(v), .. } if v.winner == "ai"
        ));
        assert_eq!(blocks[2], ResponseBlock::Text("Second.".to_string()));
    }
}
