// Tool definitions offered to the opponent model

pub mod debate;
pub mod types;

pub use debate::{
    debate_tools, Counterargument, DebateInvocation, ResponseBlock, ScoreArgument, Verdict,
};
pub use types::{ParamType, ToolDefinition, ToolInputSchema, ToolUse};
