//! AI assistant actions
//!
//! The front end requests one of a closed set of actions; each maps to a
//! fixed system instruction and prompt template. Unknown action strings are
//! rejected by the HTTP handler with a 400, not silently defaulted.

/// Supported AI assistant actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    /// Write Python code for a described task
    GenerateCode,

    /// Find and fix errors in the given code
    CheckAndFix,

    /// Improve readability and efficiency of the given code
    ImproveCode,

    /// Free-form programming chat
    ChatResponse,
}

impl AiAction {
    /// Parse an action key from the request body
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "generate_code" => Some(AiAction::GenerateCode),
            "check_and_fix" => Some(AiAction::CheckAndFix),
            "improve_code" => Some(AiAction::ImproveCode),
            "chat_response" => Some(AiAction::ChatResponse),
            _ => None,
        }
    }

    /// Whether the response payload carries generated code rather than chat text
    pub fn returns_code(&self) -> bool {
        !matches!(self, AiAction::ChatResponse)
    }

    /// System instruction sent to the generation API for this action
    pub fn system_instruction(&self) -> &'static str {
        match self {
            AiAction::GenerateCode => {
                "You are an expert Python programming assistant. Your task is to write \
                 Python code only, in response to the user's request. Do not add any \
                 explanatory text, introductions, or conclusions. The output must be \
                 clean, ready-to-run Python code."
            }
            AiAction::CheckAndFix => {
                "You are an expert Python debugger. Your task is to inspect the code \
                 provided by the user, find logical or syntactic errors, and return a \
                 corrected version of the code only. Do not add any explanation or \
                 analysis of the errors. If the code is error-free, return it unchanged."
            }
            AiAction::ImproveCode => {
                "You are an expert in Python performance and readability. Your task is \
                 to improve the code provided by the user. Return an improved version of \
                 the code only, with short comments explaining the improvements. Do not \
                 add any analysis outside the code comments."
            }
            AiAction::ChatResponse => {
                "You are a code studio assistant. Answer the user's questions about \
                 programming, Python, and code concepts, and help with general \
                 programming tasks. Keep a friendly, helpful tone."
            }
        }
    }

    /// Expand the user prompt into the template for this action
    pub fn user_prompt(&self, prompt: &str) -> String {
        match self {
            AiAction::GenerateCode => {
                format!("Request: write Python code for the following task:\n---\n{prompt}\n---")
            }
            AiAction::CheckAndFix => {
                format!("Code to fix:\n---\n{prompt}\n---")
            }
            AiAction::ImproveCode => {
                format!("Code to improve:\n---\n{prompt}\n---")
            }
            // Chat uses the prompt as-is
            AiAction::ChatResponse => prompt.to_string(),
        }
    }
}
