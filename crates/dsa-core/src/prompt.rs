//! Prompt construction for submissions.
//!
//! Every [`SubmissionMode`] has exactly one template. A template receives
//! three values, always in the same order: the problem description, the
//! language tag and the user's code.

use crate::mode::SubmissionMode;

/// Everything needed to build one prompt. Built per submission and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub mode: SubmissionMode,
    pub problem_description: String,
    pub language: String,
    pub user_code: String,
}

impl PromptRequest {
    pub fn new(
        mode: SubmissionMode,
        problem_description: impl Into<String>,
        language: impl Into<String>,
        user_code: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            problem_description: problem_description.into(),
            language: language.into(),
            user_code: user_code.into(),
        }
    }
}

/// Maps a [`PromptRequest`] to the final prompt text.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Renders the template for `request.mode`.
    ///
    /// Pure: the same request always yields the same bytes.
    pub fn build(request: &PromptRequest) -> String {
        let description = &request.problem_description;
        let language = &request.language;
        let code = &request.user_code;

        match request.mode {
            SubmissionMode::Check => format!(
                r#"You are a LeetCode problem validator. Your only job is to determine if the provided user's code is a correct and optimal solution for the given problem. Do not provide explanations or code improvements. Analyze the user's code based on the problem description and common edge cases. Respond with only "OK" if the solution is correct, or "Not OK" if it is incorrect.

---
**Problem Description:**
{description}
---
**User's Code ({language}):**
{code}
---
**Your Response:**"#
            ),
            SubmissionMode::Help => format!(
                r#"You are a helpful coding tutor. Your task is to analyze a user's incorrect LeetCode solution and provide hints and comments to guide them. Add comments directly into the code to explain the logical errors and suggest where to look for the fix. Do not write the final correct code. Return the user's original code, but with your helpful comments added.

---
**Problem Description:**
{description}
---
**User's Code ({language}):**
{code}
---
**Your Commented Code:**"#
            ),
            SubmissionMode::Fix => format!(
                r#"You are an expert programmer. Your task is to fix the provided incorrect LeetCode solution. Your response should be the complete, corrected code that solves the problem efficiently. Add comments as a code explaining what you changed and why.no extra explanation

---
**Problem Description:**
{description}
---
**User's Incorrect Code ({language}):**
{code}
---
**Your Corrected Code:**"#
            ),
            SubmissionMode::Optimize => format!(
                r#"You are a principal engineer specializing in performance. The user has provided a correct but potentially suboptimal solution to a LeetCode problem. Your task is to rewrite the code to be more optimal in terms of time or space complexity. Your response must be only the optimized code, with comments explaining the performance improvements.

---
**Problem Description:**
{description}
---
**User's Correct Code ({language}):**
{code}
---
**Your Optimized Code:**"#
            ),
        }
    }
}
