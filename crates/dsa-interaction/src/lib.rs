//! Remote collaborators: the OpenAI model backend and the LeetCode problem fetcher.

pub mod leetcode_fetcher;
pub mod openai_api_agent;

pub use leetcode_fetcher::LeetCodeProblemFetcher;
pub use openai_api_agent::{OpenAiApiAgent, OpenAiConnector};
