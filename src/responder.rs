//! Mock message responder
//!
//! Classifies user input by keyword and produces a canned reply after an
//! artificial delay standing in for network latency. No inference,
//! network call, or command execution happens here.
//!
//! The pending reply is an explicit task guarded by a cancellation
//! token: when the owning view is torn down the token is cancelled and
//! the reply never materializes, so nothing is written into a chat the
//! user already left.

use crate::error::{Result, OpdeckError};
use crate::store::types::{CodeBlocks, Message, MessageStatus};
use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Keywords that turn a prompt into a code request (case-insensitive
/// substring match)
const TRIGGER_KEYWORDS: [&str; 6] = ["html", "css", "javascript", "code", "render", "preview"];

/// Content of a code reply
const CODE_REPLY_CONTENT: &str = "I've created a simple HTML, CSS, and JavaScript example based on your request. You can view and edit the code below:";

/// Content of a preview reply
const PREVIEW_REPLY_CONTENT: &str = "I'm displaying a preview of the requested URL.";

/// Content of the system message appended when the simulated call fails
pub const ERROR_REPLY_CONTENT: &str =
    "Sorry, there was an error processing your request. Please try again.";

/// Fixed illustrative HTML payload carried by every code reply
const EXAMPLE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Example Page</title>
</head>
<body>
  <div class="container">
    <h1>Hello, World!</h1>
    <p>This is a simple example page.</p>
    <button id="changeColorBtn">Change Color</button>
  </div>
</body>
</html>"#;

/// Fixed illustrative CSS payload carried by every code reply
const EXAMPLE_CSS: &str = r#"body {
  font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
  line-height: 1.6;
  color: #333;
  background-color: #f8f9fa;
  margin: 0;
  padding: 20px;
}

.container {
  max-width: 800px;
  margin: 0 auto;
  background-color: white;
  padding: 20px;
  border-radius: 8px;
  box-shadow: 0 2px 4px rgba(0,0,0,0.1);
}

h1 {
  color: #0066cc;
}

button {
  background-color: #0066cc;
  color: white;
  border: none;
  padding: 8px 16px;
  border-radius: 4px;
  cursor: pointer;
  transition: background-color 0.3s;
}

button:hover {
  background-color: #0052a3;
}"#;

/// Fixed illustrative JavaScript payload carried by every code reply
const EXAMPLE_JS: &str = r#"document.addEventListener('DOMContentLoaded', () => {
  const button = document.getElementById('changeColorBtn');
  const heading = document.querySelector('h1');

  button.addEventListener('click', () => {
    const randomColor = '#' + Math.floor(Math.random()*16777215).toString(16);
    heading.style.color = randomColor;
  });
});"#;

/// How a submitted prompt will be answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Canned HTML/CSS/JS payload
    Code,
    /// Canned preview flag (static browser mockup)
    Preview,
}

/// Classify a prompt by keyword
///
/// # Examples
///
/// ```
/// use opdeck::responder::{classify, ReplyKind};
///
/// assert_eq!(classify("show me some HTML"), ReplyKind::Code);
/// assert_eq!(classify("open example.com"), ReplyKind::Preview);
/// ```
pub fn classify(input: &str) -> ReplyKind {
    let lowered = input.to_lowercase();
    if TRIGGER_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        ReplyKind::Code
    } else {
        ReplyKind::Preview
    }
}

/// The system message appended when the simulated call fails
pub fn error_reply() -> Message {
    Message::system(ERROR_REPLY_CONTENT).with_status(MessageStatus::Denied)
}

/// Produces a reply for a submitted prompt
///
/// The mock implementation is the only one shipped; the trait exists so
/// a real backend could slot in without touching the chat view.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produce the reply for `input`, or fail with
    /// [`OpdeckError::Cancelled`] if `cancel` fires first
    async fn respond(&self, input: &str, cancel: &CancellationToken) -> Result<Message>;
}

/// Keyword-triggered canned responder
pub struct MockResponder {
    delay: Duration,
}

impl MockResponder {
    /// Create a responder with the given artificial delay
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    fn build_reply(input: &str) -> Message {
        match classify(input) {
            ReplyKind::Code => Message::assistant(CODE_REPLY_CONTENT)
                .with_code_blocks(CodeBlocks {
                    html: Some(EXAMPLE_HTML.to_string()),
                    css: Some(EXAMPLE_CSS.to_string()),
                    js: Some(EXAMPLE_JS.to_string()),
                })
                .with_status(MessageStatus::Complete),
            ReplyKind::Preview => Message::assistant(PREVIEW_REPLY_CONTENT)
                .with_preview()
                .with_status(MessageStatus::Complete),
        }
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn respond(&self, input: &str, cancel: &CancellationToken) -> Result<Message> {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Pending reply cancelled");
                Err(OpdeckError::Cancelled.into())
            }
            _ = tokio::time::sleep(self.delay) => {
                Ok(Self::build_reply(input))
            }
        }
    }
}
