//! Injects blocks into the final prompt string.

use super::schema::{Block, PromptPayload};

pub fn inject(payload: PromptPayload) -> String {
    let mut prompt = String::new();
    prompt.push_str(&payload.system);
    prompt.push_str("\n\n");

    for (title, block) in payload.blocks {
        prompt.push_str(&format!("## {}:\n", title));
        match block {
            Block::Text(text) => {
                prompt.push_str(&text);
                prompt.push('\n');
            }
            Block::Quote(text) => prompt.push_str(&format!("\"{}\"\n", text)),
            Block::Fenced(text) => prompt.push_str(&format!("```\n{}\n```\n", text)),
            Block::Bullets(lines) => {
                for line in lines {
                    prompt.push_str(&format!("- {}\n", line));
                }
            }
            Block::Numbered(lines) => {
                for (i, line) in lines.iter().enumerate() {
                    prompt.push_str(&format!("{}. {}\n", i + 1, line));
                }
            }
        }
        prompt.push('\n');
    }

    if let Some(closing) = payload.closing {
        prompt.push_str(&closing);
        prompt.push('\n');
    }

    prompt
}
