//! Data model for prompt sections.

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text(String),
    /// Rendered between double quotes.
    Quote(String),
    /// Rendered inside a bare code fence.
    Fenced(String),
    Bullets(Vec<String>),
    Numbered(Vec<String>),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PromptPayload {
    pub system: String,
    pub blocks: Vec<(String, Block)>, // title → block
    pub closing: Option<String>,
}

impl PromptPayload {
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, title: &str, block: Block) {
        self.blocks.push((title.to_string(), block));
    }
}
