use super::block::Block;
use std::fmt;

/// Paired entry/exit blocks. Exit text is always rendered after entry text,
/// which is what lets `save` put a property back on the way out.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    entry: Block,
    exit: Block,
}

fn property(container: &str, key: &str) -> String {
    let quoted = serde_json::Value::String(key.to_string());
    format!("{container}[{quoted}]")
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self) -> &Block {
        &self.entry
    }

    pub fn entry_mut(&mut self) -> &mut Block {
        &mut self.entry
    }

    pub fn exit(&self) -> &Block {
        &self.exit
    }

    pub fn exit_mut(&mut self) -> &mut Block {
        &mut self.exit
    }

    /// Captures `container[key]` into an entry temporary and restores it in
    /// the exit block. Returns the temporary's name.
    pub fn save(&mut self, container: &str, key: &str) -> String {
        let slot = property(container, key);
        let temp = self.entry.def_with([slot.as_str()]);
        self.exit.push(format!("{slot}={temp};"));
        temp
    }

    pub fn set(&mut self, container: &str, key: &str, value: &str) -> String {
        let temp = self.save(container, key);
        self.entry.push(format!("{}={value};", property(container, key)));
        temp
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_empty() && self.exit.is_empty()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.entry, self.exit)
    }
}
