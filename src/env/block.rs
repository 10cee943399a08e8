use super::cond::Conditional;
use std::fmt;

const TEMP_PREFIX: &str = "v";

/// One entry of a block's instruction stream.
#[derive(Debug, Clone)]
pub enum Fragment {
    Text(String),
    Branch(Box<Conditional>),
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Fragment::Text(text)
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment::Text(text.to_string())
    }
}

impl From<&String> for Fragment {
    fn from(text: &String) -> Self {
        Fragment::Text(text.clone())
    }
}

impl From<Conditional> for Fragment {
    fn from(branch: Conditional) -> Self {
        Fragment::Branch(Box::new(branch))
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Text(text) => f.write_str(text),
            Fragment::Branch(branch) => write!(f, "{branch}"),
        }
    }
}

/// Append-only instruction stream with its own temporaries.
///
/// Renders as `var v0,v1;` followed by every fragment in append order. The
/// temporary counter belongs to the block, so sibling blocks both start at `v0`.
#[derive(Debug, Clone, Default)]
pub struct Block {
    instructions: Vec<Fragment>,
    temporaries: Vec<String>,
    counter: usize,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: impl Into<Fragment>) -> &mut Self {
        self.instructions.push(fragment.into());
        self
    }

    pub fn append<I>(&mut self, fragments: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Fragment>,
    {
        self.instructions.extend(fragments.into_iter().map(Into::into));
        self
    }

    pub fn def(&mut self) -> String {
        let name = format!("{TEMP_PREFIX}{}", self.counter);
        self.counter += 1;
        self.temporaries.push(name.clone());
        name
    }

    /// Allocates a temporary and assigns it the concatenated `parts`. With no
    /// parts (or only empty ones) this is a plain `def`.
    pub fn def_with<I>(&mut self, parts: I) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let name = self.def();
        let init: String = parts.into_iter().map(|part| part.as_ref().to_string()).collect();
        if !init.is_empty() {
            self.instructions.push(Fragment::Text(format!("{name}={init};")));
        }
        name
    }

    /// Appends a conditional that stays editable until the block is rendered.
    pub fn cond(&mut self, predicate: impl Into<String>) -> &mut Conditional {
        self.instructions
            .push(Fragment::Branch(Box::new(Conditional::new(predicate))));
        // The only panic site in the builders; the last fragment is the one pushed above.
        let Some(Fragment::Branch(branch)) = self.instructions.last_mut() else {
            unreachable!("conditional was just appended");
        };
        branch.as_mut()
    }

    pub fn temporaries(&self) -> &[String] {
        &self.temporaries
    }

    pub fn instructions(&self) -> &[Fragment] {
        &self.instructions
    }

    pub fn is_empty(&self) -> bool {
        self.temporaries.is_empty() && self.instructions.is_empty()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.temporaries.is_empty() {
            write!(f, "var {};", self.temporaries.join(","))?;
        }
        for fragment in &self.instructions {
            write!(f, "{fragment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_renders_nothing() {
        let block = Block::new();
        assert!(block.is_empty());
        assert_eq!(block.render(), "");
    }

    #[test]
    fn fragments_render_in_append_order() {
        let mut block = Block::new();
        block.push("a();").append(["b(", "1);"]);
        block.push(String::from("c();"));
        assert_eq!(block.render(), "a();b(1);c();");
    }

    #[test]
    fn def_allocates_sequential_temporaries() {
        let mut block = Block::new();
        let names: Vec<String> = (0..4).map(|_| block.def()).collect();
        assert_eq!(names, ["v0", "v1", "v2", "v3"]);
        assert_eq!(block.temporaries(), names.as_slice());
        assert_eq!(block.render(), "var v0,v1,v2,v3;");
    }

    #[test]
    fn def_with_emits_assignment() {
        let mut block = Block::new();
        block.push("start();");
        let bare = block.def();
        let init = block.def_with(["x", ".length"]);
        assert_eq!(bare, "v0");
        assert_eq!(init, "v1");
        assert_eq!(block.render(), "var v0,v1;start();v1=x.length;");
    }

    #[test]
    fn def_with_without_parts_only_declares() {
        let mut block = Block::new();
        let empty: [&str; 0] = [];
        assert_eq!(block.def_with(empty), "v0");
        assert_eq!(block.def_with([""]), "v1");
        assert_eq!(block.render(), "var v0,v1;");
        assert!(block.instructions().is_empty());
    }

    #[test]
    fn cond_returns_the_appended_branch() {
        let mut block = Block::new();
        block.cond("a").then(["x;"]);
        block.cond("b");
        assert_eq!(block.instructions().len(), 2);
        assert_eq!(block.render(), "if (a) { x; }if (b) {  }");
    }

    #[test]
    fn counters_are_per_block() {
        let mut first = Block::new();
        let mut second = Block::new();
        first.def();
        first.def();
        assert_eq!(second.def(), "v0");
        assert_eq!(first.def(), "v2");
    }

    #[test]
    fn conditional_fragment_renders_its_final_state() {
        let mut block = Block::new();
        block.push("pre;");
        let branch = block.cond("x > 1");
        branch.then(["a;"]);
        block.push("post;");
        if let Some(Fragment::Branch(branch)) = block.instructions.get_mut(1) {
            branch.or_else(["b;"]);
        }
        assert_eq!(block.render(), "pre;if (x > 1) { a; } else { b; }post;");
    }
}
