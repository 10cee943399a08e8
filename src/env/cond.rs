use super::block::Fragment;
use super::scope::Scope;
use std::fmt;

/// `if (<predicate>) { .. } else { .. }` builder. The else clause is only
/// emitted when the else scope renders something.
#[derive(Debug, Clone)]
pub struct Conditional {
    predicate: String,
    then_scope: Scope,
    else_scope: Scope,
}

impl Conditional {
    pub fn new(predicate: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            then_scope: Scope::new(),
            else_scope: Scope::new(),
        }
    }

    /// Joins predicate fragments verbatim.
    pub fn from_parts<I>(parts: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::new(
            parts
                .into_iter()
                .map(|part| part.as_ref().to_string())
                .collect::<String>(),
        )
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn then<I>(&mut self, fragments: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Fragment>,
    {
        self.then_scope.entry_mut().append(fragments);
        self
    }

    pub fn or_else<I>(&mut self, fragments: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Fragment>,
    {
        self.else_scope.entry_mut().append(fragments);
        self
    }

    pub fn then_scope(&self) -> &Scope {
        &self.then_scope
    }

    pub fn then_scope_mut(&mut self) -> &mut Scope {
        &mut self.then_scope
    }

    pub fn else_scope(&self) -> &Scope {
        &self.else_scope
    }

    pub fn else_scope_mut(&mut self) -> &mut Scope {
        &mut self.else_scope
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Conditional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if ({}) {{ {} }}", self.predicate, self.then_scope)?;
        let alternative = self.else_scope.render();
        if !alternative.is_empty() {
            write!(f, " else {{ {alternative} }}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Capture, Emit};

    #[test]
    fn empty_else_is_omitted() {
        let mut branch = Conditional::new("ok");
        branch.then(["go();"]);
        assert_eq!(branch.render(), "if (ok) { go(); }");
    }

    #[test]
    fn else_clause_is_emitted_once() {
        let mut branch = Conditional::from_parts(["a", " && ", "b"]);
        branch.then(["x();"]).or_else(["y();"]).or_else(["z();"]);
        let text = branch.render();
        assert_eq!(text, "if (a && b) { x(); } else { y();z(); }");
        assert_eq!(text.matches("else").count(), 1);
    }

    #[test]
    fn branches_capture_independently() {
        let mut branch = Conditional::new("flag");
        branch.then_scope_mut().set("o", "k", "1");
        branch.else_scope_mut().set("o", "k", "2");
        assert_eq!(
            branch.render(),
            "if (flag) { var v0;v0=o[\"k\"];o[\"k\"]=1;o[\"k\"]=v0; } \
             else { var v0;v0=o[\"k\"];o[\"k\"]=2;o[\"k\"]=v0; }"
        );
    }

    #[test]
    fn builder_acts_as_then_scope() {
        let mut branch = Conditional::new("c");
        let temp = branch.def_with(["f()"]);
        branch.push("use(").push(temp.as_str()).push(");");
        branch.save("s", "n");
        assert_eq!(branch.then_scope().entry().temporaries(), ["v0", "v1"]);
        assert_eq!(
            branch.render(),
            "if (c) { var v0,v1;v0=f();use(v0);v1=s[\"n\"];s[\"n\"]=v1; }"
        );
    }

    #[test]
    fn nested_conditionals_render_inline() {
        let mut outer = Conditional::new("a");
        outer.cond("b").then(["inner();"]);
        outer.or_else([Conditional::new("c")]);
        assert_eq!(
            outer.render(),
            "if (a) { if (b) { inner(); } } else { if (c) {  } }"
        );
    }
}
