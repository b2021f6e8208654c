use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use swc_core::{
    common::{SyntaxContext, DUMMY_SP},
    ecma::{
        ast::*,
        visit::{Visit, VisitWith},
    },
};

static NON_IDENT_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9$_]").unwrap());
static LEADING_DASH_OR_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-0-9]+").unwrap());
static WORD_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+(.)?").unwrap());
static LEADING_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^_+").unwrap());
static TRAILING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+$").unwrap());

/// Turn an arbitrary hint (`"react-transform-hmr"`) into an identifier body
/// (`"reactTransformHmr"`).
pub fn to_identifier(hint: &str) -> String {
    let s = NON_IDENT_CHARS.replace_all(hint, "-");
    let s = LEADING_DASH_OR_DIGIT.replace(&s, "");
    let s = WORD_BREAK.replace_all(&s, |caps: &regex::Captures| {
        caps.get(1)
            .map(|c| c.as_str().to_uppercase())
            .unwrap_or_default()
    });
    s.into_owned()
}

/// Hands out identifiers that collide with nothing in the program and with
/// nothing handed out earlier in the same run.
pub struct UidGenerator {
    used: HashSet<String>,
    top_level: HashMap<String, SyntaxContext>,
}

impl UidGenerator {
    pub fn for_module(m: &Module) -> Self {
        let mut gen = Self::empty();
        m.visit_with(&mut SymbolCollector { out: &mut gen.used });
        for item in &m.body {
            match item {
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
                    for spec in &import.specifiers {
                        let local = match spec {
                            ImportSpecifier::Named(n) => &n.local,
                            ImportSpecifier::Default(d) => &d.local,
                            ImportSpecifier::Namespace(ns) => &ns.local,
                        };
                        gen.top_level.insert(local.sym.to_string(), local.ctxt);
                    }
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                    gen.record_decl(&export.decl)
                }
                ModuleItem::Stmt(Stmt::Decl(decl)) => gen.record_decl(decl),
                _ => {}
            }
        }
        gen
    }

    pub fn for_script(s: &Script) -> Self {
        let mut gen = Self::empty();
        s.visit_with(&mut SymbolCollector { out: &mut gen.used });
        for stmt in &s.body {
            if let Stmt::Decl(decl) = stmt {
                gen.record_decl(decl);
            }
        }
        gen
    }

    fn empty() -> Self {
        Self {
            used: HashSet::new(),
            top_level: HashMap::new(),
        }
    }

    fn record_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Fn(f) => {
                self.top_level.insert(f.ident.sym.to_string(), f.ident.ctxt);
            }
            Decl::Class(c) => {
                self.top_level.insert(c.ident.sym.to_string(), c.ident.ctxt);
            }
            Decl::Var(v) => {
                for d in &v.decls {
                    if let Pat::Ident(b) = &d.name {
                        self.top_level.insert(b.id.sym.to_string(), b.id.ctxt);
                    }
                }
            }
            _ => {}
        }
    }

    /// `_hint`, `_hint2`, `_hint3`, ... whichever is free first.
    pub fn generate(&mut self, hint: &str) -> String {
        let base = to_identifier(hint);
        let base = LEADING_UNDERSCORES.replace(&base, "");
        let base = TRAILING_DIGITS.replace(&base, "");
        let base = if base.is_empty() { "temp" } else { &*base };

        let mut i = 1;
        loop {
            let candidate = if i > 1 {
                format!("_{base}{i}")
            } else {
                format!("_{base}")
            };
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            i += 1;
        }
    }

    /// Marks a name as taken without generating it.
    pub fn reserve(&mut self, name: &str) {
        self.used.insert(name.to_string());
    }

    pub fn generate_ident(&mut self, hint: &str) -> Ident {
        Ident::new(self.generate(hint).into(), DUMMY_SP, SyntaxContext::empty())
    }

    /// Reference to an existing binding by name, linked to the top-level
    /// declaration when there is one.
    pub fn reference(&self, name: &str) -> Ident {
        let ctxt = self
            .top_level
            .get(name)
            .copied()
            .unwrap_or_else(SyntaxContext::empty);
        Ident::new(name.into(), DUMMY_SP, ctxt)
    }
}

struct SymbolCollector<'a> {
    out: &'a mut HashSet<String>,
}

impl<'a> Visit for SymbolCollector<'a> {
    fn visit_ident(&mut self, i: &Ident) {
        self.out.insert(i.sym.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn camel_cases_module_names() {
        assert_eq!(to_identifier("react-transform-hmr"), "reactTransformHmr");
        assert_eq!(to_identifier("@scope/pkg"), "scopePkg");
        assert_eq!(to_identifier("9lives"), "lives");
        assert_eq!(to_identifier("component"), "component");
    }

    #[test]
    fn numbers_successive_names() {
        let mut gen = UidGenerator::empty();
        assert_eq!(gen.generate("component"), "_component");
        assert_eq!(gen.generate("component"), "_component2");
        assert_eq!(gen.generate("component"), "_component3");
    }

    #[test]
    fn strips_underscores_and_trailing_digits_from_hint() {
        let mut gen = UidGenerator::empty();
        assert_eq!(gen.generate("_foo12"), "_foo");
        assert_eq!(gen.generate("foo"), "_foo2");
    }

    #[test]
    fn skips_names_already_in_program() {
        let mut gen = UidGenerator::empty();
        gen.used.insert("_components".into());
        gen.used.insert("_components2".into());
        assert_eq!(gen.generate("components"), "_components3");
    }

    #[test]
    fn reserved_names_are_skipped() {
        let mut gen = UidGenerator::empty();
        gen.reserve("_component");
        assert_eq!(gen.generate("component"), "_component2");
    }

    #[test]
    fn unknown_reference_has_empty_context() {
        let gen = UidGenerator::empty();
        let r = gen.reference("React");
        assert_eq!(&*r.sym, "React");
        assert_eq!(r.ctxt, SyntaxContext::empty());
    }
}
