use std::collections::HashSet;

use swc_core::{
    common::{util::take::Take, Span},
    ecma::{
        ast::*,
        visit::{VisitMut, VisitMutWith},
    },
};
use tracing::trace;

use crate::{
    config::PluginOptions,
    detect::{classify_call, classify_fn_decl, display_name, ComponentKind},
    names::UidGenerator,
    wrap::{wrap_component, wrap_function_component},
};

/// One wrapped component, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRecord {
    /// Registry key and the string passed to the wrapper function.
    pub id: String,
    /// Declared `displayName`, if any.
    pub name: Option<String>,
    pub is_in_function: bool,
}

/// Nodes already matched, keyed by source span. Synthesized nodes carry
/// `DUMMY_SP` and are never looked up: the collector replaces a node only
/// after walking its children, so a wrapper never gets visited.
#[derive(Debug, Default)]
pub struct ProcessedNodes {
    spans: HashSet<Span>,
}

impl ProcessedNodes {
    pub fn contains(&self, span: Span) -> bool {
        !span.is_dummy() && self.spans.contains(&span)
    }

    pub fn mark(&mut self, span: Span) {
        if !span.is_dummy() {
            self.spans.insert(span);
        }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Single pass that finds component definitions and wraps each one in
/// `<wrapper>("<id>")(...)`.
pub(crate) struct ComponentCollector<'a> {
    opts: &'a PluginOptions,
    uids: &'a mut UidGenerator,
    processed: &'a mut ProcessedNodes,
    wrapper: &'a Ident,
    pub(crate) records: Vec<ComponentRecord>,
    fn_depth: usize,
    ids: HashSet<String>,
}

impl<'a> ComponentCollector<'a> {
    pub(crate) fn new(
        opts: &'a PluginOptions,
        uids: &'a mut UidGenerator,
        processed: &'a mut ProcessedNodes,
        wrapper: &'a Ident,
    ) -> Self {
        Self {
            opts,
            uids,
            processed,
            wrapper,
            records: vec![],
            fn_depth: 0,
            ids: HashSet::new(),
        }
    }

    /// Builds the record for a freshly matched node. A display name already
    /// used as an id in this run falls back to a generated id; a display name
    /// taken as an id is reserved so later generated ids skip it.
    fn record(&mut self, name: Option<String>, kind: ComponentKind) -> String {
        let id = match &name {
            Some(n) if !self.ids.contains(n) => {
                self.uids.reserve(n);
                n.clone()
            }
            _ => self.uids.generate("component"),
        };
        self.ids.insert(id.clone());
        let is_in_function = self.fn_depth > 0;
        trace!(id = %id, kind = kind.as_str(), is_in_function, "wrapping component");
        self.records.push(ComponentRecord {
            id: id.clone(),
            name,
            is_in_function,
        });
        id
    }

    fn in_function<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.fn_depth += 1;
        f(self);
        self.fn_depth -= 1;
    }
}

impl<'a> VisitMut for ComponentCollector<'a> {
    fn visit_mut_expr(&mut self, e: &mut Expr) {
        let Expr::Call(call) = e else {
            e.visit_mut_children_with(self);
            return;
        };
        if self.processed.contains(call.span) {
            e.visit_mut_children_with(self);
            return;
        }
        let kind = classify_call(call, self.opts);
        if kind == ComponentKind::NotAComponent {
            e.visit_mut_children_with(self);
            return;
        }

        self.processed.mark(call.span);
        let id = self.record(display_name(call), kind);
        e.visit_mut_children_with(self);
        *e = wrap_component(e.take(), &id, self.wrapper);
    }

    fn visit_mut_decl(&mut self, d: &mut Decl) {
        let Decl::Fn(f) = d else {
            d.visit_mut_children_with(self);
            return;
        };
        if self.processed.contains(f.function.span) {
            d.visit_mut_children_with(self);
            return;
        }
        let kind = classify_fn_decl(f);
        if kind == ComponentKind::NotAComponent {
            d.visit_mut_children_with(self);
            return;
        }

        self.processed.mark(f.function.span);
        let id = self.record(None, kind);
        f.visit_mut_children_with(self);
        let name = f.ident.clone();
        let function = f.function.take();
        *d = Decl::Var(Box::new(wrap_function_component(name, function, &id, self.wrapper)));
    }

    fn visit_mut_function(&mut self, f: &mut Function) {
        self.in_function(|this| f.visit_mut_children_with(this));
    }

    fn visit_mut_arrow_expr(&mut self, a: &mut ArrowExpr) {
        self.in_function(|this| a.visit_mut_children_with(this));
    }

    fn visit_mut_constructor(&mut self, c: &mut Constructor) {
        self.in_function(|this| c.visit_mut_children_with(this));
    }

    fn visit_mut_getter_prop(&mut self, g: &mut GetterProp) {
        self.in_function(|this| g.visit_mut_children_with(this));
    }

    fn visit_mut_setter_prop(&mut self, s: &mut SetterProp) {
        self.in_function(|this| s.visit_mut_children_with(this));
    }
}
