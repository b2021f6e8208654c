use swc_core::ecma::{
    ast::*,
    visit::{Visit, VisitWith},
};

use crate::config::PluginOptions;

/// What a candidate node turned out to be. Checked in declaration order,
/// first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// `hoc(options)(Inner)` with `hoc` listed in the `hoc` option.
    HigherOrder,
    /// `component({ render() { ... } })`
    CallBased,
    /// `function Foo() { return <div /> }`
    Functional,
    NotAComponent,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::HigherOrder => "higher-order",
            ComponentKind::CallBased => "call",
            ComponentKind::Functional => "functional",
            ComponentKind::NotAComponent => "none",
        }
    }
}

pub fn classify_call(call: &CallExpr, opts: &PluginOptions) -> ComponentKind {
    if is_higher_order_component(call, opts) {
        ComponentKind::HigherOrder
    } else if is_call_based_component(call) {
        ComponentKind::CallBased
    } else {
        ComponentKind::NotAComponent
    }
}

pub fn classify_fn_decl(f: &FnDecl) -> ComponentKind {
    if is_functional_component(f) {
        ComponentKind::Functional
    } else {
        ComponentKind::NotAComponent
    }
}

fn unparen(mut e: &Expr) -> &Expr {
    while let Expr::Paren(p) = e {
        e = &p.expr;
    }
    e
}

fn callee_expr(call: &CallExpr) -> Option<&Expr> {
    match &call.callee {
        Callee::Expr(e) => Some(unparen(e)),
        _ => None,
    }
}

fn is_render_key(key: &PropName) -> bool {
    match key {
        PropName::Ident(i) => &*i.sym == "render",
        PropName::Str(s) => &*s.value == "render",
        PropName::Computed(c) => {
            matches!(unparen(&c.expr), Expr::Lit(Lit::Str(s)) if &*s.value == "render")
        }
        _ => false,
    }
}

/// Object literal with a `render` property or method.
pub fn is_component_literal(expr: &Expr) -> bool {
    let Expr::Object(obj) = unparen(expr) else {
        return false;
    };
    obj.props.iter().any(|p| match p {
        PropOrSpread::Prop(prop) => match &**prop {
            Prop::Shorthand(i) => &*i.sym == "render",
            Prop::KeyValue(kv) => is_render_key(&kv.key),
            Prop::Method(m) => is_render_key(&m.key),
            Prop::Getter(g) => is_render_key(&g.key),
            Prop::Setter(s) => is_render_key(&s.key),
            Prop::Assign(_) => false,
        },
        PropOrSpread::Spread(_) => false,
    })
}

pub fn is_call_based_component(call: &CallExpr) -> bool {
    let callee_is_component =
        matches!(callee_expr(call), Some(Expr::Ident(i)) if &*i.sym == "component");
    callee_is_component
        && call
            .args
            .first()
            .is_some_and(|a| a.spread.is_none() && is_component_literal(&a.expr))
}

pub fn is_higher_order_component(call: &CallExpr, opts: &PluginOptions) -> bool {
    let Some(Expr::Call(inner)) = callee_expr(call) else {
        return false;
    };
    matches!(callee_expr(inner), Some(Expr::Ident(i)) if opts.is_hoc(&i.sym))
}

pub fn is_functional_component(f: &FnDecl) -> bool {
    let capitalized = f
        .ident
        .sym
        .chars()
        .next()
        .map(|c| c.is_ascii_uppercase())
        .unwrap_or(false);
    capitalized && contains_markup(&f.function)
}

/// Whether any JSX element appears anywhere in the function, nested
/// functions included.
pub fn contains_markup(f: &Function) -> bool {
    let mut finder = MarkupFinder { found: false };
    f.visit_with(&mut finder);
    finder.found
}

struct MarkupFinder {
    found: bool,
}

impl Visit for MarkupFinder {
    fn visit_jsx_element(&mut self, _: &JSXElement) {
        self.found = true;
    }
}

/// `displayName` string from the first object literal argument of a
/// call-based or higher-order component.
pub fn display_name(call: &CallExpr) -> Option<String> {
    let obj = call.args.iter().find_map(|a| match unparen(&a.expr) {
        Expr::Object(o) if a.spread.is_none() => Some(o),
        _ => None,
    })?;
    obj.props.iter().find_map(|p| {
        let PropOrSpread::Prop(prop) = p else {
            return None;
        };
        let Prop::KeyValue(kv) = &**prop else {
            return None;
        };
        let named = match &kv.key {
            PropName::Ident(i) => &*i.sym == "displayName",
            PropName::Str(s) => &*s.value == "displayName",
            _ => false,
        };
        match unparen(&kv.value) {
            Expr::Lit(Lit::Str(s)) if named => Some(s.value.to_string()),
            _ => None,
        }
    })
}
