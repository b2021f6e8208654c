use swc_core::{common::DUMMY_SP, ecma::ast::*};

use crate::builders::{call, const_decl, str_lit};

/// `<wrapper>("<id>")(<node>)`
pub fn wrap_component(node: Expr, id: &str, wrapper: &Ident) -> Expr {
    let configure = call(Expr::Ident(wrapper.clone()), vec![str_lit(id)]);
    Expr::Call(call(Expr::Call(configure), vec![node]))
}

/// Turns `function Foo() {}` into
/// `const Foo = <wrapper>("<id>")({ render: function Foo() {} })`,
/// keeping the original binding so existing references still resolve.
pub fn wrap_function_component(
    name: Ident,
    function: Box<Function>,
    id: &str,
    wrapper: &Ident,
) -> VarDecl {
    let render = Expr::Fn(FnExpr {
        ident: Some(name.clone()),
        function,
    });
    let component = Expr::Object(ObjectLit {
        span: DUMMY_SP,
        props: vec![PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
            key: PropName::Ident(IdentName::new("render".into(), DUMMY_SP)),
            value: Box::new(render),
        })))],
    });
    const_decl(name, wrap_component(component, id, wrapper))
}
