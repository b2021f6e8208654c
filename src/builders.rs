use swc_core::{
    common::{SyntaxContext, DUMMY_SP},
    ecma::ast::*,
};

pub fn ident(name: &str) -> Ident {
    Ident::new(name.into(), DUMMY_SP, SyntaxContext::empty())
}

pub fn str_lit(value: &str) -> Expr {
    Expr::Lit(Lit::Str(Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    }))
}

pub fn bool_lit(value: bool) -> Expr {
    Expr::Lit(Lit::Bool(Bool {
        span: DUMMY_SP,
        value,
    }))
}

pub fn arg(expr: Expr) -> ExprOrSpread {
    ExprOrSpread {
        spread: None,
        expr: Box::new(expr),
    }
}

pub fn call(callee: Expr, args: Vec<Expr>) -> CallExpr {
    CallExpr {
        span: DUMMY_SP,
        callee: Callee::Expr(Box::new(callee)),
        args: args.into_iter().map(arg).collect(),
        type_args: None,
        ctxt: SyntaxContext::empty(),
    }
}

pub fn array(elems: Vec<Expr>) -> Expr {
    Expr::Array(ArrayLit {
        span: DUMMY_SP,
        elems: elems.into_iter().map(|e| Some(arg(e))).collect(),
    })
}

/// Bare identifier key when `key` is a valid identifier, string key otherwise.
pub fn prop_name(key: &str) -> PropName {
    if Ident::verify_symbol(key).is_ok() {
        PropName::Ident(IdentName::new(key.into(), DUMMY_SP))
    } else {
        PropName::Str(Str {
            span: DUMMY_SP,
            value: key.into(),
            raw: None,
        })
    }
}

pub fn object(props: Vec<(&str, Expr)>) -> ObjectLit {
    ObjectLit {
        span: DUMMY_SP,
        props: props
            .into_iter()
            .map(|(key, value)| {
                PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
                    key: prop_name(key),
                    value: Box::new(value),
                })))
            })
            .collect(),
    }
}

pub fn const_decl(name: Ident, init: Expr) -> VarDecl {
    VarDecl {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        kind: VarDeclKind::Const,
        declare: false,
        decls: vec![VarDeclarator {
            span: DUMMY_SP,
            name: Pat::Ident(BindingIdent {
                id: name,
                type_ann: None,
            }),
            init: Some(Box::new(init)),
            definite: false,
        }],
    }
}

pub fn const_stmt(name: Ident, init: Expr) -> Stmt {
    Stmt::Decl(Decl::Var(Box::new(const_decl(name, init))))
}

pub fn param(name: Ident) -> Param {
    Param {
        span: DUMMY_SP,
        decorators: vec![],
        pat: Pat::Ident(BindingIdent {
            id: name,
            type_ann: None,
        }),
    }
}

/// `function (<params>) { return <ret>; }` body and signature.
pub fn returning_function(params: Vec<Ident>, ret: Expr) -> Box<Function> {
    Box::new(Function {
        params: params.into_iter().map(param).collect(),
        decorators: vec![],
        span: DUMMY_SP,
        body: Some(BlockStmt {
            span: DUMMY_SP,
            stmts: vec![Stmt::Return(ReturnStmt {
                span: DUMMY_SP,
                arg: Some(Box::new(ret)),
            })],
            ctxt: SyntaxContext::empty(),
        }),
        is_generator: false,
        is_async: false,
        type_params: None,
        return_type: None,
        ctxt: SyntaxContext::empty(),
    })
}

pub fn default_import(local: Ident, src: &str) -> ImportDecl {
    ImportDecl {
        span: DUMMY_SP,
        specifiers: vec![ImportSpecifier::Default(ImportDefaultSpecifier {
            span: DUMMY_SP,
            local,
        })],
        src: Box::new(Str {
            span: DUMMY_SP,
            value: src.into(),
            raw: None,
        }),
        type_only: false,
        with: None,
        phase: ImportPhase::Evaluation,
    }
}

/// `const <local> = require("<src>")` for programs that cannot hold imports.
pub fn require_stmt(local: Ident, src: &str) -> Stmt {
    let require = call(Expr::Ident(ident("require")), vec![str_lit(src)]);
    const_stmt(local, Expr::Call(require))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_identifiers_become_bare_keys() {
        assert!(matches!(prop_name("Foo"), PropName::Ident(ref i) if &*i.sym == "Foo"));
        assert!(matches!(prop_name("_component2"), PropName::Ident(_)));
    }

    #[test]
    fn other_keys_are_quoted() {
        assert!(matches!(prop_name("my-button"), PropName::Str(_)));
        assert!(matches!(prop_name("2fast"), PropName::Str(_)));
        assert!(matches!(prop_name(""), PropName::Str(_)));
    }
}
