use swc_core::{common::DUMMY_SP, ecma::ast::*};

use crate::{
    builders::{
        array, bool_lit, call, const_stmt, ident, object, prop_name, returning_function, str_lit,
    },
    collect::ComponentRecord,
    config::TransformSpec,
    names::UidGenerator,
};

/// Default-import bindings requested while wiring transforms, one per
/// module source.
#[derive(Debug, Default)]
pub struct ImportRequests {
    entries: Vec<(String, Ident)>,
}

impl ImportRequests {
    pub fn request_default(&mut self, src: &str, uids: &mut UidGenerator) -> Ident {
        if let Some((_, local)) = self.entries.iter().find(|(s, _)| s == src) {
            return local.clone();
        }
        let local = uids.generate_ident(src);
        self.entries.push((src.to_string(), local.clone()));
        local
    }

    pub fn into_entries(self) -> Vec<(String, Ident)> {
        self.entries
    }
}

/// ```js
/// const _components = {
///   Foo: { displayName: "Foo", isInFunction: true },
///   _component: {}
/// };
/// ```
pub fn registry_decl(registry: &Ident, records: &[ComponentRecord]) -> Stmt {
    let props = records
        .iter()
        .map(|r| {
            let mut meta = vec![];
            if let Some(name) = &r.name {
                meta.push(("displayName", str_lit(name)));
            }
            if r.is_in_function {
                meta.push(("isInFunction", bool_lit(true)));
            }
            PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
                key: prop_name(&r.id),
                value: Box::new(Expr::Object(object(meta))),
            })))
        })
        .collect();
    const_stmt(
        registry.clone(),
        Expr::Object(ObjectLit {
            span: DUMMY_SP,
            props,
        }),
    )
}

/// A transform factory called with its configuration and bound to a fresh
/// name.
pub struct ConfiguredTransform {
    pub id: Ident,
    pub stmt: Stmt,
}

/// ```js
/// const _hmr2 = _hmr({
///   filename: "src/App.js",
///   components: _components,
///   locals: [module],
///   imports: [_react]
/// });
/// ```
pub fn configured_transforms(
    specs: &[TransformSpec],
    registry: &Ident,
    filename: &str,
    uids: &mut UidGenerator,
    imports: &mut ImportRequests,
) -> Vec<ConfiguredTransform> {
    specs
        .iter()
        .map(|spec| {
            let factory = imports.request_default(&spec.transform, uids);
            let locals: Vec<Expr> = spec
                .locals
                .iter()
                .map(|l| Expr::Ident(uids.reference(l)))
                .collect();
            let extra: Vec<Expr> = spec
                .imports
                .iter()
                .map(|src| Expr::Ident(imports.request_default(src, uids)))
                .collect();
            let id = uids.generate_ident(&spec.transform);
            let config = object(vec![
                ("filename", str_lit(filename)),
                ("components", Expr::Ident(registry.clone())),
                ("locals", array(locals)),
                ("imports", array(extra)),
            ]);
            let init = call(Expr::Ident(factory), vec![Expr::Object(config)]);
            ConfiguredTransform {
                stmt: const_stmt(id.clone(), Expr::Call(init)),
                id,
            }
        })
        .collect()
}

/// Nested calls over the configured instances, first-configured innermost:
/// `[a, b]` gives `b(a(Component, id), id)`.
pub fn compose(transforms: &[Ident], component: &Ident, id: &Ident) -> Expr {
    transforms
        .iter()
        .fold(Expr::Ident(component.clone()), |inner, t| {
            Expr::Call(call(Expr::Ident(t.clone()), vec![inner, Expr::Ident(id.clone())]))
        })
}

/// ```js
/// function _wrapComponent(id) {
///   return function (Component) {
///     return _b2(_a2(Component, id), id);
///   };
/// }
/// ```
pub fn wrapper_fn_decl(wrapper: &Ident, transforms: &[Ident]) -> Stmt {
    let id_param = ident("id");
    let component_param = ident("Component");
    let body = compose(transforms, &component_param, &id_param);
    let inner = Expr::Fn(FnExpr {
        ident: None,
        function: returning_function(vec![component_param], body),
    });
    Stmt::Decl(Decl::Fn(FnDecl {
        ident: wrapper.clone(),
        declare: false,
        function: returning_function(vec![id_param], inner),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::parse_module;
    use pretty_assertions::assert_eq;

    fn call_parts(e: &Expr) -> (String, &[ExprOrSpread]) {
        let Expr::Call(c) = e else {
            panic!("expected call, got {e:?}");
        };
        let Callee::Expr(callee) = &c.callee else {
            panic!("expected callee expression");
        };
        let Expr::Ident(i) = &**callee else {
            panic!("expected identifier callee");
        };
        (i.sym.to_string(), &c.args)
    }

    #[test]
    fn composes_first_configured_innermost() {
        let expr = compose(&[ident("_a2"), ident("_b2")], &ident("Component"), &ident("id"));
        let (outer, args) = call_parts(&expr);
        assert_eq!(outer, "_b2");
        let (inner, inner_args) = call_parts(&args[0].expr);
        assert_eq!(inner, "_a2");
        assert!(matches!(&*inner_args[0].expr, Expr::Ident(i) if &*i.sym == "Component"));
        assert!(matches!(&*inner_args[1].expr, Expr::Ident(i) if &*i.sym == "id"));
        assert!(matches!(&*args[1].expr, Expr::Ident(i) if &*i.sym == "id"));
    }

    #[test]
    fn no_transforms_returns_component_unchanged() {
        let expr = compose(&[], &ident("Component"), &ident("id"));
        assert!(matches!(expr, Expr::Ident(i) if &*i.sym == "Component"));
    }

    #[test]
    fn import_requests_are_deduplicated_by_source() {
        let module = parse_module("");
        let mut uids = UidGenerator::for_module(&module);
        let mut imports = ImportRequests::default();
        let a = imports.request_default("react", &mut uids);
        let b = imports.request_default("react", &mut uids);
        let c = imports.request_default("hmr", &mut uids);
        assert_eq!(a.sym, b.sym);
        assert_eq!(&*c.sym, "_hmr");
        assert_eq!(imports.into_entries().len(), 2);
    }

    #[test]
    fn registry_omits_false_and_missing_metadata() {
        let records = vec![
            ComponentRecord {
                id: "Foo".into(),
                name: Some("Foo".into()),
                is_in_function: true,
            },
            ComponentRecord {
                id: "_component".into(),
                name: None,
                is_in_function: false,
            },
        ];
        let Stmt::Decl(Decl::Var(var)) = registry_decl(&ident("_components"), &records) else {
            panic!("expected variable declaration");
        };
        let init = var.decls[0].init.as_deref().unwrap();
        let Expr::Object(obj) = init else {
            panic!("expected object literal");
        };
        assert_eq!(obj.props.len(), 2);

        fn entry(obj: &ObjectLit, i: usize) -> (&PropName, &ObjectLit) {
            let PropOrSpread::Prop(p) = &obj.props[i] else {
                panic!("expected property");
            };
            let Prop::KeyValue(kv) = &**p else {
                panic!("expected key-value property");
            };
            let Expr::Object(meta) = &*kv.value else {
                panic!("expected metadata object");
            };
            (&kv.key, meta)
        }

        let (key, meta) = entry(obj, 0);
        assert!(matches!(key, PropName::Ident(k) if &*k.sym == "Foo"));
        assert_eq!(meta.props.len(), 2);

        let (key, meta) = entry(obj, 1);
        assert!(matches!(key, PropName::Ident(k) if &*k.sym == "_component"));
        assert!(meta.props.is_empty());
    }
}
