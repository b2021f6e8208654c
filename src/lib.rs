use swc_core::{
    common::errors::HANDLER,
    ecma::{
        ast::*,
        visit::{VisitMut, VisitMutWith},
    },
    plugin::{
        metadata::TransformPluginMetadataContextKind, plugin_transform,
        proxies::TransformPluginProgramMetadata,
    },
};
use tracing::{debug, warn};

mod builders;
pub mod collect;
pub mod config;
pub mod detect;
pub mod error;
mod names;
mod synthesize;
mod wrap;


pub use collect::ComponentRecord;
pub use config::{PluginOptions, TransformSpec};
pub use error::ConfigError;

use builders::{default_import, require_stmt};
use collect::{ComponentCollector, ProcessedNodes};
use names::UidGenerator;
use synthesize::{configured_transforms, registry_decl, wrapper_fn_decl, ImportRequests};

// -----------------------------------------------------------------------------
// Filename helpers
// -----------------------------------------------------------------------------

/// Host filename with path separators unified and any `file://` scheme removed.
pub fn normalize_filename(filename: &str) -> String {
    let s = filename.replace('\\', "/");
    if let Some(rest) = s.strip_prefix("file:///") {
        format!("/{rest}")
    } else if let Some(rest) = s.strip_prefix("file://") {
        rest.to_string()
    } else {
        s
    }
}

// -----------------------------------------------------------------------------
// Program bodies
// -----------------------------------------------------------------------------

/// Statement container the synthesized prelude can be spliced into:
/// module items for ES modules, plain statements for scripts.
trait BodyItem: Sized {
    fn from_stmt(stmt: Stmt) -> Self;
    fn default_import(local: Ident, src: &str) -> Self;
    fn is_directive(&self) -> bool;
}

fn is_directive_stmt(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::Expr(ExprStmt { expr, .. }) if matches!(&**expr, Expr::Lit(Lit::Str(_))))
}

impl BodyItem for ModuleItem {
    fn from_stmt(stmt: Stmt) -> Self {
        ModuleItem::Stmt(stmt)
    }

    fn default_import(local: Ident, src: &str) -> Self {
        ModuleItem::ModuleDecl(ModuleDecl::Import(default_import(local, src)))
    }

    fn is_directive(&self) -> bool {
        matches!(self, ModuleItem::Stmt(s) if is_directive_stmt(s))
    }
}

impl BodyItem for Stmt {
    fn from_stmt(stmt: Stmt) -> Self {
        stmt
    }

    // Scripts cannot hold import declarations.
    fn default_import(local: Ident, src: &str) -> Self {
        require_stmt(local, src)
    }

    fn is_directive(&self) -> bool {
        is_directive_stmt(self)
    }
}

// -----------------------------------------------------------------------------
// Transform state
// -----------------------------------------------------------------------------

/// Wraps every component definition in a program so it is threaded through
/// the configured transforms at load time.
///
/// One instance per program. Running it again over the same tree finds every
/// candidate already processed and leaves the program alone.
pub struct ComponentTransform {
    options: PluginOptions,
    filename: String,
    processed: ProcessedNodes,
    records: Vec<ComponentRecord>,
}

impl ComponentTransform {
    pub fn new(options: PluginOptions, filename: impl Into<String>) -> Self {
        Self {
            options,
            filename: filename.into(),
            processed: ProcessedNodes::default(),
            records: vec![],
        }
    }

    /// Components wrapped by the most recent run, in traversal order.
    pub fn records(&self) -> &[ComponentRecord] {
        &self.records
    }

    fn build<T>(&mut self, body: &mut Vec<T>, mut uids: UidGenerator)
    where
        T: BodyItem,
        Vec<T>: for<'a> VisitMutWith<ComponentCollector<'a>>,
    {
        let registry = uids.generate_ident("components");
        let wrapper = uids.generate_ident("wrapComponent");

        let mut collector =
            ComponentCollector::new(&self.options, &mut uids, &mut self.processed, &wrapper);
        body.visit_mut_with(&mut collector);
        let records = collector.records;

        if records.is_empty() {
            debug!(filename = %self.filename, "no components found");
            self.records = records;
            return;
        }

        let mut imports = ImportRequests::default();
        let transforms = configured_transforms(
            &self.options.transforms,
            &registry,
            &self.filename,
            &mut uids,
            &mut imports,
        );
        let transform_ids: Vec<Ident> = transforms.iter().map(|t| t.id.clone()).collect();

        let mut prelude: Vec<T> = imports
            .into_entries()
            .into_iter()
            .map(|(src, local)| T::default_import(local, &src))
            .collect();
        prelude.push(T::from_stmt(registry_decl(&registry, &records)));
        prelude.extend(transforms.into_iter().map(|t| T::from_stmt(t.stmt)));
        prelude.push(T::from_stmt(wrapper_fn_decl(&wrapper, &transform_ids)));

        let at = body
            .iter()
            .position(|item| !item.is_directive())
            .unwrap_or(body.len());
        body.splice(at..at, prelude);

        debug!(
            filename = %self.filename,
            components = records.len(),
            transforms = transform_ids.len(),
            processed = self.processed.len(),
            "wrapped components"
        );
        self.records = records;
    }
}

impl VisitMut for ComponentTransform {
    fn visit_mut_module(&mut self, m: &mut Module) {
        let uids = UidGenerator::for_module(m);
        self.build(&mut m.body, uids);
    }

    fn visit_mut_script(&mut self, s: &mut Script) {
        let uids = UidGenerator::for_script(s);
        self.build(&mut s.body, uids);
    }
}

// -----------------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------------

/// Validates `config` and runs one [`ComponentTransform`] over `program`.
/// An invalid config leaves `program` untouched.
pub fn transform_program(
    program: &mut Program,
    config: &str,
    filename: &str,
) -> Result<Vec<ComponentRecord>, ConfigError> {
    let options = PluginOptions::from_json(config)?;
    let mut transform = ComponentTransform::new(options, normalize_filename(filename));
    program.visit_mut_with(&mut transform);
    Ok(transform.records)
}

#[plugin_transform]
pub fn process_transform(mut program: Program, metadata: TransformPluginProgramMetadata) -> Program {
    let raw = metadata
        .get_transform_plugin_config()
        .unwrap_or_else(|| "{}".to_string());
    let filename = metadata
        .get_context(&TransformPluginMetadataContextKind::Filename)
        .unwrap_or_else(|| "unknown".to_string());

    if let Err(err) = transform_program(&mut program, &raw, &filename) {
        warn!(error = %err, "rejecting plugin options");
        HANDLER.with(|handler| handler.err(&err.to_string()));
    }

    program
}
