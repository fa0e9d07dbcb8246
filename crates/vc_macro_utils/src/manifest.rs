use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The facade crate that re-exports every `vc_*` crate as a module.
const FACADE_NAME: &str = "vc_mapper";
const CRATE_PREFIX: &str = "vc_";

/// The parsed `Cargo.toml` of the crate that invoked a proc-macro.
///
/// Used to emit paths that are valid from the caller's side.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested name begins with `vc_` and the caller depends on the
///    facade `vc_mapper`, return `::vc_mapper::short_name`
///    (e.g. `vc_reflect` -> `::vc_mapper::reflect`).
/// 3. Repeat steps 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to `::crate_name`.
///
/// A crate that derives on its own types should declare
/// `extern crate self as crate_name;` so rule 4 still resolves.
#[derive(Debug)]
pub struct Manifest {
    manifest: Option<Document<Box<str>>>,
    modified_time: Option<SystemTime>,
}

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        Some(path)
    }

    fn load(path: &PathBuf, modified_time: Option<SystemTime>) -> Self {
        let manifest = std::fs::read_to_string(path)
            .ok()
            .and_then(|text| Document::parse(text.into_boxed_str()).ok());
        Self {
            manifest,
            modified_time,
        }
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return syn::parse_str(&format!("::{name}")).ok();
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            return syn::parse_str(&format!("::{FACADE_NAME}::{module}")).ok();
        }
        None
    }

    /// Returns a [`syn::Path`] for the package named `name` as seen from the
    /// caller. See the type-level documentation for the resolution order.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        let found = self.manifest.as_ref().and_then(|manifest| {
            ["dependencies", "dev-dependencies"]
                .into_iter()
                .find_map(|section| match manifest.get(section) {
                    Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                    _ => None,
                })
        });

        found.unwrap_or_else(|| {
            let ident = syn::Ident::new(name, proc_macro2::Span::call_site());
            let mut path = syn::Path::from(ident);
            path.leading_colon = Some(Default::default());
            path
        })
    }

    /// Runs `func` against the caller's manifest.
    ///
    /// Parsed manifests are cached per path and reparsed when the file's
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path() else {
            return func(&Self {
                manifest: None,
                modified_time: None,
            });
        };
        let modified_time = std::fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .ok();

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Self::load(&path, modified_time);
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}
