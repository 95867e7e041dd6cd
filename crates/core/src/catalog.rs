//! Type catalog: explicit registration of generated types
//!
//! Generated code registers each type once at process start under its dotted
//! module path (`Test.TheStruct`, `Test.Keywords._Await`). Registration
//! assigns a [`TypeKey`], the runtime type identity carried by every enum,
//! instance and proxy value, and records the type's classification, so no
//! structural inspection is ever needed later.
//!
//! Types live in a module tree. Each path segment is either a module or, for
//! the last segment, a type. Sibling segments, fields and enumerators must
//! stay distinct once the reserved-word marker is stripped.

use crate::error::{Error, Result};
use crate::keywords;
use crate::value::{EnumValue, Instance, Record, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Runtime type identity assigned at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(u32);

impl TypeKey {
    #[cfg(test)]
    pub(crate) fn from_raw(raw: u32) -> Self {
        TypeKey(raw)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Classification of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Value type with a fixed field list
    Struct,
    /// Enumeration
    Enum,
    /// Class with single inheritance
    Class,
    /// User exception
    Exception,
    /// Remote interface reference
    Proxy,
}

impl TypeKind {
    /// Whether a zero-argument instance can be built
    pub fn is_constructible(&self) -> bool {
        matches!(self, TypeKind::Struct | TypeKind::Class | TypeKind::Exception)
    }
}

/// A declared field and its default value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    name: String,
    default: Value,
}

impl FieldDef {
    /// Field `name` (internal form) defaulting to `default`.
    pub fn new(name: impl Into<String>, default: impl Into<Value>) -> Self {
        FieldDef {
            name: name.into(),
            default: default.into(),
        }
    }

    /// Internal field name, possibly carrying the reserved-word marker
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value assigned by the zero-argument constructor
    pub fn default_value(&self) -> &Value {
        &self.default
    }
}

/// Catalog entry of one registered type.
#[derive(Debug, Clone)]
pub struct TypeEntry {
    key: TypeKey,
    path: String,
    kind: TypeKind,
    parent: Option<TypeKey>,
    /// Inherited fields first, then own fields
    fields: Vec<FieldDef>,
    enumerators: Vec<(String, i32)>,
}

impl TypeEntry {
    /// Runtime type identity
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Registered dotted path (internal form)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Classification
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Base class or base exception
    pub fn parent(&self) -> Option<TypeKey> {
        self.parent
    }

    /// Effective field list
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Enumerators of an enum, in declaration order
    pub fn enumerators(&self) -> impl Iterator<Item = (&str, i32)> {
        self.enumerators.iter().map(|(name, ordinal)| (name.as_str(), *ordinal))
    }

    /// Slice type id, e.g. `::Test::SmallClass`.
    pub fn ice_id(&self) -> String {
        self.path
            .split('.')
            .map(|segment| format!("::{}", keywords::unmangle(segment)))
            .collect()
    }

    /// Enumerator by name, trying the marker-prefixed alternate when the plain
    /// spelling is absent.
    pub fn enumerator(&self, name: &str) -> Option<EnumValue> {
        let find = |wanted: &str| {
            self.enumerators
                .iter()
                .find(|(n, _)| n == wanted)
                .map(|(n, ordinal)| EnumValue::new(self.key, n.clone(), *ordinal))
        };
        find(name).or_else(|| find(&keywords::marked(name)))
    }

    /// Zero-argument construction: every field at its default.
    pub fn construct(&self) -> Result<Value> {
        let fields: Record = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.default.clone()))
            .collect();
        let instance = Instance::new(self.key, fields);

        match self.kind {
            TypeKind::Struct => Ok(Value::Struct(instance)),
            TypeKind::Class => Ok(Value::Object(instance)),
            TypeKind::Exception => Ok(Value::Exception(instance)),
            TypeKind::Enum | TypeKind::Proxy => Err(Error::Lookup(format!(
                "{} is not constructible",
                self.path
            ))),
        }
    }

    /// Construct, then assign the given fields (internal names).
    pub fn construct_with<K, I>(&self, fields: I) -> Result<Value>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut value = self.construct()?;
        if let Some(instance) = value.as_instance_mut() {
            for (name, field) in fields {
                instance.set(name, field);
            }
        }
        Ok(value)
    }
}

#[derive(Debug, Default)]
struct Module {
    members: BTreeMap<String, Member>,
}

#[derive(Debug)]
enum Member {
    Module(Module),
    Type(TypeKey),
}

/// All registered types, organised as a module tree.
#[derive(Debug, Default)]
pub struct TypeCatalog {
    root: Module,
    entries: Vec<Arc<TypeEntry>>,
}

impl TypeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no type is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a struct.
    pub fn define_struct<I>(&mut self, path: &str, fields: I) -> Result<TypeKey>
    where
        I: IntoIterator<Item = FieldDef>,
    {
        self.define(path, TypeKind::Struct, None, fields.into_iter().collect(), Vec::new())
    }

    /// Register a class deriving from `parent` (or from the root object type).
    pub fn define_class<I>(&mut self, path: &str, parent: Option<TypeKey>, fields: I) -> Result<TypeKey>
    where
        I: IntoIterator<Item = FieldDef>,
    {
        self.define(path, TypeKind::Class, parent, fields.into_iter().collect(), Vec::new())
    }

    /// Register a user exception deriving from `parent`.
    pub fn define_exception<I>(
        &mut self,
        path: &str,
        parent: Option<TypeKey>,
        fields: I,
    ) -> Result<TypeKey>
    where
        I: IntoIterator<Item = FieldDef>,
    {
        self.define(path, TypeKind::Exception, parent, fields.into_iter().collect(), Vec::new())
    }

    /// Register an enum with its `(name, ordinal)` enumerators.
    pub fn define_enum<'a, I>(&mut self, path: &str, enumerators: I) -> Result<TypeKey>
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        let enumerators = enumerators
            .into_iter()
            .map(|(name, ordinal)| (name.to_string(), ordinal))
            .collect();
        self.define(path, TypeKind::Enum, None, Vec::new(), enumerators)
    }

    /// Register a proxy type, conventionally named `<Interface>Prx`.
    pub fn define_proxy(&mut self, path: &str) -> Result<TypeKey> {
        self.define(path, TypeKind::Proxy, None, Vec::new(), Vec::new())
    }

    fn define(
        &mut self,
        path: &str,
        kind: TypeKind,
        parent: Option<TypeKey>,
        own_fields: Vec<FieldDef>,
        enumerators: Vec<(String, i32)>,
    ) -> Result<TypeKey> {
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::Definition(format!("invalid type path {path:?}")));
        }

        let mut fields = match parent {
            Some(parent_key) => {
                let base = self.entry(parent_key).ok_or_else(|| {
                    Error::Lookup(format!("unknown parent {parent_key} of {path}"))
                })?;
                if base.kind != kind {
                    return Err(Error::Definition(format!(
                        "{path} cannot derive from {:?} {}",
                        base.kind, base.path
                    )));
                }
                base.fields.clone()
            }
            None => Vec::new(),
        };
        fields.extend(own_fields);
        if let Some(name) = plain_clash(fields.iter().map(|f| f.name.as_str())) {
            return Err(Error::Definition(format!("{path} has two fields named {name}")));
        }
        if let Some(name) = plain_clash(enumerators.iter().map(|(n, _)| n.as_str())) {
            return Err(Error::Definition(format!("{path} has two enumerators named {name}")));
        }

        let key = TypeKey(self.entries.len() as u32);
        let (last, modules) = segments
            .split_last()
            .ok_or_else(|| Error::Definition(format!("invalid type path {path:?}")))?;

        let mut module = &mut self.root;
        for segment in modules {
            check_spelling(module, segment, path)?;
            let member = module
                .members
                .entry(segment.to_string())
                .or_insert_with(|| Member::Module(Module::default()));
            module = match member {
                Member::Module(m) => m,
                Member::Type(_) => {
                    return Err(Error::Definition(format!(
                        "{segment} in {path} is a type, not a module"
                    )))
                }
            };
        }
        check_spelling(module, last, path)?;
        if module.members.contains_key(*last) {
            return Err(Error::Definition(format!("{path} is already defined")));
        }
        module.members.insert(last.to_string(), Member::Type(key));

        self.entries.push(Arc::new(TypeEntry {
            key,
            path: path.to_string(),
            kind,
            parent,
            fields,
            enumerators,
        }));
        Ok(key)
    }

    /// Register every type of `other`, in its registration order.
    ///
    /// Keys are reassigned. Types registered before a failing one stay
    /// registered.
    pub fn merge(&mut self, other: TypeCatalog) -> Result<()> {
        let mut keys: HashMap<TypeKey, TypeKey> = HashMap::new();
        for entry in &other.entries {
            let (parent, inherited) = match entry.parent {
                Some(old) => {
                    let new = keys.get(&old).copied().ok_or_else(|| {
                        Error::Lookup(format!("unknown parent {old} of {}", entry.path))
                    })?;
                    let inherited = other.entry(old).map_or(0, |base| base.fields.len());
                    (Some(new), inherited)
                }
                None => (None, 0),
            };
            let key = self.define(
                &entry.path,
                entry.kind,
                parent,
                entry.fields[inherited..].to_vec(),
                entry.enumerators.clone(),
            )?;
            keys.insert(entry.key, key);
        }
        Ok(())
    }

    /// Entry of a registered type
    pub fn entry(&self, key: TypeKey) -> Option<&Arc<TypeEntry>> {
        self.entries.get(key.0 as usize)
    }

    /// Slice type ids of a type and its bases, most derived first.
    pub fn ice_ids(&self, key: TypeKey) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut next = Some(key);
        while let Some(current) = next {
            let entry = self
                .entry(current)
                .ok_or_else(|| Error::Lookup(format!("no registered type for {current}")))?;
            ids.push(entry.ice_id());
            next = entry.parent;
        }
        Ok(ids)
    }

    /// Resolve a dotted name segment by segment. A segment absent under its
    /// plain spelling is retried with the reserved-word marker.
    pub fn resolve(&self, name: &str) -> Result<Arc<TypeEntry>> {
        let mut module = &self.root;
        let mut segments = name.split('.').peekable();

        while let Some(segment) = segments.next() {
            let member = module
                .members
                .get(segment)
                .or_else(|| module.members.get(&keywords::marked(segment)))
                .ok_or_else(|| Error::Lookup(format!("could not find type {name}")))?;

            match member {
                Member::Module(m) if segments.peek().is_some() => module = m,
                Member::Type(key) if segments.peek().is_none() => {
                    return self
                        .entry(*key)
                        .cloned()
                        .ok_or_else(|| Error::Lookup(format!("could not find type {name}")));
                }
                _ => break,
            }
        }

        Err(Error::Lookup(format!("{name} does not name a type")))
    }

    /// Visit every registered type with its plain dotted name (markers
    /// stripped from each segment), walking modules recursively.
    pub fn walk(&self, visit: &mut dyn FnMut(&str, &Arc<TypeEntry>)) {
        self.walk_module(&self.root, None, visit);
    }

    fn walk_module(
        &self,
        module: &Module,
        prefix: Option<&str>,
        visit: &mut dyn FnMut(&str, &Arc<TypeEntry>),
    ) {
        for (segment, member) in &module.members {
            let plain = keywords::unmangle(segment);
            let name = match prefix {
                Some(prefix) => format!("{prefix}.{plain}"),
                None => plain.to_string(),
            };
            match member {
                Member::Module(m) => self.walk_module(m, Some(&name), visit),
                Member::Type(key) => {
                    if let Some(entry) = self.entry(*key) {
                        visit(&name, entry);
                    }
                }
            }
        }
    }
}

// A name must stay distinct once the marker is stripped, or the plain form
// could not tell the two apart.
fn check_spelling(module: &Module, segment: &str, path: &str) -> Result<()> {
    let plain = keywords::unmangle(segment);
    match module
        .members
        .keys()
        .find(|k| k.as_str() != segment && keywords::unmangle(k) == plain)
    {
        Some(other) => Err(Error::Definition(format!(
            "{segment} in {path} clashes with {other}"
        ))),
        None => Ok(()),
    }
}

/// First plain name shared by two of `names`.
fn plain_clash<'a>(names: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.map(keywords::unmangle).find(|name| !seen.insert(*name))
}
