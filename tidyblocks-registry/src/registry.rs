//! Variant Registry

use crate::{DecodeContext, Payload, VariantMeta};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tidyblocks_core::{json_type_name, Family, MalformedEncoding};

/// Constructor invoked with validated arguments
pub type Builder<T> =
    Arc<dyn Fn(&Payload<'_>, &mut DecodeContext) -> Result<T, MalformedEncoding> + Send + Sync>;

/// Error raised while populating a registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{family} variant '{name}' is already registered under '{kind}'")]
    Duplicate {
        family: Family,
        kind: &'static str,
        name: &'static str,
    },

    #[error("'{kind}' is not a {family} discriminator")]
    UnknownKind { family: Family, kind: &'static str },
}

/// Registered variant: metadata plus constructor
pub struct VariantDef<T> {
    meta: VariantMeta,
    build: Builder<T>,
}

impl<T> VariantDef<T> {
    pub fn new<F>(meta: VariantMeta, build: F) -> Self
    where
        F: Fn(&Payload<'_>, &mut DecodeContext) -> Result<T, MalformedEncoding> + Send + Sync + 'static,
    {
        Self { meta, build: Arc::new(build) }
    }

    pub fn meta(&self) -> &VariantMeta {
        &self.meta
    }
}

/// Flat table from (discriminator, variant name) to constructor
///
/// Populated once, then only read. Decoding is the single validation
/// checkpoint for a family: discriminator, variant name and argument count
/// are checked here before the constructor sees the arguments.
pub struct VariantRegistry<T> {
    family: Family,
    kinds: Vec<&'static str>,
    /// Variants keyed by discriminator, then by name
    variants: HashMap<&'static str, HashMap<&'static str, VariantDef<T>>>,
}

impl<T> VariantRegistry<T> {
    /// Empty registry accepting the given discriminators
    pub fn new(family: Family, kinds: &[&'static str]) -> Self {
        Self {
            family,
            kinds: kinds.to_vec(),
            variants: HashMap::new(),
        }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// Known discriminators, in declaration order
    pub fn kinds(&self) -> &[&'static str] {
        &self.kinds
    }

    pub fn register(&mut self, def: VariantDef<T>) -> Result<(), RegistryError> {
        let VariantMeta { kind, name, .. } = def.meta;
        let Some(&kind) = self.kinds.iter().find(|k| **k == kind) else {
            return Err(RegistryError::UnknownKind { family: self.family, kind });
        };
        let by_name = self.variants.entry(kind).or_default();
        if by_name.contains_key(name) {
            return Err(RegistryError::Duplicate { family: self.family, kind, name });
        }
        by_name.insert(name, def);
        Ok(())
    }

    pub fn with_variant(mut self, def: VariantDef<T>) -> Result<Self, RegistryError> {
        self.register(def)?;
        Ok(self)
    }

    pub fn get(&self, kind: &str, name: &str) -> Option<&VariantDef<T>> {
        self.variants.get(kind)?.get(name)
    }

    pub fn contains(&self, kind: &str, name: &str) -> bool {
        self.get(kind, name).is_some()
    }

    pub fn len(&self) -> usize {
        self.variants.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered variants ordered by discriminator, then name
    pub fn variants(&self) -> Vec<&VariantMeta> {
        let mut metas: Vec<&VariantMeta> = self
            .variants
            .values()
            .flat_map(|by_name| by_name.values().map(|d| &d.meta))
            .collect();
        metas.sort_by_key(|m| (self.kind_index(m.kind), m.name));
        metas
    }

    fn kind_index(&self, kind: &str) -> usize {
        self.kinds.iter().position(|k| *k == kind).unwrap_or(usize::MAX)
    }

    // ========== Decoding ==========

    /// Decode `[kind, name, ...args]` at the context's current position
    pub fn decode(&self, encoded: &Value, ctx: &mut DecodeContext) -> Result<T, MalformedEncoding> {
        ctx.check_depth(self.family)?;
        let here = ctx.pointer();

        let items = match encoded {
            Value::Array(items) => items,
            other => {
                return Err(self.reject(
                    MalformedEncoding::not_an_array(self.family, json_type_name(other)).with_path(here),
                ))
            }
        };

        let kind = match items.first() {
            Some(Value::String(kind)) => kind.as_str(),
            Some(other) => {
                return Err(self.reject(
                    MalformedEncoding::unknown_kind(self.family, &other.to_string(), &self.kinds)
                        .with_path(here),
                ))
            }
            None => return Err(self.reject(MalformedEncoding::missing_kind(self.family).with_path(here))),
        };
        if !self.kinds.iter().any(|k| *k == kind) {
            return Err(self.reject(
                MalformedEncoding::unknown_kind(self.family, kind, &self.kinds).with_path(here),
            ));
        }

        let name = match items.get(1) {
            Some(Value::String(name)) => name.as_str(),
            _ => {
                return Err(self.reject(MalformedEncoding::missing_name(self.family, kind).with_path(here)))
            }
        };
        let Some(def) = self.get(kind, name) else {
            let mut err = MalformedEncoding::unknown_variant(self.family, kind, name).with_path(here);
            let similar = self.find_similar(kind, name);
            if !similar.is_empty() {
                err = err.with_suggestion(format!("Similar: {}", similar.join(", ")));
            }
            return Err(self.reject(err));
        };

        let args = &items[2..];
        if !def.meta.accepts(args.len()) {
            return Err(self.reject(
                MalformedEncoding::arg_count(self.family, &def.meta.arity_label(), args.len())
                    .with_kind(kind)
                    .with_name(name)
                    .with_path(here),
            ));
        }

        let payload = Payload::new(self.family, &def.meta, args, 2, here);
        let node = (def.build)(&payload, ctx)?;
        tracing::trace!(family = %self.family, kind, name, "decoded variant");
        Ok(node)
    }

    fn reject(&self, err: MalformedEncoding) -> MalformedEncoding {
        tracing::debug!(family = %self.family, code = %err.code, path = %err.path, "rejected encoding");
        err
    }

    /// Names under `kind` similar to `name` (for error suggestions)
    fn find_similar(&self, kind: &str, name: &str) -> Vec<&'static str> {
        let query = name.to_lowercase();
        let Some(by_name) = self.variants.get(kind) else {
            return Vec::new();
        };
        let mut matches: Vec<(&'static str, usize)> = by_name
            .keys()
            .filter_map(|candidate| {
                let score = Self::similarity_score(&query, &candidate.to_lowercase());
                if score > 0 {
                    Some((*candidate, score))
                } else {
                    None
                }
            })
            .collect();

        // Higher score first, then alphabetical for stable messages
        matches.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        matches.into_iter().take(3).map(|(name, _)| name).collect()
    }

    fn similarity_score(query: &str, candidate: &str) -> usize {
        let mut score = 0;

        if candidate.starts_with(query) {
            score += 100;
        } else if candidate.contains(query) {
            score += 50;
        } else if query.contains(candidate) {
            score += 30;
        }

        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();
        // Require real overlap before suggesting anything
        if score == 0 && common * 2 < query_chars.len().max(candidate_chars.len()) {
            return 0;
        }
        score += common * 2;

        let len_diff = query.len().abs_diff(candidate.len());
        if len_diff < 5 {
            score += 5 - len_diff;
        }

        score
    }

    // ========== Catalog ==========

    /// Registered discriminators and variants as JSON, for editors
    pub fn catalog(&self) -> Value {
        let variants = self.variants();
        let kinds: Vec<Value> = self
            .kinds
            .iter()
            .map(|kind| {
                let entries: Vec<Value> = variants
                    .iter()
                    .filter(|m| m.kind == *kind)
                    .map(|m| {
                        json!({
                            "name": m.name,
                            "description": m.description,
                            "args": m.args.iter().map(|a| json!({
                                "name": a.name,
                                "type": a.kind.describe(),
                                "optional": a.optional,
                            })).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                json!({ "kind": kind, "variants": entries })
            })
            .collect();
        json!({ "family": self.family, "kinds": kinds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArgKind, ArgMeta, Node};
    use serde_json::json;
    use tidyblocks_core::{codes, Literal};

    /// Minimal family used to exercise the dispatcher
    #[derive(Debug, Clone, PartialEq)]
    enum Toy {
        Leaf(Literal),
        Pair(Box<Toy>, Box<Toy>),
        Tags(Vec<String>, Option<bool>),
    }

    const LEAF: &str = "@leaf";
    const BRANCH: &str = "@branch";

    static LEAF_ARGS: [ArgMeta; 1] = [ArgMeta::required("value", ArgKind::Literal)];
    static PAIR_ARGS: [ArgMeta; 2] = [
        ArgMeta::required("left", ArgKind::Node(Family::Expression)),
        ArgMeta::required("right", ArgKind::Node(Family::Expression)),
    ];
    static TAGS_ARGS: [ArgMeta; 2] = [
        ArgMeta::required("tags", ArgKind::TextList),
        ArgMeta::optional("flag", ArgKind::Bool),
    ];

    fn toy_registry() -> VariantRegistry<Toy> {
        VariantRegistry::new(Family::Expression, &[LEAF, BRANCH])
            .with_variant(VariantDef::new(
                VariantMeta { kind: LEAF, name: "leaf", description: "Literal leaf", args: &LEAF_ARGS },
                |p, _| Ok(Toy::Leaf(p.literal(0)?)),
            ))
            .and_then(|r| {
                r.with_variant(VariantDef::new(
                    VariantMeta { kind: BRANCH, name: "pair", description: "Two children", args: &PAIR_ARGS },
                    |p, ctx| Ok(Toy::Pair(Box::new(p.node(0, ctx)?), Box::new(p.node(1, ctx)?))),
                ))
            })
            .and_then(|r| {
                r.with_variant(VariantDef::new(
                    VariantMeta { kind: LEAF, name: "tags", description: "Tag list", args: &TAGS_ARGS },
                    |p, _| Ok(Toy::Tags(p.text_list(0)?, p.optional_bool(1)?)),
                ))
            })
            .unwrap()
    }

    impl Node for Toy {
        const FAMILY: Family = Family::Expression;

        fn encode(&self) -> Value {
            match self {
                Toy::Leaf(l) => json!([LEAF, "leaf", l.to_json()]),
                Toy::Pair(a, b) => json!([BRANCH, "pair", a.encode(), b.encode()]),
                Toy::Tags(t, Some(f)) => json!([LEAF, "tags", t, f]),
                Toy::Tags(t, None) => json!([LEAF, "tags", t]),
            }
        }

        fn decode_with(encoded: &Value, ctx: &mut DecodeContext) -> Result<Self, MalformedEncoding> {
            thread_local! {
                static REGISTRY: VariantRegistry<Toy> = toy_registry();
            }
            REGISTRY.with(|r| r.decode(encoded, ctx))
        }
    }

    mod registration_tests {
        use super::*;

        #[test]
        fn test_rejects_duplicates() {
            let registry = toy_registry();
            let err = registry
                .with_variant(VariantDef::new(
                    VariantMeta { kind: LEAF, name: "leaf", description: "", args: &LEAF_ARGS },
                    |p, _| Ok(Toy::Leaf(p.literal(0)?)),
                ))
                .err()
                .unwrap();
            assert_eq!(err, RegistryError::Duplicate { family: Family::Expression, kind: LEAF, name: "leaf" });
        }

        #[test]
        fn test_rejects_undeclared_kind() {
            let mut registry = toy_registry();
            let err = registry
                .register(VariantDef::new(
                    VariantMeta { kind: "@other", name: "leaf", description: "", args: &LEAF_ARGS },
                    |p, _| Ok(Toy::Leaf(p.literal(0)?)),
                ))
                .unwrap_err();
            assert!(matches!(err, RegistryError::UnknownKind { kind: "@other", .. }));
        }

        #[test]
        fn test_introspection() {
            let registry = toy_registry();
            assert_eq!(registry.len(), 3);
            assert!(registry.contains(LEAF, "leaf"));
            assert!(!registry.contains(BRANCH, "leaf"));
            let names: Vec<&str> = registry.variants().iter().map(|m| m.name).collect();
            assert_eq!(names, vec!["leaf", "tags", "pair"]);
        }

        #[test]
        fn test_catalog() {
            let catalog = toy_registry().catalog();
            assert_eq!(catalog["family"], json!("expression"));
            assert_eq!(catalog["kinds"][1]["kind"], json!(BRANCH));
            assert_eq!(catalog["kinds"][1]["variants"][0]["args"][0]["type"], json!("expression"));
            assert_eq!(catalog["kinds"][0]["variants"][1]["args"][1]["optional"], json!(true));
        }
    }

    mod decode_tests {
        use super::*;

        #[test]
        fn test_round_trip() {
            let fixture = json!([BRANCH, "pair", [LEAF, "leaf", 1], [LEAF, "tags", ["a", "b"], true]]);
            let toy = Toy::decode(&fixture).unwrap();
            assert_eq!(toy.encode(), fixture);
        }

        #[test]
        fn test_optional_argument_absent() {
            let toy = Toy::decode(&json!([LEAF, "tags", ["a"]])).unwrap();
            assert_eq!(toy, Toy::Tags(vec!["a".to_string()], None));
        }

        #[test]
        fn test_not_an_array() {
            let err = Toy::decode(&json!(55)).unwrap_err();
            assert_eq!(err.code, codes::NOT_AN_ARRAY);
            let err = Toy::decode(&json!("something")).unwrap_err();
            assert_eq!(err.code, codes::NOT_AN_ARRAY);
        }

        #[test]
        fn test_missing_kind() {
            assert_eq!(Toy::decode(&json!([])).unwrap_err().code, codes::MISSING_KIND);
        }

        #[test]
        fn test_unknown_kind() {
            let err = Toy::decode(&json!(["@whoops", "whoops"])).unwrap_err();
            assert_eq!(err.code, codes::UNKNOWN_KIND);
            assert_eq!(err.kind.as_deref(), Some("@whoops"));
            let err = Toy::decode(&json!(["left", "right"])).unwrap_err();
            assert_eq!(err.code, codes::UNKNOWN_KIND);
            let err = Toy::decode(&json!([7, "leaf"])).unwrap_err();
            assert_eq!(err.code, codes::UNKNOWN_KIND);
        }

        #[test]
        fn test_missing_name() {
            let err = Toy::decode(&json!([LEAF])).unwrap_err();
            assert_eq!(err.code, codes::MISSING_NAME);
            let err = Toy::decode(&json!([LEAF, 3])).unwrap_err();
            assert_eq!(err.code, codes::MISSING_NAME);
        }

        #[test]
        fn test_unknown_variant_under_kind() {
            // Registered, but under a different discriminator
            let err = Toy::decode(&json!([BRANCH, "leaf", 1])).unwrap_err();
            assert_eq!(err.code, codes::UNKNOWN_VARIANT);
            assert_eq!(err.name.as_deref(), Some("leaf"));
        }

        #[test]
        fn test_unknown_variant_suggests() {
            let err = Toy::decode(&json!([LEAF, "lea", 1])).unwrap_err();
            assert!(err.suggestion.unwrap().contains("leaf"));
        }

        #[test]
        fn test_arg_count() {
            let err = Toy::decode(&json!([BRANCH, "pair", [LEAF, "leaf", 1]])).unwrap_err();
            assert_eq!(err.code, codes::ARG_COUNT);
            let err = Toy::decode(&json!([LEAF, "tags", ["a"], true, false])).unwrap_err();
            assert_eq!(err.code, codes::ARG_COUNT);
            assert!(err.message.contains("1 to 2"), "{}", err.message);
        }

        #[test]
        fn test_arg_type_path() {
            let err = Toy::decode(&json!([LEAF, "tags", ["a", 2]])).unwrap_err();
            assert_eq!(err.code, codes::ARG_TYPE);
            assert_eq!(err.path, "/2/1");
        }

        #[test]
        fn test_nested_error_path() {
            let fixture = json!([BRANCH, "pair", [LEAF, "leaf", 1], [BRANCH, "pair", [LEAF, "leaf", 1], ["@whoops"]]]);
            let err = Toy::decode(&fixture).unwrap_err();
            assert_eq!(err.code, codes::UNKNOWN_KIND);
            assert_eq!(err.path, "/3/3");
        }

        #[test]
        fn test_bad_literal() {
            let err = Toy::decode(&json!([LEAF, "leaf", null])).unwrap_err();
            assert_eq!(err.code, codes::BAD_LITERAL);
            assert_eq!(err.path, "/2");
        }

        #[test]
        fn test_depth_limit() {
            let mut fixture = json!([LEAF, "leaf", 0]);
            for _ in 0..5 {
                fixture = json!([BRANCH, "pair", fixture, [LEAF, "leaf", 0]]);
            }
            let mut ctx = DecodeContext::new().with_max_depth(3);
            let err = Toy::decode_with(&fixture, &mut ctx).unwrap_err();
            assert_eq!(err.code, codes::DEPTH_LIMIT);
            assert_eq!(ctx.depth(), 0);
            assert!(Toy::decode(&fixture).is_ok());
        }

        #[test]
        fn test_from_json_str() {
            let toy = Toy::from_json_str(r#"["@leaf", "leaf", "orange"]"#).unwrap();
            assert_eq!(toy, Toy::Leaf(Literal::from("orange")));
            assert_eq!(Toy::from_json_str("[").unwrap_err().code, codes::INVALID_JSON);
        }
    }
}
