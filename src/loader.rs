//! Loading a YAML config file into an [`AppConfig`].
//!
//! Parsing sits behind [`ConfigParser`]; the loader only resolves the path and
//! reads the bytes. No schema is checked here.

use crate::error::{ConfigLoadError, ConfigOrigin, LoadErrorKind};
use crate::paths::PathResolver;
use serde_yaml::Value;
use std::path::Path;

/// Parsed configuration with dotted-path lookups such as `wtf.grid.columns.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    root: Value,
}

impl AppConfig {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Look up a dotted path. Numeric segments index into sequences.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.root);
        }
        path.split('.').try_fold(&self.root, |node, segment| match node {
            Value::Mapping(map) => map.get(segment),
            Value::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// String keys of the root mapping, in file order.
    pub fn top_level_keys(&self) -> Vec<String> {
        match &self.root {
            Value::Mapping(map) => map
                .keys()
                .filter_map(|k| k.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Turns file bytes into a configuration.
pub trait ConfigParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<AppConfig, serde_yaml::Error>;
}

pub struct YamlParser;

impl ConfigParser for YamlParser {
    fn parse(&self, bytes: &[u8]) -> Result<AppConfig, serde_yaml::Error> {
        let root: Value = serde_yaml::from_slice(bytes)?;
        let root = match root {
            Value::Null => Value::Mapping(Default::default()),
            other => other,
        };
        Ok(AppConfig::new(root))
    }
}

pub struct ConfigLoader<P: ConfigParser = YamlParser> {
    resolver: PathResolver,
    parser: P,
}

impl ConfigLoader<YamlParser> {
    pub fn new(resolver: PathResolver) -> Self {
        Self::with_parser(resolver, YamlParser)
    }
}

impl<P: ConfigParser> ConfigLoader<P> {
    pub fn with_parser(resolver: PathResolver, parser: P) -> Self {
        Self { resolver, parser }
    }

    /// Resolve `path`, read it, and parse it.
    pub fn load(&self, path: &str, origin: ConfigOrigin) -> Result<AppConfig, ConfigLoadError> {
        let resolved = self.resolver.resolve(path).map_err(|e| ConfigLoadError {
            origin,
            requested: path.to_string(),
            kind: LoadErrorKind::Path(e),
        })?;
        self.read_and_parse(path.to_string(), &resolved, origin)
    }

    /// Load an already resolved path. No home expansion is applied.
    pub fn load_path(&self, path: &Path, origin: ConfigOrigin) -> Result<AppConfig, ConfigLoadError> {
        self.read_and_parse(path.display().to_string(), path, origin)
    }

    fn read_and_parse(
        &self,
        requested: String,
        resolved: &Path,
        origin: ConfigOrigin,
    ) -> Result<AppConfig, ConfigLoadError> {
        let fail = |kind: LoadErrorKind| ConfigLoadError {
            origin,
            requested: requested.clone(),
            kind,
        };

        let bytes = std::fs::read(resolved).map_err(|source| {
            fail(LoadErrorKind::Read {
                path: resolved.to_path_buf(),
                source,
            })
        })?;
        let config = self.parser.parse(&bytes).map_err(|source| {
            fail(LoadErrorKind::Parse {
                path: resolved.to_path_buf(),
                source,
            })
        })?;

        tracing::debug!(path = %resolved.display(), ?origin, "Loaded config file");
        Ok(config)
    }
}
