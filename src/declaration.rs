//! Generator Declarations
//!
//! The declared shape of every generator kind. A top-level declaration selects
//! exactly one kind; a nested declaration (inside a matrix) may also carry a
//! name and can never be another matrix.

use crate::error::SetupError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Generator kinds known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeneratorKind {
    List,
    GitRepository,
    #[serde(rename = "OCIRepository")]
    OciRepository,
    PullRequests,
    Cluster,
    ImagePolicy,
    #[serde(rename = "APIClient")]
    ApiClient,
    Config,
    Matrix,
}

impl GeneratorKind {
    /// Every kind, in declaration order.
    pub const ALL: [GeneratorKind; 9] = [
        GeneratorKind::List,
        GeneratorKind::GitRepository,
        GeneratorKind::OciRepository,
        GeneratorKind::PullRequests,
        GeneratorKind::Cluster,
        GeneratorKind::ImagePolicy,
        GeneratorKind::ApiClient,
        GeneratorKind::Config,
        GeneratorKind::Matrix,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::List => "List",
            GeneratorKind::GitRepository => "GitRepository",
            GeneratorKind::OciRepository => "OCIRepository",
            GeneratorKind::PullRequests => "PullRequests",
            GeneratorKind::Cluster => "Cluster",
            GeneratorKind::ImagePolicy => "ImagePolicy",
            GeneratorKind::ApiClient => "APIClient",
            GeneratorKind::Config => "Config",
            GeneratorKind::Matrix => "Matrix",
        }
    }
}

impl std::fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GeneratorKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SetupError::UnknownGenerator(wanted.to_string()))
    }
}

/// Reference to another object in the owner's namespace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Static list of elements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListSpec {
    #[serde(default)]
    pub elements: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryFileItem {
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDirectoryItem {
    pub path: String,
    #[serde(default)]
    pub exclude: bool,
}

/// Files or directories listed from a fetched source artifact.
///
/// Shared by the git and OCI repository kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySpec {
    pub repository_ref: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<RepositoryFileItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directories: Vec<RepositoryDirectoryItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestSpec {
    pub driver: String,
    #[serde(default, rename = "serverURL", skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    pub repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<ObjectRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default)]
    pub forks: bool,
    /// Re-poll interval, e.g. `5m`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSpec {
    #[serde(default)]
    pub selector: LabelSelector,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePolicySpec {
    pub policy_ref: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiClientSpec {
    /// Re-poll interval, e.g. `5m`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    pub endpoint: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers_ref: Option<ObjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default)]
    pub single_element: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<ObjectRef>,
}

fn default_method() -> String {
    "GET".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSourceKind {
    #[default]
    ConfigMap,
    Secret,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSpec {
    pub kind: ConfigSourceKind,
    pub name: String,
}

/// Composite declaration combining two or more nested generators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixSpec {
    #[serde(default)]
    pub generators: Vec<NestedGeneratorDeclaration>,
    /// Pack every sub-result into one element instead of a cross product
    #[serde(default)]
    pub single_element: bool,
}

/// A top-level generator declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeneratorDeclaration {
    List(ListSpec),
    GitRepository(RepositorySpec),
    OciRepository(RepositorySpec),
    PullRequests(PullRequestSpec),
    Cluster(ClusterSpec),
    ImagePolicy(ImagePolicySpec),
    ApiClient(ApiClientSpec),
    Config(ConfigSpec),
    Matrix(MatrixSpec),
}

impl GeneratorDeclaration {
    pub fn kind(&self) -> GeneratorKind {
        match self {
            GeneratorDeclaration::List(_) => GeneratorKind::List,
            GeneratorDeclaration::GitRepository(_) => GeneratorKind::GitRepository,
            GeneratorDeclaration::OciRepository(_) => GeneratorKind::OciRepository,
            GeneratorDeclaration::PullRequests(_) => GeneratorKind::PullRequests,
            GeneratorDeclaration::Cluster(_) => GeneratorKind::Cluster,
            GeneratorDeclaration::ImagePolicy(_) => GeneratorKind::ImagePolicy,
            GeneratorDeclaration::ApiClient(_) => GeneratorKind::ApiClient,
            GeneratorDeclaration::Config(_) => GeneratorKind::Config,
            GeneratorDeclaration::Matrix(_) => GeneratorKind::Matrix,
        }
    }
}

/// Generator variants allowed inside a matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NestedGenerator {
    List(ListSpec),
    GitRepository(RepositorySpec),
    OciRepository(RepositorySpec),
    PullRequests(PullRequestSpec),
    Cluster(ClusterSpec),
    ImagePolicy(ImagePolicySpec),
    ApiClient(ApiClientSpec),
    Config(ConfigSpec),
}

impl NestedGenerator {
    pub fn kind(&self) -> GeneratorKind {
        match self {
            NestedGenerator::List(_) => GeneratorKind::List,
            NestedGenerator::GitRepository(_) => GeneratorKind::GitRepository,
            NestedGenerator::OciRepository(_) => GeneratorKind::OciRepository,
            NestedGenerator::PullRequests(_) => GeneratorKind::PullRequests,
            NestedGenerator::Cluster(_) => GeneratorKind::Cluster,
            NestedGenerator::ImagePolicy(_) => GeneratorKind::ImagePolicy,
            NestedGenerator::ApiClient(_) => GeneratorKind::ApiClient,
            NestedGenerator::Config(_) => GeneratorKind::Config,
        }
    }
}

impl From<NestedGenerator> for GeneratorDeclaration {
    fn from(nested: NestedGenerator) -> Self {
        match nested {
            NestedGenerator::List(spec) => GeneratorDeclaration::List(spec),
            NestedGenerator::GitRepository(spec) => GeneratorDeclaration::GitRepository(spec),
            NestedGenerator::OciRepository(spec) => GeneratorDeclaration::OciRepository(spec),
            NestedGenerator::PullRequests(spec) => GeneratorDeclaration::PullRequests(spec),
            NestedGenerator::Cluster(spec) => GeneratorDeclaration::Cluster(spec),
            NestedGenerator::ImagePolicy(spec) => GeneratorDeclaration::ImagePolicy(spec),
            NestedGenerator::ApiClient(spec) => GeneratorDeclaration::ApiClient(spec),
            NestedGenerator::Config(spec) => GeneratorDeclaration::Config(spec),
        }
    }
}

/// A generator declared inside a matrix
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NestedGeneratorDeclaration {
    /// Key each generated element is nested under when combining
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub generator: Option<NestedGenerator>,
}

impl NestedGeneratorDeclaration {
    pub fn new(generator: NestedGenerator) -> Self {
        Self {
            name: None,
            generator: Some(generator),
        }
    }

    pub fn named(name: impl Into<String>, generator: NestedGenerator) -> Self {
        Self {
            name: Some(name.into()),
            generator: Some(generator),
        }
    }

    pub fn kind(&self) -> Option<GeneratorKind> {
        self.generator.as_ref().map(NestedGenerator::kind)
    }

    /// Convert into the top-level shape a generator's `generate` accepts.
    pub fn to_declaration(&self) -> Option<GeneratorDeclaration> {
        self.generator.clone().map(GeneratorDeclaration::from)
    }
}

// Hand-written so that a bad payload, an unknown kind or a second kind is an
// error rather than an entry with no generator.
impl<'de> Deserialize<'de> for NestedGeneratorDeclaration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;

        let name = match fields.remove("name") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name),
            Some(other) => {
                return Err(de::Error::custom(format!(
                    "nested generator name must be a string, got {}",
                    other
                )))
            }
        };

        if fields.len() > 1 {
            let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
            return Err(de::Error::custom(format!(
                "nested generator must declare exactly one kind, got: {}",
                keys.join(", ")
            )));
        }

        let generator = if fields.is_empty() {
            None
        } else {
            let generator = serde_json::from_value::<NestedGenerator>(Value::Object(fields))
                .map_err(de::Error::custom)?;
            Some(generator)
        };

        Ok(Self { name, generator })
    }
}
