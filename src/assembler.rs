use crate::meta::{DocumentMeta, Info, TagInfo};
use crate::models::{FieldType, Model};
use crate::routes::{Param, ParamType, Response, Route, SchemaRef};
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const JSON_MEDIA_TYPE: &str = "application/json";
const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Records extracted from one source file.
///
/// Values are immutable once extracted; the assembler merges them in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileRecords {
    pub source_file: PathBuf,
    pub routes: Vec<Route>,
    pub models: Vec<Model>,
}

/// Complete Swagger 2.0 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerDocument {
    pub swagger: String,
    pub info: Info,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_path: String,
    #[serde(default)]
    pub tags: Vec<TagInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    /// path -> lowercase verb -> operation
    pub paths: IndexMap<String, IndexMap<String, Operation>>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub security_definitions: IndexMap<String, serde_json::Value>,
    pub definitions: IndexMap<String, Definition>,
}

/// Swagger Operation object - one verb on one path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub operation_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Status code -> response
    pub responses: IndexMap<String, ResponseObject>,
}

/// Swagger Parameter object
///
/// Carries either a primitive `type` (with `required`) or a `schema` reference to a
/// definition (without `required`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Swagger Response object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseObject {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Schema fragment: a primitive/array `type`, or a `$ref` to a definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

/// Schema definition of one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(rename = "type")]
    pub definition_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: IndexMap<String, Schema>,
}

impl Schema {
    fn typed(name: &str) -> Self {
        Self {
            schema_type: Some(name.to_string()),
            ..Self::default()
        }
    }

    fn reference_to(model: &str) -> Self {
        Self {
            reference: Some(format!("{}{}", DEFINITIONS_PREFIX, model)),
            ..Self::default()
        }
    }

    fn array_of(items: Schema) -> Self {
        Self {
            schema_type: Some("array".to_string()),
            reference: None,
            items: Some(Box::new(items)),
        }
    }

    fn for_field(field_type: &FieldType) -> Self {
        match field_type {
            FieldType::Array(name) => Self::array_of(Self::reference_to(name)),
            FieldType::Object(name) => Self::reference_to(name),
            primitive => Self::typed(primitive.type_name().unwrap_or("object")),
        }
    }

    fn for_response(schema_ref: &SchemaRef) -> Self {
        let reference = Self::reference_to(&schema_ref.name);
        if schema_ref.is_array {
            Self::array_of(reference)
        } else {
            reference
        }
    }
}

/// Merges per-file records into a [`SwaggerDocument`].
///
/// Merge policy:
/// - models are keyed by name and routes by `(path, lowercase verb)`; a later record
///   replaces an earlier one outright, so callers must pass files in a deterministic order
/// - definitions are built before paths, because a param whose type names a known model
///   is emitted as a `$ref` schema instead of a primitive `type`
pub struct DocumentAssembler {
    meta: DocumentMeta,
}

impl DocumentAssembler {
    pub fn new(meta: DocumentMeta) -> Self {
        Self { meta }
    }

    /// Assembles the document. The input is not modified.
    pub fn assemble(&self, files: &[FileRecords]) -> SwaggerDocument {
        let definitions = self.build_definitions(files);
        let paths = self.build_paths(files, &definitions);
        let tags = self.build_tags(files);

        debug!(
            "Assembled document with {} paths and {} definitions",
            paths.len(),
            definitions.len()
        );

        SwaggerDocument {
            swagger: self.meta.swagger.clone(),
            info: self.meta.info.clone(),
            host: self.meta.host.clone(),
            base_path: self.meta.base_path.clone(),
            tags,
            schemes: self.meta.schemes.clone(),
            paths,
            security_definitions: self.meta.security_definitions.clone(),
            definitions,
        }
    }

    fn build_definitions(&self, files: &[FileRecords]) -> IndexMap<String, Definition> {
        let mut models: IndexMap<&str, &Model> = IndexMap::new();
        for model in files.iter().flat_map(|f| f.models.iter()) {
            if let Some(previous) = models.insert(model.name.as_str(), model) {
                warn!(
                    "Model {} from {}:{} replaces the definition from {}:{}",
                    model.name,
                    model.source_file.display(),
                    model.line_number + 1,
                    previous.source_file.display(),
                    previous.line_number + 1
                );
            }
        }

        models
            .into_iter()
            .map(|(name, model)| {
                let properties = model
                    .fields
                    .iter()
                    .map(|field| (field.name.clone(), Schema::for_field(&field.field_type)))
                    .collect();
                let definition = Definition {
                    definition_type: "object".to_string(),
                    description: model.description.clone(),
                    properties,
                };
                (name.to_string(), definition)
            })
            .collect()
    }

    fn build_paths(
        &self,
        files: &[FileRecords],
        definitions: &IndexMap<String, Definition>,
    ) -> IndexMap<String, IndexMap<String, Operation>> {
        let mut paths: IndexMap<String, IndexMap<String, Operation>> = IndexMap::new();

        for route in files.iter().flat_map(|f| f.routes.iter()) {
            let path = Self::convert_path_format(&route.path);
            let verb = route.verb.to_lowercase();
            let operation = Self::build_operation(route, definitions);

            let verbs = paths.entry(path).or_default();
            if let Some(previous) = verbs.insert(verb, operation) {
                warn!(
                    "{} {} from {}:{} replaces operation {}",
                    route.verb,
                    route.path,
                    route.source_file.display(),
                    route.line_number + 1,
                    previous.operation_id
                );
            }
        }

        paths
    }

    fn build_operation(route: &Route, definitions: &IndexMap<String, Definition>) -> Operation {
        let parameters = route
            .params
            .iter()
            .map(|param| Self::build_parameter(param, route, definitions))
            .collect();

        let mut responses = IndexMap::new();
        for response in &route.responses {
            responses.insert(
                response.status_code.to_string(),
                Self::build_response(response, route, definitions),
            );
        }

        Operation {
            description: route.description.clone(),
            operation_id: route.operation_id.clone(),
            tags: route.tags.clone(),
            consumes: vec![JSON_MEDIA_TYPE.to_string()],
            produces: vec![JSON_MEDIA_TYPE.to_string()],
            parameters,
            responses,
        }
    }

    fn build_parameter(
        param: &Param,
        route: &Route,
        definitions: &IndexMap<String, Definition>,
    ) -> Parameter {
        let mut parameter = Parameter {
            name: param.name.clone(),
            location: param.location.as_openapi().to_string(),
            description: param.description.clone(),
            required: Some(param.required),
            param_type: Some(param.param_type.name().to_string()),
            schema: None,
        };

        if let ParamType::Reference(name) = &param.param_type {
            if definitions.contains_key(name) {
                parameter.required = None;
                parameter.param_type = None;
                parameter.schema = Some(Schema::reference_to(name));
            } else {
                warn!(
                    "{}:{}: param {} of {} has unknown type {}",
                    route.source_file.display(),
                    route.line_number + 1,
                    param.name,
                    route.operation_id,
                    name
                );
            }
        }

        parameter
    }

    fn build_response(
        response: &Response,
        route: &Route,
        definitions: &IndexMap<String, Definition>,
    ) -> ResponseObject {
        if let Some(schema_ref) = &response.schema_ref {
            if !definitions.contains_key(&schema_ref.name) {
                warn!(
                    "{}:{}: response {} of {} references unknown model {}",
                    route.source_file.display(),
                    route.line_number + 1,
                    response.status_code,
                    route.operation_id,
                    schema_ref.name
                );
            }
        }

        ResponseObject {
            description: response.description.clone(),
            schema: response.schema_ref.as_ref().map(Schema::for_response),
        }
    }

    /// Declared metadata tags followed by route tags not already declared, in first-seen order.
    fn build_tags(&self, files: &[FileRecords]) -> Vec<TagInfo> {
        let mut tags = self.meta.tags.clone();
        for name in files
            .iter()
            .flat_map(|f| f.routes.iter())
            .flat_map(|r| r.tags.iter())
        {
            if !tags.iter().any(|t| &t.name == name) {
                tags.push(TagInfo {
                    name: name.clone(),
                    description: String::new(),
                    external_docs: None,
                });
            }
        }
        tags
    }

    /// Convert `:param` path segments to the `{param}` form
    fn convert_path_format(path: &str) -> String {
        path.split('/')
            .map(|part| match part.strip_prefix(':') {
                Some(name) => format!("{{{}}}", name),
                None => part.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}
