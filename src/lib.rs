//! Swagger from comments - Swagger 2.0 documents from annotated source comments.
//!
//! Source files are scanned for single-line comment blocks carrying `@route`, `@model`,
//! `@param`, `@return`, `@tag` and `@description` directives. Each block becomes a route
//! or model record, and the records from all files are merged into one document.
//!
//! ```text
//! // GetTask fetches one task
//! // @route GetTask GET /tasks/{task_id}
//! // @param task_id int in:path The task id
//! // @return 200 Task The task
//! // @tag tasks
//! func GetTask(w http.ResponseWriter, r *http.Request) {}
//!
//! // @model Task
//! type Task struct {
//!     ID    int64
//!     Title string
//! }
//! ```
//!
//! # Architecture
//!
//! Data flows strictly forward through these modules:
//!
//! 1. [`scanner`] - Finds source files under the root, in sorted order
//! 2. [`source`] - Reads each file into lines
//! 3. [`symbols`] - Finds the lines carrying a marker such as `@route`
//! 4. [`comment_block`] - Expands a marker line to its surrounding comment block
//! 5. [`tags`] - Splits a block into a table of directives
//! 6. [`routes`] / [`models`] - Turn a directive table into a route or model record
//! 7. [`assembler`] - Merges records from every file into the document
//! 8. [`serializer`] - Serializes the document to JSON or YAML
//!
//! [`generator`] drives stages 1-7 and [`meta`] supplies the parts of the document that do
//! not come from annotations.
//!
//! # Example Usage
//!
//! ```no_run
//! use swagger_from_comments::{
//!     generator::{build_document, GeneratorConfig},
//!     serializer::serialize_json,
//! };
//! use std::path::Path;
//!
//! let document = build_document(Path::new("./my-service"), &GeneratorConfig::default()).unwrap();
//! println!("{}", serialize_json(&document).unwrap());
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod scanner;
pub mod source;
pub mod symbols;
pub mod comment_block;
pub mod tags;
pub mod routes;
pub mod models;
pub mod assembler;
pub mod generator;
pub mod meta;
pub mod serializer;
pub mod error;
