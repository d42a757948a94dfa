pub mod admin;
pub mod artisan;
pub mod generator;
pub mod inflector;
pub mod naming;
pub mod provider;
pub mod report;
pub mod routes;
pub mod templates;
pub mod writer;

pub use generator::{entity_names, ServiceGenerator};
pub use naming::EntityNames;
pub use report::{FileStatus, GeneratedFile, GenerationReport, Notice};
pub use routes::RouteMode;
pub use templates::{replace_placeholders, StubLoader};
pub use writer::FileWriter;
