pub mod diagnostic;
pub mod error;
pub mod field;
pub mod record;
pub mod settings;
pub mod validator;

pub use diagnostic::{Diagnostic, IssueKind, Severity};
pub use error::{ModelError, Result};
pub use field::{Field, FieldType, SelectOption};
pub use record::{CellValue, FieldPatch, HookResponse, Record};
pub use settings::{ImportSettings, StyleOverrides};
pub use validator::{Anchor, MatchMode, Validator};
