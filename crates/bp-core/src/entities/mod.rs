//! Entity structs for all BrightPath records.
//!
//! Each entity maps to a table in the libSQL database (see
//! `bp-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema`. Password hashes are never part of an
//! entity; they stay inside the store layer.

mod announcement;
mod parent;
mod release;
mod result;
mod student;
mod subject;
mod user;

pub use announcement::Announcement;
pub use parent::Parent;
pub use release::ResultRelease;
pub use result::{CompiledResult, ExamResult};
pub use student::Student;
pub use subject::Subject;
pub use user::User;
