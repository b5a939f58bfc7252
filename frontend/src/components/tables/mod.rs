pub mod admissions_table;
pub mod documents_table;
pub mod fees_table;
pub mod students_table;

pub use admissions_table::AdmissionsTable;
pub use documents_table::DocumentsTable;
pub use fees_table::FeesTable;
pub use students_table::StudentsTable;
