pub mod cells;
pub mod forms;
pub mod header;
pub mod student_info_panel;
pub mod table_controls;
pub mod tables;
