pub mod use_collection;
pub mod use_fee_form;
pub mod use_student_lookup;
