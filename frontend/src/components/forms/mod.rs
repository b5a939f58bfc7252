pub mod fee_collection_form;

pub use fee_collection_form::FeeCollectionForm;
