pub mod commit;

pub use commit::{BODY_WIDTH, CommitRecord, SUBJECT_WIDTH};
