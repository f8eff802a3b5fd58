mod tables;

pub use self::tables::{
    audit as print_audit_report, batch as print_batch_report, result as print_result,
};
