mod id_list;
mod predicate;

pub use id_list::id_set;
pub use predicate::{
    contains_with_gaps,
    like_pattern,
    Condition,
    FieldSource,
    Operand,
    Predicate,
};
