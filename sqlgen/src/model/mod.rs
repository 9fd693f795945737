//! Schema descriptors
//!
//! Immutable value types describing the tables, columns and indexes a caller
//! wants rendered. They carry no behavior beyond construction helpers and
//! invariant checks; SQL builders only ever borrow them.

mod column;
mod enums;
mod index;
mod table;

pub use column::Column;
pub use enums::{
    Collation, DataType, IndexFunction, IndexType, Logged, Nullable, SortOrder, Unique,
};
pub use index::Index;
pub use table::Table;
