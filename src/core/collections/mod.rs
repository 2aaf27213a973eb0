//=========================================================================
// Collections
//=========================================================================
//
// Allocation-disciplined storage used on the frame path.
//
// Modules:
//   - fixed_array: capacity-bounded sequence
//   - object_pool: recycler built on fixed_array
//   - sort: interchangeable sort strategies
//
//=========================================================================

//=== Module Declarations =================================================

pub mod fixed_array;
pub mod object_pool;
pub mod sort;

//=== Public API ==========================================================

pub use fixed_array::FixedSizeArray;
pub use object_pool::{ObjectPool, Poolable};
pub use sort::{QuickSorter, SortStrategy, Sorter, StandardSorter};
