//! Export tables derived from a branch summary.
//!
//! Only junction branches (types `1` and `2`) are exported. From them three
//! tables are built: the branch rows themselves, the unique nodes at either
//! end of a branch, and the `(src, dst)` edge list. All transforms return new
//! tables and leave the summary untouched.
//!
//! [`write_exports`] writes the tables as single-sheet XLSX workbooks.

mod rows;
mod transform;
mod xlsx;

pub use rows::{BranchRow, DROPPED_BRANCH_COLUMNS, EdgeRow, NodeProjectionRow, NodeRow};
pub use transform::{
    ExportTables, RETAINED_TYPES, branches_export, edges_export, is_retained, node_projection_dst,
    node_projection_src, nodes_export,
};
pub use xlsx::{
    BRANCHES_FILE, EDGES_FILE, ExportError, IndexColumn, MAX_DATA_ROWS, NODES_DST_FILE,
    NODES_FILE, NODES_SRC_FILE, SHEET_NAME, SheetRow, write_exports, write_sheet,
};
