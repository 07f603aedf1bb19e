use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use thiserror::Error;

use crate::rows::{BranchRow, EdgeRow, NodeProjectionRow, NodeRow};
use crate::transform::{ExportTables, node_projection_dst, node_projection_src};

pub const SHEET_NAME: &str = "Sheet1";
/// Data rows that fit below the header row of one worksheet.
pub const MAX_DATA_ROWS: usize = 1_048_575;

pub const BRANCHES_FILE: &str = "Branches_Data.xlsx";
pub const NODES_FILE: &str = "KnotenList.xlsx";
pub const EDGES_FILE: &str = "KantenList.xlsx";
pub const NODES_SRC_FILE: &str = "Knoten_src_List.xlsx";
pub const NODES_DST_FILE: &str = "Knoten_dst_List.xlsx";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing {}: {source}", path.display())]
    Xlsx {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },
    #[error("{rows} rows do not fit in one worksheet (limit {limit})")]
    TooManyRows { rows: usize, limit: usize },
}

/// A table row that knows its column layout.
pub trait SheetRow {
    fn columns() -> Vec<&'static str>;

    /// Leading index value, for sheets written with an index column.
    fn index(&self) -> Option<usize> {
        None
    }

    fn write_cells(&self, sheet: &mut Worksheet, row: u32, first_col: u16)
    -> Result<(), XlsxError>;
}

impl SheetRow for BranchRow {
    fn columns() -> Vec<&'static str> {
        BranchRow::export_columns()
    }

    fn index(&self) -> Option<usize> {
        Some(self.index)
    }

    fn write_cells(
        &self,
        sheet: &mut Worksheet,
        row: u32,
        first_col: u16,
    ) -> Result<(), XlsxError> {
        let values = [
            self.skeleton_id as f64,
            self.node_id_src as f64,
            self.node_id_dst as f64,
            self.branch_distance,
            self.branch_type.code() as f64,
            self.coord_src[0],
            self.coord_src[1],
            self.coord_src[2],
            self.coord_dst[0],
            self.coord_dst[1],
            self.coord_dst[2],
            self.euclidean_distance,
        ];
        write_numbers(sheet, row, first_col, &values)
    }
}

impl SheetRow for NodeRow {
    fn columns() -> Vec<&'static str> {
        NodeRow::COLUMNS.to_vec()
    }

    fn write_cells(
        &self,
        sheet: &mut Worksheet,
        row: u32,
        first_col: u16,
    ) -> Result<(), XlsxError> {
        let values = [
            self.node_id as f64,
            self.coord[0],
            self.coord[1],
            self.coord[2],
        ];
        write_numbers(sheet, row, first_col, &values)
    }
}

impl SheetRow for NodeProjectionRow {
    fn columns() -> Vec<&'static str> {
        NodeRow::COLUMNS.to_vec()
    }

    fn index(&self) -> Option<usize> {
        Some(self.index)
    }

    fn write_cells(
        &self,
        sheet: &mut Worksheet,
        row: u32,
        first_col: u16,
    ) -> Result<(), XlsxError> {
        let values = [
            self.node_id as f64,
            self.coord[0],
            self.coord[1],
            self.coord[2],
        ];
        write_numbers(sheet, row, first_col, &values)
    }
}

impl SheetRow for EdgeRow {
    fn columns() -> Vec<&'static str> {
        EdgeRow::COLUMNS.to_vec()
    }

    fn index(&self) -> Option<usize> {
        Some(self.index)
    }

    fn write_cells(
        &self,
        sheet: &mut Worksheet,
        row: u32,
        first_col: u16,
    ) -> Result<(), XlsxError> {
        let values = [self.node_id_src as f64, self.node_id_dst as f64];
        write_numbers(sheet, row, first_col, &values)
    }
}

fn write_numbers(
    sheet: &mut Worksheet,
    row: u32,
    first_col: u16,
    values: &[f64],
) -> Result<(), XlsxError> {
    for (k, &v) in values.iter().enumerate() {
        sheet.write_number(row, first_col + k as u16, v)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexColumn {
    /// Blank-headed first column holding each row's summary index.
    Leading,
    Omitted,
}

/// Writes `rows` to a single-sheet workbook at `path` with a bold header row.
pub fn write_sheet<R: SheetRow>(
    path: &Path,
    rows: &[R],
    index_column: IndexColumn,
) -> Result<(), ExportError> {
    if rows.len() > MAX_DATA_ROWS {
        return Err(ExportError::TooManyRows {
            rows: rows.len(),
            limit: MAX_DATA_ROWS,
        });
    }

    build_workbook(rows, index_column)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|source| ExportError::Xlsx {
            path: path.to_path_buf(),
            source,
        })
}

fn build_workbook<R: SheetRow>(
    rows: &[R],
    index_column: IndexColumn,
) -> Result<Workbook, XlsxError> {
    let header = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let first_col: u16 = match index_column {
        IndexColumn::Leading => 1,
        IndexColumn::Omitted => 0,
    };

    if index_column == IndexColumn::Leading {
        sheet.write_blank(0, 0, &header)?;
    }
    for (k, name) in R::columns().into_iter().enumerate() {
        sheet.write_string_with_format(0, first_col + k as u16, name, &header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let xlsx_row = i as u32 + 1;
        if index_column == IndexColumn::Leading {
            let index = row.index().unwrap_or(i);
            sheet.write_number_with_format(xlsx_row, 0, index as f64, &header)?;
        }
        row.write_cells(sheet, xlsx_row, first_col)?;
    }

    Ok(workbook)
}

/// Writes the branch, node and edge workbooks into `dir` and returns the
/// written paths in that order. With `node_projections`, the per-side node
/// projections are written as two more workbooks.
pub fn write_exports(
    dir: &Path,
    tables: &ExportTables,
    node_projections: bool,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::new();

    let path = dir.join(BRANCHES_FILE);
    write_sheet(&path, &tables.branches, IndexColumn::Leading)?;
    written.push(path);

    let path = dir.join(NODES_FILE);
    write_sheet(&path, &tables.nodes, IndexColumn::Omitted)?;
    written.push(path);

    let path = dir.join(EDGES_FILE);
    write_sheet(&path, &tables.edges, IndexColumn::Leading)?;
    written.push(path);

    if node_projections {
        let path = dir.join(NODES_SRC_FILE);
        write_sheet(
            &path,
            &node_projection_src(&tables.branches),
            IndexColumn::Leading,
        )?;
        written.push(path);

        let path = dir.join(NODES_DST_FILE);
        write_sheet(
            &path,
            &node_projection_dst(&tables.branches),
            IndexColumn::Leading,
        )?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use calamine::{Data, Range, Reader, Xlsx, open_workbook};
    use sg_graph::{BranchRecord, BranchTable, BranchType};
    use tempfile::TempDir;

    use super::{
        BRANCHES_FILE, EDGES_FILE, ExportError, IndexColumn, NODES_DST_FILE, NODES_FILE,
        NODES_SRC_FILE, write_exports, write_sheet,
    };
    use crate::rows::NodeRow;
    use crate::transform::ExportTables;

    fn sample_table() -> BranchTable {
        let row = |src: usize, dst: usize, branch_type| BranchRecord {
            skeleton_id: 1,
            node_id_src: src,
            node_id_dst: dst,
            branch_distance: 2.0,
            branch_type,
            mean_pixel_value: 1.0,
            stdev_pixel_value: 0.0,
            image_coord_src: [0, 0, src],
            image_coord_dst: [0, 0, dst],
            coord_src: [0.0, 0.0, src as f64],
            coord_dst: [0.0, 0.0, dst as f64],
            euclidean_distance: 2.0,
        };
        [
            row(1, 2, BranchType::JunctionToEndpoint),
            row(3, 4, BranchType::EndpointToEndpoint),
        ]
        .into_iter()
        .collect()
    }

    /// Sheet names and the `Sheet1` range of a written workbook.
    fn read_back(path: &Path) -> (Vec<String>, Range<Data>) {
        let mut book: Xlsx<_> = open_workbook(path).expect("open workbook");
        let names = book.sheet_names();
        let range = book.worksheet_range("Sheet1").expect("Sheet1 range");
        (names, range)
    }

    /// Cell at absolute `(row, col)`; absent cells read as empty.
    fn cell(range: &Range<Data>, row: u32, col: u32) -> Data {
        range.get_value((row, col)).cloned().unwrap_or(Data::Empty)
    }

    fn header(range: &Range<Data>, width: u32) -> Vec<Data> {
        (0..width).map(|c| cell(range, 0, c)).collect()
    }

    fn text(names: &[&str]) -> Vec<Data> {
        names.iter().map(|n| Data::String(n.to_string())).collect()
    }

    fn numbers(values: &[f64]) -> Vec<Data> {
        values.iter().map(|&v| Data::Float(v)).collect()
    }

    fn row_values(range: &Range<Data>, row: u32, width: u32) -> Vec<Data> {
        (0..width).map(|c| cell(range, row, c)).collect()
    }

    /// Type 0 `3 -> 4`, type 1 `5 -> 2`, type 2 `5 -> 7`.
    fn mixed_table() -> BranchTable {
        let at = |id: usize| [id as f64, 10.0 + id as f64, 0.5 * id as f64];
        let row = |src: usize, dst: usize, branch_type| BranchRecord {
            skeleton_id: 2,
            node_id_src: src,
            node_id_dst: dst,
            branch_distance: 4.5,
            branch_type,
            mean_pixel_value: 1.0,
            stdev_pixel_value: 0.0,
            image_coord_src: [src, src, src],
            image_coord_dst: [dst, dst, dst],
            coord_src: at(src),
            coord_dst: at(dst),
            euclidean_distance: 3.25,
        };
        [
            row(3, 4, BranchType::EndpointToEndpoint),
            row(5, 2, BranchType::JunctionToEndpoint),
            row(5, 7, BranchType::JunctionToJunction),
        ]
        .into_iter()
        .collect()
    }

    fn is_zip(path: &Path) -> bool {
        let bytes = fs::read(path).expect("read workbook");
        bytes.starts_with(b"PK")
    }

    #[test]
    fn writes_three_workbooks() {
        let dir = TempDir::new().expect("temp dir");
        let tables = ExportTables::from_branch_table(&sample_table());

        let written = write_exports(dir.path(), &tables, false).expect("export");
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().expect("file name").to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![BRANCHES_FILE, NODES_FILE, EDGES_FILE]);
        assert!(written.iter().all(|p| is_zip(p)));
    }

    #[test]
    fn node_projections_are_optional_extras() {
        let dir = TempDir::new().expect("temp dir");
        let tables = ExportTables::from_branch_table(&sample_table());

        let written = write_exports(dir.path(), &tables, true).expect("export");
        assert_eq!(written.len(), 5);
        assert!(dir.path().join(NODES_SRC_FILE).is_file());
        assert!(dir.path().join(NODES_DST_FILE).is_file());
    }

    #[test]
    fn empty_tables_still_produce_workbooks() {
        let dir = TempDir::new().expect("temp dir");
        let tables = ExportTables::default();

        let written = write_exports(dir.path(), &tables, false).expect("export");
        assert_eq!(written.len(), 3);
        assert!(written.iter().all(|p| is_zip(p)));
    }

    #[test]
    fn missing_directory_is_reported_with_path() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("absent").join(NODES_FILE);
        let rows = vec![NodeRow {
            node_id: 1,
            coord: [0.0; 3],
        }];

        let err = write_sheet(&path, &rows, IndexColumn::Omitted).expect_err("no parent dir");
        match err {
            ExportError::Xlsx { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn branch_workbook_layout_and_values() {
        let dir = TempDir::new().expect("temp dir");
        let tables = ExportTables::from_branch_table(&mixed_table());
        write_exports(dir.path(), &tables, false).expect("export");

        let (names, range) = read_back(&dir.path().join(BRANCHES_FILE));
        assert_eq!(names, vec!["Sheet1".to_string()]);

        let mut expected = vec![Data::Empty];
        expected.extend(text(&[
            "skeleton-id",
            "node-id-src",
            "node-id-dst",
            "branch-distance",
            "branch-type",
            "coord-src-0",
            "coord-src-1",
            "coord-src-2",
            "coord-dst-0",
            "coord-dst-1",
            "coord-dst-2",
            "euclidean-distance",
        ]));
        assert_eq!(header(&range, 13), expected);

        assert_eq!(
            row_values(&range, 1, 13),
            numbers(&[1.0, 2.0, 5.0, 2.0, 4.5, 1.0, 5.0, 15.0, 2.5, 2.0, 12.0, 1.0, 3.25])
        );
        assert_eq!(
            row_values(&range, 2, 13),
            numbers(&[2.0, 2.0, 5.0, 7.0, 4.5, 2.0, 5.0, 15.0, 2.5, 7.0, 17.0, 3.5, 3.25])
        );
        assert_eq!(cell(&range, 3, 0), Data::Empty);
        assert_eq!(cell(&range, 1, 13), Data::Empty);
    }

    #[test]
    fn node_workbook_has_no_index_column() {
        let dir = TempDir::new().expect("temp dir");
        let tables = ExportTables::from_branch_table(&mixed_table());
        write_exports(dir.path(), &tables, false).expect("export");

        let (names, range) = read_back(&dir.path().join(NODES_FILE));
        assert_eq!(names, vec!["Sheet1".to_string()]);
        assert_eq!(
            header(&range, 4),
            text(&["node-id-src", "coord-src-0", "coord-src-1", "coord-src-2"])
        );
        assert_eq!(cell(&range, 0, 4), Data::Empty);

        assert_eq!(row_values(&range, 1, 4), numbers(&[2.0, 2.0, 12.0, 1.0]));
        assert_eq!(row_values(&range, 2, 4), numbers(&[5.0, 5.0, 15.0, 2.5]));
        assert_eq!(row_values(&range, 3, 4), numbers(&[7.0, 7.0, 17.0, 3.5]));
        assert_eq!(cell(&range, 4, 0), Data::Empty);
    }

    #[test]
    fn edge_workbook_keeps_summary_index() {
        let dir = TempDir::new().expect("temp dir");
        let tables = ExportTables::from_branch_table(&mixed_table());
        write_exports(dir.path(), &tables, false).expect("export");

        let (_, range) = read_back(&dir.path().join(EDGES_FILE));
        let mut expected = vec![Data::Empty];
        expected.extend(text(&["node-id-src", "node-id-dst"]));
        assert_eq!(header(&range, 3), expected);
        assert_eq!(row_values(&range, 1, 3), numbers(&[1.0, 5.0, 2.0]));
        assert_eq!(row_values(&range, 2, 3), numbers(&[2.0, 5.0, 7.0]));
        assert_eq!(cell(&range, 3, 0), Data::Empty);
    }

    #[test]
    fn projection_workbooks_use_source_column_names() {
        let dir = TempDir::new().expect("temp dir");
        let tables = ExportTables::from_branch_table(&mixed_table());
        write_exports(dir.path(), &tables, true).expect("export");

        let mut expected = vec![Data::Empty];
        expected.extend(text(&["node-id-src", "coord-src-0", "coord-src-1", "coord-src-2"]));

        let (_, src) = read_back(&dir.path().join(NODES_SRC_FILE));
        assert_eq!(header(&src, 5), expected);
        assert_eq!(row_values(&src, 1, 5), numbers(&[1.0, 5.0, 5.0, 15.0, 2.5]));
        assert_eq!(row_values(&src, 2, 5), numbers(&[2.0, 5.0, 5.0, 15.0, 2.5]));

        let (_, dst) = read_back(&dir.path().join(NODES_DST_FILE));
        assert_eq!(header(&dst, 5), expected);
        assert_eq!(row_values(&dst, 1, 5), numbers(&[1.0, 2.0, 2.0, 12.0, 1.0]));
        assert_eq!(row_values(&dst, 2, 5), numbers(&[2.0, 7.0, 7.0, 17.0, 3.5]));
    }

    #[test]
    fn empty_tables_write_header_rows_only() {
        let dir = TempDir::new().expect("temp dir");
        write_exports(dir.path(), &ExportTables::default(), false).expect("export");

        let (_, range) = read_back(&dir.path().join(NODES_FILE));
        assert_eq!(
            header(&range, 4),
            text(&["node-id-src", "coord-src-0", "coord-src-1", "coord-src-2"])
        );
        assert_eq!(cell(&range, 1, 0), Data::Empty);

        let (_, range) = read_back(&dir.path().join(EDGES_FILE));
        assert_eq!(cell(&range, 0, 1), Data::String("node-id-src".to_string()));
        assert_eq!(cell(&range, 1, 1), Data::Empty);
    }
}
