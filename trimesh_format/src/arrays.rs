use serde::{Deserialize, Serialize};

/// A row-oriented N×k array, the matrix shape hosts pass mesh data around in.
///
/// Rows are kept as given; nothing forces them to share a length. Whether they
/// do is for [`crate::validate`] to decide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table<T> {
    rows: Vec<Vec<T>>,
}

impl<T: Copy> Table<T> {
    pub fn from_rows<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Vec<T>>,
    {
        Table {
            rows: rows.into_iter().map(Into::into).collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column count of the first row, `0` for an empty table.
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// A mesh as a set of parallel arrays.
///
/// `texture_faces` and `normal_faces` pair with `faces` by row position. Turn
/// it into a [`crate::Mesh`] with `Mesh::try_from` to have it validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshArrays {
    pub vertices: Table<f64>,
    pub faces: Table<u32>,
    pub tex_coords: Table<f64>,
    pub texture_faces: Table<u32>,
    pub normals: Table<f64>,
    pub normal_faces: Table<u32>,
    pub material_library: Option<String>,
}

#[cfg(test)]
mod test {
    use super::Table;

    #[test]
    fn test_table_dimensions() {
        let table: Table<f64> = Table::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.rows().nth(1), Some(&[2.0, 3.0][..]));

        let empty: Table<u32> = Table::default();
        assert!(empty.is_empty());
        assert_eq!(empty.column_count(), 0);
    }

    #[test]
    fn test_table_from_fixed_rows() {
        let table: Table<u32> = Table::from_rows(vec![[1u32, 2, 3], [4, 5, 6]]);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.rows().next(), Some(&[1, 2, 3][..]));
    }
}
