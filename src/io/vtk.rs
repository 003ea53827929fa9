//! Legacy VTK (`.vtk`) unstructured-grid export and import.
//!
//! Only the ASCII flavour with triangle cells is produced or accepted:
//!
//! ```text
//! # vtk DataFile Version 2.0
//! <title>
//! ASCII
//! DATASET UNSTRUCTURED_GRID
//! POINTS <n> float
//! <x> <y> <z>            n lines
//! CELLS <m> <4m>
//! 3 <i0> <i1> <i2>        m lines
//! CELL_TYPES <m>
//! 5                       m lines
//! ```

use crate::float_types::Real;
use crate::io::IoError;
use crate::mesh::TriMesh;
use nalgebra::Point3;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Cell type code of a triangle
pub const VTK_TRIANGLE: u32 = 5;

/// Title written when the caller has nothing better
pub const DEFAULT_TITLE: &str = "Sphere Mesh";

/// Longest title line the legacy format allows
const MAX_TITLE_LEN: usize = 256;

const MAGIC: &str = "# vtk DataFile Version";

/// Write `mesh` to any writer.
///
/// Coordinates use the shortest decimal form that parses back to the same
/// value, so [`from_vtk_str`] recovers them exactly. Line breaks in `title`
/// become spaces and it is cut to 256 characters.
pub fn write_vtk_to<W: Write>(mesh: &TriMesh, writer: &mut W, title: &str) -> Result<(), IoError> {
    let title: String = title
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .take(MAX_TITLE_LEN)
        .collect();

    writeln!(writer, "# vtk DataFile Version 2.0")?;
    writeln!(writer, "{title}")?;
    writeln!(writer, "ASCII")?;
    writeln!(writer, "DATASET UNSTRUCTURED_GRID")?;

    writeln!(writer, "POINTS {} float", mesh.vertices.len())?;
    for v in &mesh.vertices {
        writeln!(writer, "{} {} {}", v.x, v.y, v.z)?;
    }

    let cells = mesh.triangles.len();
    writeln!(writer, "CELLS {} {}", cells, cells * 4)?;
    for [i0, i1, i2] in &mesh.triangles {
        writeln!(writer, "3 {i0} {i1} {i2}")?;
    }

    writeln!(writer, "CELL_TYPES {cells}")?;
    for _ in 0..cells {
        writeln!(writer, "{VTK_TRIANGLE}")?;
    }

    Ok(())
}

/// Render `mesh` as VTK text in memory.
///
/// ```
/// use octasphere::{Sphere, io::to_vtk_string};
/// use nalgebra::Point3;
///
/// let sphere = Sphere::new(Point3::origin(), 1.0, 1)?;
/// let text = to_vtk_string(sphere.mesh(), "octahedron")?;
/// assert!(text.contains("POINTS 6 float"));
/// assert!(text.contains("CELLS 8 32"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn to_vtk_string(mesh: &TriMesh, title: &str) -> Result<String, IoError> {
    let mut buf = Vec::new();
    write_vtk_to(mesh, &mut buf, title)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Create (or truncate) `path` and write `mesh` to it.
///
/// # Errors
/// Any failure to open, write or flush the file. Nothing is retried; the file
/// may be left empty or partially written.
pub fn write_vtk<P: AsRef<Path>>(mesh: &TriMesh, path: P, title: &str) -> Result<(), IoError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_vtk_to(mesh, &mut writer, title)?;
    writer.flush()?;

    debug!(
        path = %path.display(),
        points = mesh.vertices.len(),
        cells = mesh.triangles.len(),
        "wrote vtk file"
    );
    Ok(())
}

/// Read a mesh written by [`write_vtk`] (or any legacy ASCII unstructured grid
/// made only of triangles).
pub fn read_vtk<P: AsRef<Path>>(path: P) -> Result<TriMesh, IoError> {
    let text = std::fs::read_to_string(path)?;
    from_vtk_str(&text)
}

/// Parse the POINTS and CELLS sections of legacy VTK text.
///
/// A `CELL_TYPES` section, if present, must list one triangle code per cell.
/// Anything after it is ignored with a warning.
pub fn from_vtk_str(text: &str) -> Result<TriMesh, IoError> {
    let mut parts = text.splitn(5, '\n');
    let mut header_line = || parts.next().map(|l| l.trim_end_matches('\r'));

    let magic = header_line().unwrap_or_default();
    if !magic.starts_with(MAGIC) {
        return Err(malformed(format!("expected `{MAGIC}`, found `{magic}`")));
    }
    let _title = header_line().ok_or_else(|| malformed("missing title line"))?;
    let encoding = header_line().ok_or_else(|| malformed("missing encoding line"))?;
    if !encoding.trim().eq_ignore_ascii_case("ASCII") {
        return Err(malformed(format!("only ASCII files are supported, found `{}`", encoding.trim())));
    }
    let dataset = header_line().ok_or_else(|| malformed("missing DATASET line"))?;
    let mut words = dataset.split_whitespace();
    if !(words.next().is_some_and(|w| w.eq_ignore_ascii_case("DATASET"))
        && words.next().is_some_and(|w| w.eq_ignore_ascii_case("UNSTRUCTURED_GRID")))
    {
        return Err(malformed(format!("expected `DATASET UNSTRUCTURED_GRID`, found `{}`", dataset.trim())));
    }

    let mut tokens = Tokens::new(parts.next().unwrap_or_default());

    tokens.keyword("POINTS")?;
    let point_count = tokens.count("point count")?;
    let data_type = tokens.next("point data type")?;
    if !matches!(data_type.to_ascii_lowercase().as_str(), "float" | "double") {
        return Err(malformed(format!("unsupported point data type `{data_type}`")));
    }
    let mut vertices = Vec::with_capacity(point_count.min(PREALLOC_LIMIT));
    for _ in 0..point_count {
        let x = tokens.real("x coordinate")?;
        let y = tokens.real("y coordinate")?;
        let z = tokens.real("z coordinate")?;
        vertices.push(Point3::new(x, y, z));
    }

    tokens.keyword("CELLS")?;
    let cell_count = tokens.count("cell count")?;
    let list_size = tokens.count("cell list size")?;
    if cell_count.checked_mul(4) != Some(list_size) {
        return Err(malformed(format!(
            "cell list size {list_size} does not match {cell_count} triangles"
        )));
    }
    let mut triangles = Vec::with_capacity(cell_count.min(PREALLOC_LIMIT));
    for cell in 0..cell_count {
        let arity = tokens.count("cell vertex count")?;
        if arity != 3 {
            return Err(malformed(format!("cell {cell} has {arity} vertices, only triangles are supported")));
        }
        triangles.push([
            tokens.count("cell index")?,
            tokens.count("cell index")?,
            tokens.count("cell index")?,
        ]);
    }

    if let Some(word) = tokens.peek() {
        if word.eq_ignore_ascii_case("CELL_TYPES") {
            tokens.keyword("CELL_TYPES")?;
            let type_count = tokens.count("cell type count")?;
            if type_count != cell_count {
                return Err(malformed(format!(
                    "{type_count} cell types for {cell_count} cells"
                )));
            }
            for cell in 0..type_count {
                let code = tokens.count("cell type")?;
                if code != VTK_TRIANGLE as usize {
                    return Err(malformed(format!("cell {cell} has type {code}, expected {VTK_TRIANGLE}")));
                }
            }
        }
    }

    if let Some(word) = tokens.peek() {
        warn!(next = word, "ignoring trailing vtk sections");
    }

    TriMesh::from_parts(vertices, triangles).map_err(|e| malformed(e.to_string()))
}

/// Cap on up-front allocation driven by counts read from the file
const PREALLOC_LIMIT: usize = 1 << 20;

fn malformed(msg: impl Into<String>) -> IoError {
    IoError::MalformedInput(msg.into())
}

/// Whitespace token stream over the body of the file.
struct Tokens<'a> {
    iter: std::iter::Peekable<std::str::SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(body: &'a str) -> Self {
        Tokens {
            iter: body.split_whitespace().peekable(),
        }
    }

    fn peek(&mut self) -> Option<&'a str> {
        self.iter.peek().copied()
    }

    fn next(&mut self, what: &str) -> Result<&'a str, IoError> {
        self.iter
            .next()
            .ok_or_else(|| malformed(format!("unexpected end of input, expected {what}")))
    }

    fn keyword(&mut self, keyword: &str) -> Result<(), IoError> {
        let word = self.next(keyword)?;
        if word.eq_ignore_ascii_case(keyword) {
            Ok(())
        } else {
            Err(malformed(format!("expected `{keyword}`, found `{word}`")))
        }
    }

    fn count(&mut self, what: &str) -> Result<usize, IoError> {
        Ok(self.next(what)?.parse::<usize>()?)
    }

    fn real(&mut self, what: &str) -> Result<Real, IoError> {
        Ok(self.next(what)?.parse::<Real>()?)
    }
}
